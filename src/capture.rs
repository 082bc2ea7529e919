//! Custodian captures.
//!
//! After a move, each orthogonal neighbour of the destination that belongs to the
//! other side is tested. A pawn falls when it is hostile-flanked on one axis, the
//! king only when hostile on all four sides. A side is hostile when it is the board
//! edge, an empty throne or corner, or a piece of the opposing side.

use serde::Serialize;

use crate::board::{Board, Coordinate, Direction};
use crate::piece::Side;

/// What lies next to a square, seen from the side standing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborKind {
    /// Empty ordinary square, or a piece of the same side.
    Unopposed,
    /// Past the edge of the board.
    Edge,
    /// Empty throne or empty corner.
    KingsSquare,
    /// A piece of the opposing side.
    Opposed,
}

impl NeighborKind {
    /// Whether this side works as a capturing wall.
    #[inline]
    pub const fn is_hostile(self) -> bool {
        !matches!(self, NeighborKind::Unopposed)
    }
}

/// Classify the neighbour of `origin` in `dir` relative to `side`.
/// Returns the neighbour's coordinate unless it is past the edge.
pub fn classify(board: &Board, origin: Coordinate, side: Side, dir: Direction) -> (NeighborKind, Option<Coordinate>) {
    let Some(neighbor) = origin.step(dir) else {
        return (NeighborKind::Edge, None);
    };
    let kind = match board[neighbor] {
        Some(occupant) if !occupant.belongs_to(side) => NeighborKind::Opposed,
        Some(_) => NeighborKind::Unopposed,
        None if neighbor.is_restricted() => NeighborKind::KingsSquare,
        None => NeighborKind::Unopposed,
    };
    (kind, Some(neighbor))
}

/// Pieces removed (or, for the king, taken) by a single move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Captures {
    /// Pawns removed from the board, in west, east, north, south order.
    pub pawns: Vec<Coordinate>,
    /// Square of the king if it was surrounded. The king stays on the board.
    pub king: Option<Coordinate>,
}

impl Captures {
    pub fn is_empty(&self) -> bool {
        self.pawns.is_empty() && self.king.is_none()
    }
}

/// Check whether the piece on `victim` is surrounded according to its kind.
/// Returns false for an empty square.
pub fn is_captured(board: &Board, victim: Coordinate) -> bool {
    let Some(occupant) = board[victim] else {
        return false;
    };
    let hostile = |dir: Direction| classify(board, victim, occupant.side(), dir).0.is_hostile();

    if occupant.is_king() {
        // An empty throne is a KingsSquare, so next to it three attackers suffice.
        // On the throne all four neighbours must be attackers.
        Direction::ALL.into_iter().all(hostile)
    } else {
        (hostile(Direction::West) && hostile(Direction::East))
            || (hostile(Direction::North) && hostile(Direction::South))
    }
}

/// Apply the captures triggered by the piece of `mover` that just landed on `last_moved`.
///
/// Every candidate is judged on the board as it stands after the move and before
/// any removal, so the result does not depend on the order of the directions.
/// Captured pawns are cleared; a captured king is only reported.
pub fn resolve_captures(board: &mut Board, last_moved: Coordinate, mover: Side) -> Captures {
    let mut captures = Captures::default();

    for dir in Direction::ALL {
        let (kind, neighbor) = classify(board, last_moved, mover, dir);
        let Some(victim) = neighbor else { continue };
        if kind != NeighborKind::Opposed || !is_captured(board, victim) {
            continue;
        }
        match board[victim] {
            Some(occupant) if occupant.is_king() => captures.king = Some(victim),
            _ => captures.pawns.push(victim),
        }
    }

    for &victim in &captures.pawns {
        board[victim] = None;
    }
    captures
}
