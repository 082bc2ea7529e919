//! Move validation and generation.
//! Pieces slide like rooks until blocked; only the king may land on the throne or a corner.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Coordinate, Direction, OutOfBounds};
use crate::piece::Side;

/// Upper bound on the number of moves one side can have (estimated).
/// Used to allocate the move vector once.
pub const MAX_MOVES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl Move {
    pub const fn new(from: Coordinate, to: Coordinate) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Why a requested move was refused. A refused move changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
pub enum IllegalMove {
    #[error("square {0} is off the board")]
    OutOfBounds(Coordinate),
    #[error("there is no piece on {0}")]
    EmptySource(Coordinate),
    #[error("the piece on {square} does not belong to the {side}")]
    NotYourPiece { square: Coordinate, side: Side },
    #[error("{from} and {to} are not on a common row or column")]
    NotOrthogonal { from: Coordinate, to: Coordinate },
    #[error("the path is blocked at {0}")]
    PathBlocked(Coordinate),
    #[error("square {0} is already occupied")]
    DestinationOccupied(Coordinate),
    #[error("only the king may land on {0}")]
    RestrictedSquare(Coordinate),
    #[error("the game is already over")]
    GameAlreadyOver,
}

impl From<OutOfBounds> for IllegalMove {
    fn from(err: OutOfBounds) -> Self {
        IllegalMove::OutOfBounds(err.0)
    }
}

/// Check if moving the piece on `from` to `to` is legal for `side`.
/// The checks run in a fixed order and the first failure is reported.
pub fn validate(board: &Board, from: Coordinate, to: Coordinate, side: Side) -> Result<Move, IllegalMove> {
    let piece = board.square_at(from)?;
    board.square_at(to)?;

    // A null move shares both row and column.
    if from == to {
        return Err(IllegalMove::NotOrthogonal { from, to });
    }

    let piece = piece.ok_or(IllegalMove::EmptySource(from))?;
    if !piece.belongs_to(side) {
        return Err(IllegalMove::NotYourPiece { square: from, side });
    }

    if from.row != to.row && from.col != to.col {
        return Err(IllegalMove::NotOrthogonal { from, to });
    }

    if let Some(blocker) = between(from, to).find(|&c| !board.is_empty_at(c)) {
        return Err(IllegalMove::PathBlocked(blocker));
    }

    if !board.is_empty_at(to) {
        return Err(IllegalMove::DestinationOccupied(to));
    }

    // Landing is restricted, passing over the empty throne is not.
    if to.is_restricted() && !piece.is_king() {
        return Err(IllegalMove::RestrictedSquare(to));
    }

    Ok(Move::new(from, to))
}

/// Squares strictly between two coordinates on a common line, walking from `from`.
/// Yields nothing if they are not aligned.
fn between(from: Coordinate, to: Coordinate) -> impl Iterator<Item = Coordinate> {
    let dir = if from.row == to.row {
        if to.col < from.col { Direction::West } else { Direction::East }
    } else if to.row < from.row {
        Direction::North
    } else {
        Direction::South
    };
    let aligned = from != to && (from.row == to.row || from.col == to.col);

    std::iter::successors(from.step(dir), move |c| c.step(dir))
        .take_while(move |&c| aligned && c != to)
}

/// Every square the piece on `from` can legally reach, clockwise from west.
/// Empty if `from` is empty or off the board.
pub fn destinations(board: &Board, from: Coordinate) -> Vec<Coordinate> {
    let mut out = Vec::new();
    push_destinations(board, from, &mut out);
    out
}

fn push_destinations(board: &Board, from: Coordinate, out: &mut Vec<Coordinate>) {
    let Ok(Some(piece)) = board.square_at(from) else {
        return;
    };
    for dir in Direction::ALL {
        let mut next = from.step(dir);
        while let Some(c) = next {
            if !board.is_empty_at(c) {
                break;
            }
            // Restricted squares may only be occupied by the king.
            // Pawns slide over the empty throne.
            if piece.is_king() || !c.is_restricted() {
                out.push(c);
            }
            next = c.step(dir);
        }
    }
}

/// Fill `moves` with every legal move of `side`.
/// The vector is cleared first so it can be reused across calls.
pub fn generate_moves(board: &Board, side: Side, moves: &mut Vec<Move>) {
    moves.clear();
    let mut targets = Vec::new();
    for (from, occupant) in board.occupants() {
        if !occupant.belongs_to(side) {
            continue;
        }
        targets.clear();
        push_destinations(board, from, &mut targets);
        moves.extend(targets.iter().map(|&to| Move::new(from, to)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::THRONE;
    use crate::piece::Occupant;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn board_with(pieces: &[(usize, usize, Occupant)]) -> Board {
        let mut board = Board::empty();
        for &(r, col, occupant) in pieces {
            board.place(c(r, col), occupant).unwrap();
        }
        board
    }

    #[test]
    fn test_valid_slides() {
        let board = board_with(&[(2, 2, Occupant::ATTACKER)]);
        assert_eq!(validate(&board, c(2, 2), c(2, 9), Side::Attacker), Ok(Move::new(c(2, 2), c(2, 9))));
        assert!(validate(&board, c(2, 2), c(0, 2), Side::Attacker).is_ok());
        assert!(validate(&board, c(2, 2), c(10, 2), Side::Attacker).is_ok());
        assert!(validate(&board, c(2, 2), c(2, 0), Side::Attacker).is_ok());
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::standard();
        assert_eq!(
            validate(&board, c(11, 0), c(10, 0), Side::Attacker),
            Err(IllegalMove::OutOfBounds(c(11, 0)))
        );
        assert_eq!(
            validate(&board, c(0, 3), c(0, 11), Side::Attacker),
            Err(IllegalMove::OutOfBounds(c(0, 11)))
        );
    }

    #[test]
    fn test_null_move() {
        let board = Board::standard();
        assert_eq!(
            validate(&board, c(0, 3), c(0, 3), Side::Attacker),
            Err(IllegalMove::NotOrthogonal { from: c(0, 3), to: c(0, 3) })
        );
    }

    #[test]
    fn test_source_checks() {
        let board = Board::standard();
        assert_eq!(validate(&board, c(2, 2), c(2, 3), Side::Attacker), Err(IllegalMove::EmptySource(c(2, 2))));
        assert_eq!(
            validate(&board, c(3, 5), c(3, 2), Side::Attacker),
            Err(IllegalMove::NotYourPiece { square: c(3, 5), side: Side::Attacker })
        );
        assert_eq!(
            validate(&board, c(0, 3), c(2, 3), Side::Defender),
            Err(IllegalMove::NotYourPiece { square: c(0, 3), side: Side::Defender })
        );
    }

    #[test]
    fn test_diagonal_rejected() {
        let board = board_with(&[(2, 2, Occupant::ATTACKER)]);
        assert_eq!(
            validate(&board, c(2, 2), c(4, 4), Side::Attacker),
            Err(IllegalMove::NotOrthogonal { from: c(2, 2), to: c(4, 4) })
        );
        assert_eq!(
            validate(&board, c(2, 2), c(3, 5), Side::Attacker),
            Err(IllegalMove::NotOrthogonal { from: c(2, 2), to: c(3, 5) })
        );
    }

    #[test]
    fn test_path_blocked_reports_first_blocker() {
        let board = board_with(&[
            (2, 2, Occupant::ATTACKER),
            (2, 5, Occupant::DEFENDER),
            (2, 7, Occupant::ATTACKER),
        ]);
        assert_eq!(validate(&board, c(2, 2), c(2, 9), Side::Attacker), Err(IllegalMove::PathBlocked(c(2, 5))));
        assert_eq!(validate(&board, c(2, 7), c(2, 0), Side::Attacker), Err(IllegalMove::PathBlocked(c(2, 5))));
    }

    #[test]
    fn test_destination_occupied() {
        let board = board_with(&[(2, 2, Occupant::ATTACKER), (2, 3, Occupant::DEFENDER)]);
        assert_eq!(
            validate(&board, c(2, 2), c(2, 3), Side::Attacker),
            Err(IllegalMove::DestinationOccupied(c(2, 3)))
        );
    }

    #[test]
    fn test_restricted_squares() {
        let board = board_with(&[
            (0, 4, Occupant::ATTACKER),
            (5, 2, Occupant::DEFENDER),
            (10, 4, Occupant::KING),
        ]);
        assert_eq!(
            validate(&board, c(0, 4), c(0, 0), Side::Attacker),
            Err(IllegalMove::RestrictedSquare(c(0, 0)))
        );
        assert_eq!(
            validate(&board, c(5, 2), THRONE, Side::Defender),
            Err(IllegalMove::RestrictedSquare(THRONE))
        );
        assert!(validate(&board, c(10, 4), c(10, 0), Side::Defender).is_ok());
        assert!(validate(&board, c(10, 4), c(10, 10), Side::Defender).is_ok());
    }

    #[test]
    fn test_pawn_passes_over_empty_throne() {
        let board = board_with(&[(5, 2, Occupant::DEFENDER)]);
        assert!(validate(&board, c(5, 2), c(5, 8), Side::Defender).is_ok());
    }

    #[test]
    fn test_king_may_land_on_throne() {
        let board = board_with(&[(5, 8, Occupant::KING)]);
        assert!(validate(&board, c(5, 8), THRONE, Side::Defender).is_ok());
    }

    #[test]
    fn test_between_excludes_endpoints() {
        let squares: Vec<_> = between(c(3, 1), c(3, 4)).collect();
        assert_eq!(squares, vec![c(3, 2), c(3, 3)]);
        let squares: Vec<_> = between(c(6, 0), c(4, 0)).collect();
        assert_eq!(squares, vec![c(5, 0)]);
        assert_eq!(between(c(0, 0), c(0, 1)).count(), 0);
        assert_eq!(between(c(0, 0), c(2, 2)).count(), 0);
    }

    #[test]
    fn test_destinations_skip_restricted_for_pawns() {
        let board = board_with(&[(5, 4, Occupant::DEFENDER), (5, 7, Occupant::ATTACKER)]);
        let targets = destinations(&board, c(5, 4));
        assert!(!targets.contains(&THRONE));
        assert!(targets.contains(&c(5, 6)));
        assert!(!targets.contains(&c(5, 7)));
        assert!(targets.contains(&c(5, 0)));
        assert_eq!(targets.len(), 4 + 1 + 5 + 5);
    }

    #[test]
    fn test_king_destinations_include_corner() {
        let board = board_with(&[(0, 4, Occupant::KING)]);
        let targets = destinations(&board, c(0, 4));
        assert!(targets.contains(&c(0, 0)));
        assert!(targets.contains(&c(0, 10)));
    }

    #[test]
    fn test_generated_moves_all_validate() {
        let board = Board::standard();
        let mut moves = Vec::with_capacity(MAX_MOVES);
        for side in [Side::Attacker, Side::Defender] {
            generate_moves(&board, side, &mut moves);
            assert!(!moves.is_empty());
            for m in &moves {
                assert_eq!(validate(&board, m.from, m.to, side), Ok(*m));
            }
        }
    }

    #[test]
    fn test_king_cannot_move_at_start() {
        let board = Board::standard();
        assert!(destinations(&board, THRONE).is_empty());
    }
}
