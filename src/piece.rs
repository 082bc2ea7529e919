//! Sides and pieces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two sides of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 24 pawns, moves first.
    Attacker,
    /// 12 pawns and the king.
    Defender,
}

impl Side {
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opponent()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attacker => write!(f, "Attacker"),
            Side::Defender => write!(f, "Defender"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    King,
}

/// A piece standing on a square.
/// Only three occupants exist; the king is always a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Occupant {
    kind: PieceKind,
    side: Side,
}

impl Occupant {
    pub const ATTACKER: Occupant = Occupant { kind: PieceKind::Pawn, side: Side::Attacker };
    pub const DEFENDER: Occupant = Occupant { kind: PieceKind::Pawn, side: Side::Defender };
    pub const KING: Occupant = Occupant { kind: PieceKind::King, side: Side::Defender };

    /// Number of distinct occupants (used to size lookup tables).
    pub const NUM: usize = 3;

    /// A pawn of the given side.
    #[inline]
    pub const fn pawn(side: Side) -> Occupant {
        Occupant { kind: PieceKind::Pawn, side }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn side(self) -> Side {
        self.side
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    #[inline]
    pub fn belongs_to(self, side: Side) -> bool {
        self.side == side
    }

    /// Table index: attacker pawn, defender pawn, king.
    #[inline]
    pub const fn index(self) -> usize {
        match (self.kind, self.side) {
            (PieceKind::Pawn, Side::Attacker) => 0,
            (PieceKind::Pawn, Side::Defender) => 1,
            (PieceKind::King, _) => 2,
        }
    }

    /// Board symbol used by the text format.
    pub const fn symbol(self) -> char {
        match (self.kind, self.side) {
            (PieceKind::Pawn, Side::Attacker) => 'A',
            (PieceKind::Pawn, Side::Defender) => 'D',
            (PieceKind::King, _) => 'K',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Occupant> {
        match symbol {
            'A' => Some(Occupant::ATTACKER),
            'D' => Some(Occupant::DEFENDER),
            'K' => Some(Occupant::KING),
            _ => None,
        }
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PieceKind::King => write!(f, "King"),
            PieceKind::Pawn => write!(f, "{} pawn", self.side),
        }
    }
}
