//! Zobrist keys for positions (board + side to move).

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{BOARD_SIZE, Board, Coordinate};
use crate::piece::{Occupant, Side};

/// Fixed seed so keys are stable between runs.
const ZOBRIST_SEED: u64 = 0x7AF1_11A7_0000_0011;

pub static ZOBRIST: Lazy<Zobrist> = Lazy::new(|| Zobrist::new(ZOBRIST_SEED));

#[derive(Clone)]
pub struct Zobrist {
    pub table: [[[u64; Occupant::NUM]; BOARD_SIZE]; BOARD_SIZE],
    pub attacker_to_move: u64,
}

impl Zobrist {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut table = [[[0u64; Occupant::NUM]; BOARD_SIZE]; BOARD_SIZE];
        for row in table.iter_mut() {
            for square in row.iter_mut() {
                for key in square.iter_mut() {
                    *key = rng.random::<u64>();
                }
            }
        }

        Self {
            table,
            attacker_to_move: rng.random::<u64>(),
        }
    }

    #[inline]
    pub fn piece(&self, c: Coordinate, occupant: Occupant) -> u64 {
        self.table[c.row][c.col][occupant.index()]
    }

    #[inline]
    pub fn side(&self, side: Side) -> u64 {
        match side {
            Side::Attacker => self.attacker_to_move,
            Side::Defender => 0,
        }
    }

    /// Key of a full position, computed from scratch.
    pub fn position(&self, board: &Board, side_to_move: Side) -> u64 {
        board
            .occupants()
            .fold(self.side(side_to_move), |hash, (c, occupant)| hash ^ self.piece(c, occupant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_table() {
        let a = Zobrist::new(7);
        let b = Zobrist::new(7);
        assert_eq!(a.table, b.table);
        assert_eq!(a.attacker_to_move, b.attacker_to_move);
        assert_ne!(Zobrist::new(8).attacker_to_move, a.attacker_to_move);
    }

    #[test]
    fn test_side_to_move_changes_key() {
        let board = Board::standard();
        assert_ne!(ZOBRIST.position(&board, Side::Attacker), ZOBRIST.position(&board, Side::Defender));
    }

    #[test]
    fn test_moving_a_piece_changes_key() {
        let mut board = Board::standard();
        let before = ZOBRIST.position(&board, Side::Attacker);
        let pawn = board.clear(Coordinate::new(0, 3)).unwrap().unwrap();
        board.place(Coordinate::new(2, 3), pawn).unwrap();
        let after = ZOBRIST.position(&board, Side::Attacker);
        assert_ne!(before, after);
        assert_eq!(
            before ^ ZOBRIST.piece(Coordinate::new(0, 3), pawn) ^ ZOBRIST.piece(Coordinate::new(2, 3), pawn),
            after
        );
    }
}
