//! Rules engine for 11x11 Hnefatafl.
//!
//! ```
//! use hnefatafl::{Coordinate, GameState, Outcome};
//!
//! let mut game = GameState::new();
//! let report = game.attempt_move(Coordinate::new(0, 3), Coordinate::new(2, 3)).unwrap();
//! assert_eq!(report.outcome, Outcome::InProgress);
//! ```

pub mod board;
pub mod capture;
pub mod game;
pub mod moves;
pub mod piece;
pub mod zobrist;

pub use board::{Board, Coordinate, OutOfBounds, ParseBoardError};
pub use capture::Captures;
pub use game::{GameState, MoveReport, Outcome, SetupError};
pub use moves::{IllegalMove, Move};
pub use piece::{Occupant, PieceKind, Side};
