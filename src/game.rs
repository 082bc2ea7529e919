//! Game state and turn logic.
//! `GameState::attempt_move` is the single entry point: validate, apply, capture,
//! check for a winner, pass the turn.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Coordinate, STARTING_ATTACKERS, STARTING_DEFENDERS, THRONE};
use crate::capture::resolve_captures;
use crate::moves::{self, IllegalMove, Move};
use crate::piece::{Occupant, Side};
use crate::zobrist::ZOBRIST;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    /// The king reached a corner, or every attacker was captured.
    DefenderEscaped,
    /// The king was surrounded.
    AttackerWins,
    /// Every defender pawn was captured.
    DefenderEliminated,
}

impl Outcome {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::InProgress => None,
            Outcome::DefenderEscaped => Some(Side::Defender),
            Outcome::AttackerWins | Outcome::DefenderEliminated => Some(Side::Attacker),
        }
    }
}

/// What an accepted move did, for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub mv: Move,
    pub side: Side,
    /// Pawns removed from the board.
    pub captured: Vec<Coordinate>,
    pub king_captured: bool,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a position needs exactly one king, found {0}")]
    KingCount(usize),
    #[error("the king already stands on corner {0}")]
    KingOnCorner(Coordinate),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    side_to_move: Side,
    attacker_count: u8,
    /// Defender pawns; the king is not counted.
    defender_count: u8,
    outcome: Outcome,
    // Track king to avoid scanning the board in the win check.
    king: Coordinate,
    hash: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, attackers to move.
    pub fn new() -> Self {
        let board = Board::standard();
        let hash = ZOBRIST.position(&board, Side::Attacker);
        Self {
            board,
            side_to_move: Side::Attacker,
            attacker_count: STARTING_ATTACKERS,
            defender_count: STARTING_DEFENDERS,
            outcome: Outcome::InProgress,
            king: THRONE,
            hash,
        }
    }

    /// Start from an arbitrary board. Piece counts are taken from the board.
    pub fn from_position(board: Board, side_to_move: Side) -> Result<Self, SetupError> {
        let kings: Vec<Coordinate> = board.kings().collect();
        let &[king] = kings.as_slice() else {
            return Err(SetupError::KingCount(kings.len()));
        };
        if king.is_corner() {
            return Err(SetupError::KingOnCorner(king));
        }

        let hash = ZOBRIST.position(&board, side_to_move);
        Ok(Self {
            attacker_count: board.pawn_count(Side::Attacker),
            defender_count: board.pawn_count(Side::Defender),
            board,
            side_to_move,
            outcome: Outcome::InProgress,
            king,
            hash,
        })
    }

    /// Throw the current game away and set up a new one.
    pub fn restart(&mut self) {
        *self = Self::new();
        info!("game restarted");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn attacker_count(&self) -> u8 {
        self.attacker_count
    }

    pub fn defender_count(&self) -> u8 {
        self.defender_count
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn king(&self) -> Coordinate {
        self.king
    }

    /// Zobrist key of the board and side to move, kept up to date move by move.
    pub fn position_key(&self) -> u64 {
        self.hash
    }

    /// Fill `moves` with the legal moves of the side to move (none once the game is over).
    pub fn legal_moves(&self, moves: &mut Vec<Move>) {
        moves.clear();
        if !self.outcome.is_over() {
            moves::generate_moves(&self.board, self.side_to_move, moves);
        }
    }

    /// Squares the piece on `from` may move to this turn.
    pub fn legal_destinations(&self, from: Coordinate) -> Vec<Coordinate> {
        match self.board.square_at(from) {
            Ok(Some(piece)) if !self.outcome.is_over() && piece.belongs_to(self.side_to_move) => {
                moves::destinations(&self.board, from)
            }
            _ => Vec::new(),
        }
    }

    /// Try to play `from` -> `to` for the side to move.
    /// On error nothing changes; on success the move is fully resolved.
    pub fn attempt_move(&mut self, from: Coordinate, to: Coordinate) -> Result<MoveReport, IllegalMove> {
        if self.outcome.is_over() {
            debug!("rejected {} -> {}: game is over ({:?})", from, to, self.outcome);
            return Err(IllegalMove::GameAlreadyOver);
        }

        let mv = moves::validate(&self.board, from, to, self.side_to_move).inspect_err(|err| {
            debug!("rejected {} -> {} for {}: {}", from, to, self.side_to_move, err);
        })?;
        let Some(piece) = self.board[mv.from] else {
            return Err(IllegalMove::EmptySource(mv.from));
        };

        Ok(self.apply(mv, piece))
    }

    /// Move the piece, resolve captures and the outcome, pass the turn.
    /// The logic assumes the move to be legal.
    fn apply(&mut self, mv: Move, piece: Occupant) -> MoveReport {
        let mover = self.side_to_move;

        self.board[mv.from] = None;
        self.board[mv.to] = Some(piece);
        self.hash ^= ZOBRIST.piece(mv.from, piece) ^ ZOBRIST.piece(mv.to, piece);
        if piece.is_king() {
            self.king = mv.to;
        }

        let captures = resolve_captures(&mut self.board, mv.to, mover);
        let opponent = mover.opponent();
        for &victim in &captures.pawns {
            self.hash ^= ZOBRIST.piece(victim, Occupant::pawn(opponent));
        }
        let removed = captures.pawns.len() as u8;
        match opponent {
            Side::Attacker => self.attacker_count -= removed,
            Side::Defender => self.defender_count -= removed,
        }

        self.outcome = self.evaluate(captures.king.is_some());
        if self.outcome.is_over() {
            info!("game over after {} by {}: {:?}", mv, mover, self.outcome);
        } else {
            self.hash ^= ZOBRIST.side(mover) ^ ZOBRIST.side(opponent);
            self.side_to_move = opponent;
        }

        debug!("{} played {}, captured {:?}", mover, mv, captures.pawns);

        MoveReport {
            mv,
            side: mover,
            captured: captures.pawns,
            king_captured: captures.king.is_some(),
            outcome: self.outcome,
        }
    }

    /// Win conditions, first match wins.
    fn evaluate(&self, king_captured: bool) -> Outcome {
        if self.king.is_corner() {
            Outcome::DefenderEscaped
        } else if king_captured {
            Outcome::AttackerWins
        } else if self.defender_count == 0 {
            Outcome::DefenderEliminated
        } else if self.attacker_count == 0 {
            Outcome::DefenderEscaped
        } else {
            Outcome::InProgress
        }
    }
}
