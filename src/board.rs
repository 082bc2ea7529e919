//! Board storage and square geometry.
//! Coordinates are (row, col); row 0 is the northern edge, col 0 the western edge.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::piece::{Occupant, Side};

pub const BOARD_SIZE: usize = 11;

pub const THRONE: Coordinate = Coordinate::new(5, 5);

pub const CORNERS: [Coordinate; 4] = [
    Coordinate::new(0, 0),
    Coordinate::new(0, BOARD_SIZE - 1),
    Coordinate::new(BOARD_SIZE - 1, 0),
    Coordinate::new(BOARD_SIZE - 1, BOARD_SIZE - 1),
];

/// Pawn counts of the standard starting position (the king is not counted).
pub const STARTING_ATTACKERS: u8 = 24;
pub const STARTING_DEFENDERS: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    #[inline]
    pub const fn is_throne(self) -> bool {
        self.row == THRONE.row && self.col == THRONE.col
    }

    #[inline]
    pub const fn is_corner(self) -> bool {
        (self.row == 0 || self.row == BOARD_SIZE - 1) && (self.col == 0 || self.col == BOARD_SIZE - 1)
    }

    /// Squares only the king may land on.
    #[inline]
    pub const fn is_restricted(self) -> bool {
        self.is_throne() || self.is_corner()
    }

    /// The neighbouring square in `dir`, or `None` past the edge.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Coordinate> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Coordinate::new(row, col);
        next.in_bounds().then_some(next)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four orthogonal directions, in capture-check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::West, Direction::East, Direction::North, Direction::South];

    /// (row delta, col delta)
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("square {0} is off the board")]
pub struct OutOfBounds(pub Coordinate);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected 11 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {len} squares, expected 11")]
    RowLength { row: usize, len: usize },
    #[error("unknown symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

/// 11x11 grid of optional occupants. Pure storage: no rule is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    squares: [[Option<Occupant>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self { squares: [[None; BOARD_SIZE]; BOARD_SIZE] }
    }

    /// Starting position: attacker clusters on the four edges,
    /// defenders in a cross around the king on the throne.
    pub fn standard() -> Self {
        let mut board = Self::empty();

        let last = BOARD_SIZE - 1;
        for i in 3..8 {
            board[Coordinate::new(i, 0)] = Some(Occupant::ATTACKER);
            board[Coordinate::new(0, i)] = Some(Occupant::ATTACKER);
            board[Coordinate::new(i, last)] = Some(Occupant::ATTACKER);
            board[Coordinate::new(last, i)] = Some(Occupant::ATTACKER);
        }
        board[Coordinate::new(5, 1)] = Some(Occupant::ATTACKER);
        board[Coordinate::new(1, 5)] = Some(Occupant::ATTACKER);
        board[Coordinate::new(5, last - 1)] = Some(Occupant::ATTACKER);
        board[Coordinate::new(last - 1, 5)] = Some(Occupant::ATTACKER);

        for row in 4..7 {
            for col in 4..7 {
                board[Coordinate::new(row, col)] = Some(Occupant::DEFENDER);
            }
        }
        board[Coordinate::new(5, 3)] = Some(Occupant::DEFENDER);
        board[Coordinate::new(3, 5)] = Some(Occupant::DEFENDER);
        board[Coordinate::new(5, 7)] = Some(Occupant::DEFENDER);
        board[Coordinate::new(7, 5)] = Some(Occupant::DEFENDER);

        board[THRONE] = Some(Occupant::KING);
        board
    }

    pub fn square_at(&self, c: Coordinate) -> Result<Option<Occupant>, OutOfBounds> {
        if !c.in_bounds() {
            return Err(OutOfBounds(c));
        }
        Ok(self[c])
    }

    /// Puts `occupant` on `c`, replacing whatever stood there.
    pub fn place(&mut self, c: Coordinate, occupant: Occupant) -> Result<(), OutOfBounds> {
        if !c.in_bounds() {
            return Err(OutOfBounds(c));
        }
        self[c] = Some(occupant);
        Ok(())
    }

    /// Empties `c` and returns its former occupant.
    pub fn clear(&mut self, c: Coordinate) -> Result<Option<Occupant>, OutOfBounds> {
        if !c.in_bounds() {
            return Err(OutOfBounds(c));
        }
        Ok(self[c].take())
    }

    #[inline]
    pub fn is_empty_at(&self, c: Coordinate) -> bool {
        self[c].is_none()
    }

    /// Iterate over all occupied squares, row by row.
    pub fn occupants(&self) -> impl Iterator<Item = (Coordinate, Occupant)> + '_ {
        self.squares.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, square)| square.map(|occupant| (Coordinate::new(r, c), occupant)))
        })
    }

    /// Number of pawns of `side` on the board.
    pub fn pawn_count(&self, side: Side) -> u8 {
        self.occupants()
            .filter(|(_, o)| !o.is_king() && o.belongs_to(side))
            .count() as u8
    }

    pub fn kings(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.occupants().filter(|(_, o)| o.is_king()).map(|(c, _)| c)
    }
}

impl Index<Coordinate> for Board {
    type Output = Option<Occupant>;

    #[inline]
    fn index(&self, c: Coordinate) -> &Self::Output {
        &self.squares[c.row][c.col]
    }
}

impl IndexMut<Coordinate> for Board {
    #[inline]
    fn index_mut(&mut self, c: Coordinate) -> &mut Self::Output {
        &mut self.squares[c.row][c.col]
    }
}

/// ASCII art with row and column indices.
/// Empty throne and corners are drawn as '#'.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.squares.iter().enumerate() {
            write!(f, "{:>2}", r)?;
            for (c, square) in row.iter().enumerate() {
                let symbol = match square {
                    Some(occupant) => occupant.symbol(),
                    None if Coordinate::new(r, c).is_restricted() => '#',
                    None => '.',
                };
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for c in 0..BOARD_SIZE {
            write!(f, " {}", c % 10)?;
        }
        writeln!(f)
    }
}

/// Parses 11 non-blank lines of 11 symbols each ('A', 'D', 'K', '.', '#').
/// Whitespace inside a line is ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(ParseBoardError::RowLength { row, len: symbols.len() });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                board.squares[row][col] = match symbol {
                    '.' | '#' => None,
                    _ => Some(
                        Occupant::from_symbol(symbol)
                            .ok_or(ParseBoardError::UnknownSymbol { row, col, symbol })?,
                    ),
                };
            }
        }
        Ok(board)
    }
}
