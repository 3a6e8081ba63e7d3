use std::fmt;

use crate::error::ChessError;

/// A board square. Row 0 is Black's back rank (rank 8), row 7 is White's
/// (rank 1); column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u8, // 0-7
    pub col: u8, // 0-7
}

impl Position {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// The square `steps` times `direction` away, if it is still on the board.
    pub fn offset(self, direction: Direction, steps: i8) -> Option<Self> {
        let row = self.row as i8 + direction.row * steps;
        let col = self.col as i8 + direction.col * steps;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub fn from_algebraic(notation: &str) -> Result<Self, ChessError> {
        let mut chars = notation.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ChessError::InvalidSquare(notation.to_string()));
        };

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidSquare(notation.to_string()));
        }

        Ok(Self {
            row: b'8' - rank as u8,
            col: file as u8 - b'a',
        })
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }

    pub fn all() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|row| (0..8).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// A unit step on the board, used both for rays and for knight jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub row: i8,
    pub col: i8,
}

impl Direction {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn reversed(self) -> Self {
        Self { row: -self.row, col: -self.col }
    }

    pub fn is_orthogonal(self) -> bool {
        self.row == 0 || self.col == 0
    }

    pub fn is_diagonal(self) -> bool {
        self.row != 0 && self.col != 0 && self.row.abs() == self.col.abs()
    }

    /// True when a move along `self` stays on the line described by `pin`.
    pub fn is_along(self, pin: Direction) -> bool {
        self == pin || self == pin.reversed()
    }

    /// The unit step from `from` toward `to`, if they share a rank, file or diagonal.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let dr = to.row as i8 - from.row as i8;
        let dc = to.col as i8 - from.col as i8;
        if (dr, dc) == (0, 0) {
            return None;
        }
        if dr == 0 || dc == 0 || dr.abs() == dc.abs() {
            Some(Self { row: dr.signum(), col: dc.signum() })
        } else {
            None
        }
    }
}

pub const ORTHOGONALS: [Direction; 4] = [
    Direction::new(-1, 0),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
];

pub const DIAGONALS: [Direction; 4] = [
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::new(-1, 0),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

pub const KNIGHT_JUMPS: [Direction; 8] = [
    Direction::new(-2, -1),
    Direction::new(-2, 1),
    Direction::new(-1, -2),
    Direction::new(-1, 2),
    Direction::new(1, -2),
    Direction::new(1, 2),
    Direction::new(2, -1),
    Direction::new(2, 1),
];
