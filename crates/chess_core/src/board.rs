use std::fmt;

use crate::{piece::{Color, PieceType}, Piece, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
}

impl CastlingRights {
    pub fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    pub(crate) fn clear_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }

    pub(crate) fn clear_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }

    pub(crate) fn clear(&mut self, color: Color) {
        self.clear_kingside(color);
        self.clear_queenside(color);
    }

    /// Drops the right tied to a rook corner when something leaves or lands on it.
    pub(crate) fn clear_corner(&mut self, pos: Position) {
        for color in [Color::White, Color::Black] {
            if pos.row != color.back_row() {
                continue;
            }
            match pos.col {
                0 => self.clear_queenside(color),
                7 => self.clear_kingside(color),
                _ => {}
            }
        }
    }
}

/// The 8x8 grid. Mutation is crate-private: only move application and
/// position setup write to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self { squares: [[None; 8]; 8] }
    }

    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    fn setup_initial_position(&mut self) {
        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (col, &piece_type) in piece_order.iter().enumerate() {
            self.squares[0][col] = Some(Piece::new(piece_type, Color::Black));
            self.squares[1][col] = Some(Piece::new(PieceType::Pawn, Color::Black));
            self.squares[6][col] = Some(Piece::new(PieceType::Pawn, Color::White));
            self.squares[7][col] = Some(Piece::new(piece_type, Color::White));
        }
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.row as usize][pos.col as usize] = piece;
    }

    pub(crate) fn take(&mut self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize].take()
    }

    /// Read-only grid access for display code, indexed `[row][col]`.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn find_kings(&self, color: Color) -> Vec<Position> {
        self.pieces()
            .filter(|(_, piece)| piece.is(PieceType::King, color))
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for cell in cells {
                write!(f, " {}", cell.map_or('.', |piece| piece.to_char()))?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_layout() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.get(Position::new(7, 4).unwrap()), Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(board.get(Position::new(0, 3).unwrap()), Some(Piece::new(PieceType::Queen, Color::Black)));
        assert_eq!(board.find_kings(Color::Black), vec![Position::new(0, 4).unwrap()]);
    }

    #[test]
    fn clearing_a_corner_only_touches_that_wing() {
        let mut rights = CastlingRights::default();
        rights.clear_corner(Position::new(7, 7).unwrap());
        assert!(!rights.white_kingside);
        assert!(rights.white_queenside && rights.black_kingside && rights.black_queenside);

        rights.clear_corner(Position::new(0, 0).unwrap());
        assert!(!rights.black_queenside);
        assert!(rights.black_kingside);

        rights.clear_corner(Position::new(4, 0).unwrap());
        assert!(rights.white_queenside);
    }

    #[test]
    fn display_draws_rank_eight_first() {
        let text = Board::new().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r n b q k b n r");
        assert!(text.ends_with("a b c d e f g h"));
    }
}
