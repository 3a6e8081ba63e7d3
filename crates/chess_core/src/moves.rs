use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{piece::PieceType, Board, Piece, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Normal,
    DoublePawnPush,
    EnPassant,
    Castle,
}

/// One ply. Equality and hashing only look at the identity key (origin,
/// destination, promotion choice), so a move rebuilt from two clicked
/// squares compares equal to the generator's fully described move.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece_moved: Piece,
    pub piece_captured: Option<Piece>,
    pub move_type: MoveType,
    pub promotion: Option<PieceType>,
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Move {
    pub(crate) fn new(from: Position, to: Position, piece_moved: Piece, piece_captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece_moved,
            piece_captured,
            move_type: MoveType::Normal,
            promotion: None,
        }
    }

    pub(crate) fn with_type(mut self, move_type: MoveType) -> Self {
        self.move_type = move_type;
        self
    }

    pub(crate) fn promoting_to(mut self, piece_type: PieceType) -> Self {
        self.promotion = Some(piece_type);
        self
    }

    /// Builds a candidate from two selected squares, reading the pieces off
    /// `board`. A pawn reaching the last rank promotes to a Queen unless the
    /// caller overrides it with [`Move::with_promotion`].
    pub fn from_squares(from: Position, to: Position, board: &Board) -> Option<Self> {
        let piece_moved = board.get(from)?;
        let mut candidate = Self::new(from, to, piece_moved, board.get(to));
        if piece_moved.piece_type == PieceType::Pawn && to.row == piece_moved.color.promotion_row() {
            candidate.promotion = Some(PieceType::Queen);
        }
        Some(candidate)
    }

    pub fn with_promotion(mut self, piece_type: PieceType) -> Self {
        if self.promotion.is_some() {
            self.promotion = Some(piece_type);
        }
        self
    }

    /// Identity key: origin, destination and promotion choice packed together.
    pub fn key(&self) -> u16 {
        let square = |pos: Position| (pos.row as u16) * 8 + pos.col as u16;
        let promotion = match self.promotion {
            None => 0,
            Some(PieceType::Queen) => 1,
            Some(PieceType::Rook) => 2,
            Some(PieceType::Bishop) => 3,
            Some(PieceType::Knight) => 4,
            Some(_) => 5,
        };
        (square(self.from) << 9) | (square(self.to) << 3) | promotion
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.move_type == MoveType::Castle
    }

    pub fn is_en_passant(&self) -> bool {
        self.move_type == MoveType::EnPassant
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.move_type == MoveType::DoublePawnPush
    }

    /// Square of the piece this move removes, which differs from `to` for en passant.
    pub fn capture_square(&self) -> Position {
        if self.is_en_passant() {
            Position { row: self.from.row, col: self.to.col }
        } else {
            self.to
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_castle() {
            return f.write_str(if self.to.col > self.from.col { "O-O" } else { "O-O-O" });
        }

        if self.piece_moved.piece_type == PieceType::Pawn {
            if self.is_capture() {
                write!(f, "{}x", self.from.file_char())?;
            }
        } else {
            write!(f, "{}", self.piece_moved.piece_type.letter())?;
            if self.is_capture() {
                f.write_str("x")?;
            }
        }

        write!(f, "{}", self.to)?;

        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    #[test]
    fn equality_ignores_how_the_move_was_built() {
        let board = Board::new();
        let clicked = Move::from_squares(sq("e2"), sq("e4"), &board).unwrap();
        let generated = Move::new(sq("e2"), sq("e4"), Piece::new(PieceType::Pawn, Color::White), None)
            .with_type(MoveType::DoublePawnPush);
        assert_eq!(clicked, generated);
        assert_eq!(clicked.key(), generated.key());
    }

    #[test]
    fn promotion_choice_is_part_of_identity() {
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        let queen = Move::new(sq("a7"), sq("a8"), pawn, None).promoting_to(PieceType::Queen);
        let knight = Move::new(sq("a7"), sq("a8"), pawn, None).promoting_to(PieceType::Knight);
        assert_ne!(queen, knight);
        assert_eq!(queen.with_promotion(PieceType::Knight), knight);
    }

    #[test]
    fn empty_origin_gives_no_candidate() {
        assert!(Move::from_squares(sq("e4"), sq("e5"), &Board::new()).is_none());
    }

    #[test]
    fn notation() {
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        let knight = Piece::new(PieceType::Knight, Color::Black);
        let rook = Piece::new(PieceType::Rook, Color::Black);
        let king = Piece::new(PieceType::King, Color::White);

        assert_eq!(Move::new(sq("e2"), sq("e4"), pawn, None).to_string(), "e4");
        assert_eq!(Move::new(sq("e4"), sq("d5"), pawn, Some(knight)).to_string(), "exd5");
        assert_eq!(Move::new(sq("g8"), sq("f6"), knight, None).to_string(), "Nf6");
        assert_eq!(Move::new(sq("a8"), sq("a2"), rook, Some(pawn)).to_string(), "Rxa2");
        assert_eq!(
            Move::new(sq("b7"), sq("a8"), pawn, Some(rook)).promoting_to(PieceType::Queen).to_string(),
            "bxa8=Q"
        );
        assert_eq!(Move::new(sq("e1"), sq("g1"), king, None).with_type(MoveType::Castle).to_string(), "O-O");
        assert_eq!(Move::new(sq("e1"), sq("c1"), king, None).with_type(MoveType::Castle).to_string(), "O-O-O");
    }
}
