use log::debug;

use crate::{
    board::CastlingRights,
    piece::Color,
    position::Direction,
    Board, Move, Position,
};

/// A friendly piece that may only move along `direction` (or its reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Position,
    pub direction: Direction,
}

/// An enemy piece giving check, and the step from the king toward it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub square: Position,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Checkmate,
    Stalemate,
}

/// What `undo_move` needs beyond the move itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Position>,
}

/// The full game: board plus everything needed to generate, apply and undo
/// legal moves.
///
/// `in_check`, `pins`, `checks` and `status` are caches filled by
/// [`GameState::legal_moves`] and cleared by every make/undo.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) king_locations: [Position; 2],
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Position>,
    pub(crate) history: Vec<MoveRecord>,
    pub(crate) in_check: bool,
    pub(crate) pins: Vec<Pin>,
    pub(crate) checks: Vec<Check>,
    pub(crate) status: GameStatus,
}

impl GameState {
    pub fn new() -> Self {
        Self::from_parts(
            Board::new(),
            Color::White,
            [Position { row: 7, col: 4 }, Position { row: 0, col: 4 }],
            CastlingRights::default(),
            None,
        )
    }

    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        king_locations: [Position; 2],
        castling_rights: CastlingRights,
        en_passant: Option<Position>,
    ) -> Self {
        Self {
            board,
            side_to_move,
            king_locations,
            castling_rights,
            en_passant,
            history: Vec::new(),
            in_check: false,
            pins: Vec::new(),
            checks: Vec::new(),
            status: GameStatus::Ongoing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn king_location(&self, color: Color) -> Position {
        self.king_locations[color.index()]
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    /// Played moves in algebraic-style notation, oldest first.
    pub fn move_log(&self) -> Vec<String> {
        self.history.iter().map(|record| record.mv.to_string()).collect()
    }

    pub fn in_check(&self) -> bool {
        self.in_check
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_checkmate(&self) -> bool {
        self.status == GameStatus::Checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.status == GameStatus::Stalemate
    }

    /// Applies `candidate` if it matches a legal move, returning the move
    /// that was actually played. Anything else is dropped as "no move".
    pub fn submit_move(&mut self, candidate: Move) -> Option<Move> {
        let legal = self.legal_moves();
        match legal.into_iter().find(|mv| *mv == candidate) {
            Some(mv) => {
                self.make_move(mv);
                Some(mv)
            }
            None => {
                debug!("rejected illegal move {} -> {}", candidate.from, candidate.to);
                None
            }
        }
    }

    pub(crate) fn clear_caches(&mut self) {
        self.in_check = false;
        self.pins.clear();
        self.checks.clear();
        self.status = GameStatus::Ongoing;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    #[test]
    fn starts_with_white_to_move_and_cached_kings() {
        let state = GameState::new();
        assert_eq!(state.side_to_move(), Color::White);
        assert_eq!(state.king_location(Color::White), sq("e1"));
        assert_eq!(state.king_location(Color::Black), sq("e8"));
        assert_eq!(state.status(), GameStatus::Ongoing);
        assert!(state.history().is_empty());
    }

    #[test]
    fn submit_move_accepts_legal_and_drops_illegal() {
        let mut state = GameState::new();
        let illegal = Move::from_squares(sq("e2"), sq("e5"), state.board()).unwrap();
        assert_eq!(state.submit_move(illegal), None);
        assert!(state.history().is_empty());

        let legal = Move::from_squares(sq("e2"), sq("e4"), state.board()).unwrap();
        let played = state.submit_move(legal).unwrap();
        assert!(played.is_double_pawn_push());
        assert_eq!(state.move_log(), vec!["e4".to_string()]);
        assert_eq!(state.side_to_move(), Color::Black);
    }
}
