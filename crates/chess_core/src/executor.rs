use crate::{
    game_state::MoveRecord,
    moves::MoveType,
    piece::PieceType,
    GameState, Move, Piece, Position,
};

/// Origin and destination of the rook that accompanies a castling king.
fn castle_rook_squares(king_move: &Move) -> (Position, Position) {
    let row = king_move.from.row;
    if king_move.to.col > king_move.from.col {
        (Position { row, col: 7 }, Position { row, col: king_move.to.col - 1 })
    } else {
        (Position { row, col: 0 }, Position { row, col: king_move.to.col + 1 })
    }
}

impl GameState {
    /// Plays `mv`, which must come from [`GameState::legal_moves`] for the
    /// current position.
    pub fn make_move(&mut self, mv: Move) {
        let color = mv.piece_moved.color;
        self.history.push(MoveRecord {
            mv,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
        });

        self.board.set(mv.from, None);
        let placed = match mv.promotion {
            Some(piece_type) => Piece::new(piece_type, color),
            None => mv.piece_moved,
        };
        self.board.set(mv.to, Some(placed));

        if mv.piece_moved.piece_type == PieceType::King {
            self.king_locations[color.index()] = mv.to;
        }

        match mv.move_type {
            MoveType::EnPassant => self.board.set(mv.capture_square(), None),
            MoveType::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(&mv);
                let rook = self.board.take(rook_from);
                self.board.set(rook_to, rook);
            }
            MoveType::Normal | MoveType::DoublePawnPush => {}
        }

        self.en_passant = None;
        if mv.is_double_pawn_push() && self.enemy_pawn_beside(mv.to) {
            let middle = Position { row: (mv.from.row + mv.to.row) / 2, col: mv.from.col };
            self.en_passant = Some(middle);
        }

        match mv.piece_moved.piece_type {
            PieceType::King => self.castling_rights.clear(color),
            PieceType::Rook => self.castling_rights.clear_corner(mv.from),
            _ => {}
        }
        if mv.piece_captured.is_some_and(|piece| piece.piece_type == PieceType::Rook) {
            self.castling_rights.clear_corner(mv.to);
        }

        self.side_to_move = color.opposite();
        self.clear_caches();
    }

    /// Takes back the last move. Returns `None` when there is nothing to undo.
    pub fn undo_move(&mut self) -> Option<Move> {
        let record = self.history.pop()?;
        let mv = record.mv;
        let color = mv.piece_moved.color;

        self.board.set(mv.from, Some(mv.piece_moved));
        if mv.is_en_passant() {
            self.board.set(mv.to, None);
            self.board.set(mv.capture_square(), mv.piece_captured);
        } else {
            self.board.set(mv.to, mv.piece_captured);
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(&mv);
            let rook = self.board.take(rook_to);
            self.board.set(rook_from, rook);
        }

        if mv.piece_moved.piece_type == PieceType::King {
            self.king_locations[color.index()] = mv.from;
        }

        self.castling_rights = record.castling_rights;
        self.en_passant = record.en_passant;
        self.side_to_move = color;
        self.clear_caches();
        Some(mv)
    }

    /// Whether a double-pushed pawn on `pos` can be taken en passant next ply.
    fn enemy_pawn_beside(&self, pos: Position) -> bool {
        let Some(pusher) = self.board.get(pos) else {
            return false;
        };
        [-1i8, 1].iter().any(|&side| {
            let col = pos.col as i8 + side;
            (0..8).contains(&col)
                && self
                    .board
                    .get(Position { row: pos.row, col: col as u8 })
                    .is_some_and(|piece| piece.is(PieceType::Pawn, pusher.color.opposite()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    fn find(state: &mut GameState, from: &str, to: &str) -> Move {
        let (from, to) = (sq(from), sq(to));
        state
            .legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to)
            .expect("move should be legal")
    }

    #[test]
    fn kingside_castle_moves_the_rook_and_drops_rights() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castle = find(&mut state, "e1", "g1");
        assert!(castle.is_castle());
        state.make_move(castle);

        assert_eq!(state.board().get(sq("g1")), Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(state.board().get(sq("f1")), Some(Piece::new(PieceType::Rook, Color::White)));
        assert!(state.board().is_empty(sq("h1")));
        assert_eq!(state.king_location(Color::White), sq("g1"));
        assert!(!state.castling_rights().white_kingside);
        assert!(!state.castling_rights().white_queenside);
        assert!(state.castling_rights().black_kingside);

        state.undo_move();
        assert_eq!(state.board().get(sq("h1")), Some(Piece::new(PieceType::Rook, Color::White)));
        assert_eq!(state.king_location(Color::White), sq("e1"));
        assert!(state.castling_rights().white_kingside);
    }

    #[test]
    fn queenside_castle_rook_lands_on_d_file() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let castle = find(&mut state, "e8", "c8");
        state.make_move(castle);
        assert_eq!(state.board().get(sq("d8")), Some(Piece::new(PieceType::Rook, Color::Black)));
        assert!(state.board().is_empty(sq("a8")));
        assert_eq!(state.move_log(), vec!["O-O-O".to_string()]);
    }

    #[test]
    fn capturing_a_home_rook_clears_that_wing() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let capture = find(&mut state, "a1", "a8");
        state.make_move(capture);
        let rights = state.castling_rights();
        assert!(!rights.white_queenside, "moving rook leaves its corner");
        assert!(!rights.black_queenside, "captured rook never moved");
        assert!(rights.white_kingside && rights.black_kingside);
    }

    #[test]
    fn en_passant_target_only_when_capturable() {
        let mut state = GameState::new();
        let push = find(&mut state, "e2", "e4");
        state.make_move(push);
        assert_eq!(state.en_passant_target(), None);

        let mut state = GameState::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
        let push = find(&mut state, "e2", "e4");
        state.make_move(push);
        assert_eq!(state.en_passant_target(), Some(sq("e3")));

        let reply = find(&mut state, "e8", "d8");
        state.make_move(reply);
        assert_eq!(state.en_passant_target(), None);
    }

    #[test]
    fn en_passant_capture_and_undo_restore_the_victim() {
        let mut state = GameState::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
        let push = find(&mut state, "e2", "e4");
        state.make_move(push);
        let before = state.board().clone();

        let ep = find(&mut state, "d4", "e3");
        assert!(ep.is_en_passant());
        state.make_move(ep);
        assert!(state.board().is_empty(sq("e4")));
        assert_eq!(state.board().get(sq("e3")), Some(Piece::new(PieceType::Pawn, Color::Black)));

        state.undo_move();
        assert_eq!(state.board(), &before);
        assert_eq!(state.en_passant_target(), Some(sq("e3")));
    }

    #[test]
    fn promotion_and_undo_restore_the_pawn() {
        let mut state = GameState::from_fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let promote = state
            .legal_moves()
            .into_iter()
            .find(|mv| mv.to == sq("b8") && mv.promotion == Some(PieceType::Knight))
            .unwrap();
        state.make_move(promote);
        assert_eq!(state.board().get(sq("b8")), Some(Piece::new(PieceType::Knight, Color::White)));
        assert_eq!(state.move_log(), vec!["axb8=N".to_string()]);

        state.undo_move();
        assert_eq!(state.board().get(sq("a7")), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert_eq!(state.board().get(sq("b8")), Some(Piece::new(PieceType::Rook, Color::Black)));
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut state = GameState::new();
        assert_eq!(state.undo_move(), None);
        assert_eq!(state.board(), &crate::Board::new());
        assert_eq!(state.side_to_move(), Color::White);
    }
}
