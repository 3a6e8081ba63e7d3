//! Legal move generation.
//!
//! Moves are generated per piece with pin restrictions applied up front,
//! then filtered against the current check: a single check must be captured
//! or blocked, a double check leaves only king moves.

use crate::{
    game_state::{Check, GameStatus},
    moves::MoveType,
    piece::{Color, PieceType},
    position::{Direction, ALL_DIRECTIONS, DIAGONALS, KNIGHT_JUMPS, ORTHOGONALS},
    GameState, Move, Piece, Position,
};

impl GameState {
    /// Every legal move for the side to move. Refreshes the check/pin caches
    /// and sets the checkmate/stalemate status as a side effect.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let (in_check, pins, checks) = self.check_for_pins_and_checks();
        self.in_check = in_check;
        self.pins = pins;
        self.checks = checks;

        let king = self.king_location(self.side_to_move);
        let mut moves = Vec::with_capacity(48);

        if self.checks.len() > 1 {
            self.king_moves(king, &mut moves);
        } else {
            self.all_moves(&mut moves);
            if let Some(check) = self.checks.first().copied() {
                let valid_squares = self.check_resolving_squares(king, check);
                moves.retain(|mv| {
                    mv.piece_moved.piece_type == PieceType::King
                        || valid_squares.contains(&mv.to)
                        || (mv.is_en_passant() && mv.capture_square() == check.square)
                });
            }
        }

        self.status = match (moves.is_empty(), self.in_check) {
            (false, _) => GameStatus::Ongoing,
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Stalemate,
        };
        moves
    }

    /// Legal moves of the piece on `pos`, for move highlighting.
    pub fn legal_moves_from(&mut self, pos: Position) -> Vec<Move> {
        let mut moves = self.legal_moves();
        moves.retain(|mv| mv.from == pos);
        moves
    }

    fn all_moves(&self, moves: &mut Vec<Move>) {
        for (pos, piece) in self.board.pieces() {
            if piece.color == self.side_to_move {
                self.piece_moves(pos, piece, moves);
            }
        }
    }

    fn piece_moves(&self, pos: Position, piece: Piece, moves: &mut Vec<Move>) {
        match piece.piece_type {
            PieceType::Pawn => self.pawn_moves(pos, piece, moves),
            PieceType::Knight => self.knight_moves(pos, piece, moves),
            PieceType::Bishop => self.sliding_moves(pos, piece, &DIAGONALS, moves),
            PieceType::Rook => self.sliding_moves(pos, piece, &ORTHOGONALS, moves),
            PieceType::Queen => self.sliding_moves(pos, piece, &ALL_DIRECTIONS, moves),
            PieceType::King => self.king_moves(pos, moves),
        }
    }

    fn pin_direction(&self, pos: Position) -> Option<Direction> {
        self.pins.iter().find(|pin| pin.square == pos).map(|pin| pin.direction)
    }

    /// Squares a non-king move may land on to answer `check`: the checker
    /// itself, or for a slider anything between it and the king.
    fn check_resolving_squares(&self, king: Position, check: Check) -> Vec<Position> {
        let is_knight = self
            .board
            .get(check.square)
            .is_some_and(|piece| piece.piece_type == PieceType::Knight);
        if is_knight {
            return vec![check.square];
        }

        let mut squares = Vec::with_capacity(7);
        for distance in 1..8 {
            let Some(pos) = king.offset(check.direction, distance) else {
                break;
            };
            squares.push(pos);
            if pos == check.square {
                break;
            }
        }
        squares
    }

    fn pawn_moves(&self, pos: Position, pawn: Piece, moves: &mut Vec<Move>) {
        let color = pawn.color;
        let pin = self.pin_direction(pos);
        let allowed = |direction: Direction| pin.map_or(true, |pin| direction.is_along(pin));
        let forward = Direction::new(color.pawn_direction(), 0);

        if let Some(one) = pos.offset(forward, 1) {
            if self.board.is_empty(one) && allowed(forward) {
                push_pawn_move(Move::new(pos, one, pawn, None), moves);

                if pos.row == color.pawn_start_row() {
                    if let Some(two) = pos.offset(forward, 2) {
                        if self.board.is_empty(two) {
                            moves.push(Move::new(pos, two, pawn, None).with_type(MoveType::DoublePawnPush));
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let diagonal = Direction::new(color.pawn_direction(), side);
            let Some(target) = pos.offset(diagonal, 1) else {
                continue;
            };
            if !allowed(diagonal) {
                continue;
            }

            match self.board.get(target) {
                Some(victim) if victim.color != color => {
                    push_pawn_move(Move::new(pos, target, pawn, Some(victim)), moves);
                }
                None if self.en_passant == Some(target) => {
                    let captured_square = Position { row: pos.row, col: target.col };
                    let victim = self.board.get(captured_square);
                    let is_enemy_pawn = victim.is_some_and(|v| v.is(PieceType::Pawn, color.opposite()));
                    if is_enemy_pawn && self.en_passant_keeps_king_safe(pos, captured_square) {
                        moves.push(Move::new(pos, target, pawn, victim).with_type(MoveType::EnPassant));
                    }
                }
                _ => {}
            }
        }
    }

    /// En passant removes two pawns from one rank at once, which the pin
    /// scan cannot see. Scan outward from the king along that rank,
    /// skipping both pawns, for an enemy rook or queen.
    fn en_passant_keeps_king_safe(&self, pawn: Position, captured: Position) -> bool {
        let color = self.side_to_move;
        let king = self.king_location(color);
        if king.row != pawn.row {
            return true;
        }

        let toward = Direction::new(0, (pawn.col as i8 - king.col as i8).signum());
        for distance in 1..8 {
            let Some(pos) = king.offset(toward, distance) else {
                break;
            };
            if pos == pawn || pos == captured {
                continue;
            }
            match self.board.get(pos) {
                None => continue,
                Some(piece) => {
                    let attacker = piece.color != color
                        && matches!(piece.piece_type, PieceType::Rook | PieceType::Queen);
                    return !attacker;
                }
            }
        }
        true
    }

    fn knight_moves(&self, pos: Position, knight: Piece, moves: &mut Vec<Move>) {
        // A pinned knight can never stay on its pin ray.
        if self.pin_direction(pos).is_some() {
            return;
        }
        for jump in KNIGHT_JUMPS {
            let Some(target) = pos.offset(jump, 1) else {
                continue;
            };
            match self.board.get(target) {
                Some(other) if other.color == knight.color => {}
                captured => moves.push(Move::new(pos, target, knight, captured)),
            }
        }
    }

    fn sliding_moves(&self, pos: Position, piece: Piece, directions: &[Direction], moves: &mut Vec<Move>) {
        let pin = self.pin_direction(pos);
        for &direction in directions {
            if pin.is_some_and(|pin| !direction.is_along(pin)) {
                continue;
            }
            for distance in 1..8 {
                let Some(target) = pos.offset(direction, distance) else {
                    break;
                };
                match self.board.get(target) {
                    None => moves.push(Move::new(pos, target, piece, None)),
                    Some(other) => {
                        if other.color != piece.color {
                            moves.push(Move::new(pos, target, piece, Some(other)));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn king_moves(&self, pos: Position, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let king = Piece::new(PieceType::King, color);

        for direction in ALL_DIRECTIONS {
            let Some(target) = pos.offset(direction, 1) else {
                continue;
            };
            let captured = self.board.get(target);
            if captured.is_some_and(|other| other.color == color) {
                continue;
            }
            if !self.is_square_attacked_ignoring(target, color.opposite(), Some(pos)) {
                moves.push(Move::new(pos, target, king, captured));
            }
        }

        self.castle_moves(pos, king, moves);
    }

    fn castle_moves(&self, pos: Position, king: Piece, moves: &mut Vec<Move>) {
        if self.in_check {
            return;
        }
        let color = king.color;
        let row = color.back_row();
        if pos != (Position { row, col: 4 }) {
            return;
        }

        if self.castling_rights.kingside(color)
            && self.castle_path_clear(color, 7, &[5, 6], &[5, 6])
        {
            let to = Position { row, col: 6 };
            moves.push(Move::new(pos, to, king, None).with_type(MoveType::Castle));
        }

        if self.castling_rights.queenside(color)
            && self.castle_path_clear(color, 0, &[1, 2, 3], &[2, 3])
        {
            let to = Position { row, col: 2 };
            moves.push(Move::new(pos, to, king, None).with_type(MoveType::Castle));
        }
    }

    fn castle_path_clear(&self, color: Color, rook_col: u8, empty: &[u8], safe: &[u8]) -> bool {
        let row = color.back_row();
        let rook = Piece::new(PieceType::Rook, color);
        self.board.get(Position { row, col: rook_col }) == Some(rook)
            && empty.iter().all(|&col| self.board.is_empty(Position { row, col }))
            && safe
                .iter()
                .all(|&col| !self.is_square_attacked(Position { row, col }, color.opposite()))
    }
}

fn push_pawn_move(mv: Move, moves: &mut Vec<Move>) {
    if mv.to.row == mv.piece_moved.color.promotion_row() {
        moves.extend(PieceType::PROMOTIONS.iter().map(|&piece_type| mv.promoting_to(piece_type)));
    } else {
        moves.push(mv);
    }
}
