use chess_core::{Color, GameState, GameStatus, PieceType, Position};

// Material in centipawns (100 = 1 pawn). The king is never captured, so it
// carries no material.
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 300;
const BISHOP_VALUE: i32 = 300;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 1000;
const KING_VALUE: i32 = 0;

/// Score of a side that has been mated, from the winner's point of view.
pub const CHECKMATE_SCORE: i32 = 100_000;
pub const STALEMATE_SCORE: i32 = 0;

/// Each table unit is worth a tenth of a pawn, so placement never outweighs material.
const POSITION_WEIGHT: i32 = 10;

// Piece-square tables are indexed [row][col] with row 0 on Black's back
// rank, exactly as the board is stored.

const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 3, 3, 3, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 3, 3, 3, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

// Long diagonals
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [4, 3, 2, 1, 1, 2, 3, 4],
    [3, 4, 3, 2, 2, 3, 4, 3],
    [2, 3, 4, 3, 3, 4, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 4, 3, 3, 4, 3, 2],
    [3, 4, 3, 2, 2, 3, 4, 3],
    [4, 3, 2, 1, 1, 2, 3, 4],
];

const ROOK_TABLE: [[i32; 8]; 8] = [
    [4, 3, 4, 4, 4, 4, 3, 4],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [4, 3, 4, 4, 4, 4, 3, 4],
];

const QUEEN_TABLE: [[i32; 8]; 8] = [
    [1, 1, 1, 3, 1, 1, 1, 1],
    [1, 2, 3, 3, 3, 1, 1, 1],
    [1, 4, 3, 3, 3, 4, 2, 1],
    [1, 2, 3, 3, 3, 2, 2, 1],
    [1, 2, 3, 3, 3, 2, 2, 1],
    [1, 4, 3, 3, 3, 4, 2, 1],
    [1, 2, 3, 3, 3, 1, 1, 1],
    [1, 1, 1, 3, 1, 1, 1, 1],
];

// White pawns advance toward row 0.
const WHITE_PAWN_TABLE: [[i32; 8]; 8] = [
    [8, 8, 8, 8, 8, 8, 8, 8],
    [8, 8, 8, 8, 8, 8, 8, 8],
    [5, 6, 6, 7, 7, 6, 6, 5],
    [2, 3, 3, 5, 5, 3, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const BLACK_PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 3, 5, 5, 3, 3, 2],
    [5, 6, 6, 7, 7, 6, 6, 5],
    [8, 8, 8, 8, 8, 8, 8, 8],
    [8, 8, 8, 8, 8, 8, 8, 8],
];

/// Scores a position from White's perspective: positive favors White.
///
/// Terminal positions are recognised through the status cached by the last
/// `legal_moves` call on `state`, so callers generate moves first.
pub fn evaluate_position(state: &GameState) -> i32 {
    match state.status() {
        GameStatus::Checkmate => {
            return match state.side_to_move() {
                Color::White => -CHECKMATE_SCORE,
                Color::Black => CHECKMATE_SCORE,
            };
        }
        GameStatus::Stalemate => return STALEMATE_SCORE,
        GameStatus::Ongoing => {}
    }

    let mut score = 0;
    for (pos, piece) in state.board().pieces() {
        let value = piece_value(piece.piece_type) + POSITION_WEIGHT * position_bonus(piece.piece_type, pos, piece.color);
        match piece.color {
            Color::White => score += value,
            Color::Black => score -= value,
        }
    }
    score
}

/// Returns the base material value of a piece
pub fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

/// Placement bonus in table units. Only pawns need a table per color; the
/// other tables are symmetric top to bottom. The king has no table.
fn position_bonus(piece_type: PieceType, pos: Position, color: Color) -> i32 {
    let (row, col) = (pos.row as usize, pos.col as usize);
    match piece_type {
        PieceType::Pawn => match color {
            Color::White => WHITE_PAWN_TABLE[row][col],
            Color::Black => BLACK_PAWN_TABLE[row][col],
        },
        PieceType::Knight => KNIGHT_TABLE[row][col],
        PieceType::Bishop => BISHOP_TABLE[row][col],
        PieceType::Rook => ROOK_TABLE[row][col],
        PieceType::Queen => QUEEN_TABLE[row][col],
        PieceType::King => 0,
    }
}
