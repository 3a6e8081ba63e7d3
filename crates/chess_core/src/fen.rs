//! Position setup from Forsyth-Edwards Notation. Only the first four fields
//! matter here; move counters are accepted and ignored.

use crate::{
    board::CastlingRights,
    error::{ChessError, ChessResult},
    piece::Color,
    Board, GameState, Piece, Position,
};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn invalid(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen { reason: reason.into() }
}

fn parse_placement(placement: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0u8;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col = col
                    .checked_add(skip as u8)
                    .filter(|&c| c <= 8)
                    .ok_or_else(|| invalid(format!("rank `{rank}` does not span 8 files")))?;
            } else {
                let piece = Piece::from_char(c).ok_or_else(|| invalid(format!("unknown piece `{c}`")))?;
                let pos = Position::new(row as u8, col)
                    .ok_or_else(|| invalid(format!("rank `{rank}` is too long")))?;
                board.set(pos, Some(piece));
                col += 1;
            }
        }
        if col != 8 {
            return Err(invalid(format!("rank `{rank}` does not span 8 files")));
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => return Err(invalid(format!("bad castling field `{field}`"))),
        }
    }
    Ok(rights)
}

fn single_king(board: &Board, color: Color) -> ChessResult<Position> {
    match board.find_kings(color).as_slice() {
        [king] => Ok(*king),
        kings => Err(ChessError::KingCount { color, count: kings.len() }),
    }
}

/// The skipped square of a double push by the side that just moved.
fn parse_en_passant(field: &str, side_to_move: Color) -> ChessResult<Option<Position>> {
    if field == "-" {
        return Ok(None);
    }
    let square = Position::from_algebraic(field)?;
    let mover = side_to_move.opposite();
    let expected_row = mover.pawn_start_row() as i8 + mover.pawn_direction();
    if square.row as i8 != expected_row {
        return Err(invalid(format!("en passant square `{field}` is not behind a double push")));
    }
    Ok(Some(square))
}

impl GameState {
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(invalid("expected at least 4 fields"));
        }

        let board = parse_placement(fields[0])?;
        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(invalid(format!("bad side to move `{other}`"))),
        };
        let castling_rights = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3], side_to_move)?;

        let white_king = single_king(&board, Color::White)?;
        let black_king = single_king(&board, Color::Black)?;

        Ok(Self::from_parts(
            board,
            side_to_move,
            [white_king, black_king],
            castling_rights,
            en_passant,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_fen_matches_new_game() {
        let state = GameState::from_fen(STARTING_FEN).unwrap();
        let fresh = GameState::new();
        assert_eq!(state.board(), fresh.board());
        assert_eq!(state.castling_rights(), fresh.castling_rights());
        assert_eq!(state.king_location(Color::White), fresh.king_location(Color::White));
        assert_eq!(state.en_passant_target(), None);
    }

    #[test]
    fn reads_en_passant_and_side() {
        let state = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").unwrap();
        assert_eq!(state.side_to_move(), Color::White);
        assert_eq!(state.en_passant_target(), Some(Position::from_algebraic("d6").unwrap()));
        assert_eq!(state.castling_rights(), CastlingRights::none());
    }

    #[test]
    fn en_passant_square_must_match_the_side_to_move() {
        let black = GameState::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
        assert_eq!(black.en_passant_target(), Some(Position::from_algebraic("e3").unwrap()));

        for fen in [
            "4k3/8/8/8/3pP3/8/8/4K3 w - e3 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1",
            "4k3/8/8/8/3pP3/8/8/4K3 b - e4 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - a1 0 1",
        ] {
            assert!(
                matches!(GameState::from_fen(fen), Err(ChessError::InvalidFen { .. })),
                "{fen}"
            );
        }
    }

    #[test]
    fn rejects_malformed_positions() {
        assert!(matches!(
            GameState::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessError::KingCount { color: Color::Black, count: 0 })
        ));
        let two_kings = GameState::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1").unwrap_err();
        assert_eq!(two_kings.to_string(), "position has 2 white kings, expected exactly one");
        assert!(matches!(
            GameState::from_fen("4k3/99999999999999999999999999999/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessError::InvalidFen { .. })
        ));
        assert!(GameState::from_fen("4k3/8/8/8/8/8/8/4K31 w - -").is_err());
        assert!(GameState::from_fen("4k3/8/8/8/8/8/4K3 w - -").is_err());
        assert!(GameState::from_fen("4k3/8/8/8/8/8/8/4K4 w - -").is_err());
        assert!(GameState::from_fen("4k3/8/8/8/8/8/8/4K3 x - -").is_err());
        assert!(GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w KX -").is_err());
        assert!(GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9").is_err());
    }
}
