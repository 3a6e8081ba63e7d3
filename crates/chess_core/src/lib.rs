// Rules engine: board state, fully legal move generation, make/undo
pub mod attacks;
pub mod board;
pub mod error;
pub mod executor;
pub mod fen;
pub mod game_state;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod position;

// Re-export main types for convenience
pub use board::{Board, CastlingRights};
pub use error::{ChessError, ChessResult};
pub use fen::STARTING_FEN;
pub use game_state::{Check, GameState, GameStatus, MoveRecord, Pin};
pub use moves::{Move, MoveType};
pub use piece::{Color, Piece, PieceType};
pub use position::{Direction, Position};
