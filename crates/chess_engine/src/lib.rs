pub mod ai;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod search;
pub mod worker;

pub use ai::{ChessAI, MAX_DEPTH, MIN_DEPTH};
pub use config::SearchConfig;
pub use error::{EngineError, EngineResult};
pub use evaluation::evaluate_position;
pub use search::{negamax, search_best_move, search_root, SearchOutcome};
pub use worker::{spawn_search, SearchHandle};
