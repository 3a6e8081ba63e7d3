use std::sync::atomic::AtomicBool;

use chess_core::{GameState, Move};
use log::warn;
use rand::seq::SliceRandom;

use crate::config::SearchConfig;
use crate::error::{EngineError, EngineResult};
use crate::search::{rng_from, search_root};
use crate::worker::{spawn_search, SearchHandle};

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 6;

/// Picks moves for the computer side.
#[derive(Debug, Clone, Default)]
pub struct ChessAI {
    config: SearchConfig,
}

impl ChessAI {
    pub fn new(depth: u8) -> Self {
        ChessAI {
            config: SearchConfig::with_depth(depth.clamp(MIN_DEPTH, MAX_DEPTH)),
        }
    }

    pub fn with_config(config: SearchConfig) -> Self {
        ChessAI { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth.clamp(MIN_DEPTH, MAX_DEPTH);
    }

    /// Searches a private copy of `state` on the calling thread.
    pub fn get_move(&self, state: &GameState) -> EngineResult<Move> {
        let mut snapshot = state.clone();
        let legal_moves = snapshot.legal_moves();
        select_move(&mut snapshot, legal_moves, &self.config, None)
    }

    /// Starts the same search on a worker and returns immediately.
    pub fn spawn(&self, state: &GameState) -> SearchHandle {
        let mut snapshot = state.clone();
        let legal_moves = snapshot.legal_moves();
        spawn_search(snapshot, legal_moves, self.config.clone())
    }
}

/// Runs the search and substitutes a random legal move when it selects nothing.
pub(crate) fn select_move(
    state: &mut GameState,
    legal_moves: Vec<Move>,
    config: &SearchConfig,
    cancel: Option<&AtomicBool>,
) -> EngineResult<Move> {
    if legal_moves.is_empty() {
        return Err(EngineError::NoLegalMoves);
    }

    let outcome = search_root(state, legal_moves.clone(), config, cancel);
    if outcome.cancelled {
        return Err(EngineError::Cancelled);
    }

    match outcome.best_move {
        Some(mv) => Ok(mv),
        None => {
            warn!("search selected no move, falling back to a random legal move");
            legal_moves
                .choose(&mut rng_from(config))
                .copied()
                .ok_or(EngineError::NoLegalMoves)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_clamped() {
        assert_eq!(ChessAI::new(0).config().depth, MIN_DEPTH);
        assert_eq!(ChessAI::new(40).config().depth, MAX_DEPTH);
        let mut ai = ChessAI::new(3);
        ai.set_depth(9);
        assert_eq!(ai.config().depth, MAX_DEPTH);
    }

    #[test]
    fn depth_zero_falls_back_to_a_legal_move() {
        let mut state = GameState::new();
        let ai = ChessAI::with_config(SearchConfig::deterministic(0));
        let mv = ai.get_move(&state).unwrap();
        assert!(state.legal_moves().contains(&mv));
    }

    #[test]
    fn no_move_in_a_finished_game() {
        let state = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(ChessAI::new(2).get_move(&state), Err(EngineError::NoLegalMoves));
    }

    #[test]
    fn leaves_the_callers_state_untouched() {
        let state = GameState::new();
        let before = state.board().clone();
        ChessAI::new(2).get_move(&state).unwrap();
        assert_eq!(state.board(), &before);
        assert!(state.history().is_empty());
    }
}
