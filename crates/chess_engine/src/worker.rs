//! Background search with a one-shot result channel.
//!
//! The worker owns its `GameState` snapshot outright, so the caller can keep
//! mutating its own game while the search runs. Dropping or cancelling the
//! handle discards the search; nothing partial is ever delivered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use chess_core::{GameState, Move};
use log::debug;

use crate::ai::select_move;
use crate::config::SearchConfig;
use crate::error::{EngineError, EngineResult};

pub struct SearchHandle {
    receiver: Receiver<EngineResult<Move>>,
    cancel: Arc<AtomicBool>,
}

/// Searches `state` on the rayon pool. `legal_moves` are the root moves and
/// the pool for the random fallback.
pub fn spawn_search(mut state: GameState, legal_moves: Vec<Move>, config: SearchConfig) -> SearchHandle {
    let (sender, receiver) = mpsc::sync_channel(1);
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    rayon::spawn(move || {
        let result = select_move(&mut state, legal_moves, &config, Some(flag.as_ref()));
        if sender.send(result).is_err() {
            debug!("search finished after its handle was dropped");
        }
    });

    SearchHandle { receiver, cancel }
}

impl SearchHandle {
    /// Non-blocking poll: `None` while the search is still running.
    pub fn try_result(&self) -> Option<EngineResult<Move>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(EngineError::WorkerDisconnected)),
        }
    }

    /// Blocks until the worker reports.
    pub fn wait(self) -> EngineResult<Move> {
        self.receiver.recv().map_err(|_| EngineError::WorkerDisconnected)?
    }

    /// Asks the worker to stop at its next node. Its result, if any, is discarded.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
