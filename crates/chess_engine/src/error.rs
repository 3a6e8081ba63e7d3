use thiserror::Error;

/// Ways a move request can come back without a move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The position is checkmate or stalemate.
    #[error("no legal moves in this position")]
    NoLegalMoves,

    #[error("search was cancelled before it finished")]
    Cancelled,

    #[error("search worker stopped without reporting a result")]
    WorkerDisconnected,
}

pub type EngineResult<T> = Result<T, EngineError>;
