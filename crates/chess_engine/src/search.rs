//! Fixed-depth negamax with alpha-beta pruning.
//!
//! Scores inside the search are from the side to move's point of view:
//! `turn_sign` is +1 when White moves and -1 when Black moves, and every
//! recursive call negates both the sign and the child's score.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};

use chess_core::{Color, GameState, Move};
use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::config::SearchConfig;
use crate::evaluation::{evaluate_position, piece_value, CHECKMATE_SCORE};

/// Bound wider than any reachable score, safe to negate.
pub const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` when the root had no moves, the depth was zero, or the search was cancelled.
    pub best_move: Option<Move>,
    /// Score of the root from the side to move's point of view.
    pub score: i32,
    pub nodes: u64,
    pub cancelled: bool,
}

/// Per-invocation state threaded through the recursion.
struct SearchContext<'a> {
    max_depth: u8,
    best_move: Option<Move>,
    nodes: u64,
    rng: Option<StdRng>,
    cancel: Option<&'a AtomicBool>,
}

impl SearchContext<'_> {
    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn order(&mut self, moves: &mut [Move]) {
        if let Some(rng) = self.rng.as_mut() {
            moves.shuffle(rng);
        }
        // Stable, so shuffled moves of equal capture value keep their order.
        moves.sort_by_key(|mv| Reverse(mv.piece_captured.map_or(0, |piece| piece_value(piece.piece_type))));
    }
}

pub fn turn_sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

pub(crate) fn rng_from(config: &SearchConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Evaluation of a node that will not be expanded. Mates found with more
/// depth remaining are closer, so they score further from zero.
fn leaf_score(state: &GameState, depth: u8, turn_sign: i32) -> i32 {
    let score = turn_sign * evaluate_position(state);
    if state.is_checkmate() {
        score + score.signum() * depth as i32
    } else {
        score
    }
}

/// Searches `state` to `config.depth` plies and returns the best root move.
pub fn search_best_move(state: &mut GameState, config: &SearchConfig) -> SearchOutcome {
    let moves = state.legal_moves();
    search_root(state, moves, config, None)
}

/// Searches only `root_moves` (the legal moves of `state`). Checks `cancel`
/// at every node; a cancelled search reports no move.
pub fn search_root(
    state: &mut GameState,
    root_moves: Vec<Move>,
    config: &SearchConfig,
    cancel: Option<&AtomicBool>,
) -> SearchOutcome {
    let mut ctx = SearchContext {
        max_depth: config.depth,
        best_move: None,
        nodes: 0,
        rng: config.randomize.then(|| rng_from(config)),
        cancel,
    };
    let sign = turn_sign(state.side_to_move());

    let score = if config.depth == 0 || root_moves.is_empty() {
        state.legal_moves();
        ctx.nodes += 1;
        leaf_score(state, config.depth, sign)
    } else {
        alpha_beta_children(state, root_moves, config.depth, -INFINITY, INFINITY, sign, &mut ctx)
    };

    let cancelled = ctx.is_cancelled();
    let outcome = SearchOutcome {
        best_move: if cancelled { None } else { ctx.best_move },
        score,
        nodes: ctx.nodes,
        cancelled,
    };
    match outcome.best_move {
        Some(mv) => debug!("depth {} searched {} nodes, best {} ({})", config.depth, outcome.nodes, mv, score),
        None => debug!("depth {} searched {} nodes without a best move", config.depth, outcome.nodes),
    }
    outcome
}

fn alpha_beta(
    state: &mut GameState,
    depth: u8,
    alpha: i32,
    beta: i32,
    turn_sign: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;
    if ctx.is_cancelled() {
        return 0;
    }

    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return leaf_score(state, depth, turn_sign);
    }
    alpha_beta_children(state, moves, depth, alpha, beta, turn_sign, ctx)
}

fn alpha_beta_children(
    state: &mut GameState,
    mut moves: Vec<Move>,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    turn_sign: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.order(&mut moves);

    let mut max_score = -INFINITY;
    for mv in moves {
        state.make_move(mv);
        let score = -alpha_beta(state, depth - 1, -beta, -alpha, -turn_sign, ctx);
        state.undo_move();

        if score > max_score {
            max_score = score;
            if depth == ctx.max_depth {
                trace!("root move {} scores {}", mv, score);
                ctx.best_move = Some(mv);
            }
        }
        alpha = alpha.max(max_score);
        if alpha >= beta {
            break;
        }
    }
    max_score
}

/// Plain negamax without pruning. Visits every node; kept as the reference
/// the pruned search must agree with.
pub fn negamax(state: &mut GameState, depth: u8, turn_sign: i32) -> i32 {
    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return leaf_score(state, depth, turn_sign);
    }

    let mut max_score = -INFINITY;
    for mv in moves {
        state.make_move(mv);
        let score = -negamax(state, depth - 1, -turn_sign);
        state.undo_move();
        max_score = max_score.max(score);
    }
    max_score
}

/// Mate scores sit within `max depth` of [`CHECKMATE_SCORE`].
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= CHECKMATE_SCORE
}
