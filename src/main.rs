use chess_core::{GameState, GameStatus, STARTING_FEN};
use chess_engine::{ChessAI, EngineError, SearchConfig, MAX_DEPTH, MIN_DEPTH};
use clap::Parser;
use log::{error, info};

/// Plays the engine against itself in the terminal.
#[derive(Parser, Debug)]
#[command(name = "chess-selfplay", version, about)]
struct Args {
    /// Search depth in plies
    #[arg(
        short,
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(i64::from(MIN_DEPTH)..=i64::from(MAX_DEPTH))
    )]
    depth: u8,

    /// Stop after this many plies even if the game is not over
    #[arg(short, long, default_value_t = 80)]
    plies: usize,

    /// Seed for move-order shuffling and fallback moves
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Search moves in generation order instead of shuffling them
    #[arg(long)]
    no_shuffle: bool,

    /// Print the engine's choice for the position and exit
    #[arg(long)]
    best_move: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut state = match GameState::from_fen(&args.fen) {
        Ok(state) => state,
        Err(err) => {
            error!("{err}");
            std::process::exit(2);
        }
    };

    let ai = ChessAI::with_config(SearchConfig {
        depth: args.depth,
        randomize: !args.no_shuffle,
        seed: args.seed,
    });

    if args.best_move {
        match ai.spawn(&state).wait() {
            Ok(mv) => println!("{mv}"),
            Err(err) => println!("{err}"),
        }
        return;
    }

    for ply in 0..args.plies {
        // The worker gets its own snapshot; this thread only waits for the answer.
        let mv = match ai.spawn(&state).wait() {
            Ok(mv) => mv,
            Err(EngineError::NoLegalMoves) => break,
            Err(err) => {
                error!("search failed: {err}");
                break;
            }
        };

        if state.submit_move(mv).is_none() {
            error!("engine proposed an illegal move {mv}");
            break;
        }
        info!("ply {}: {}", ply + 1, mv);
    }

    state.legal_moves();
    println!("{}\n", state.board());
    println!("{}", format_move_log(&state.move_log()));
    match state.status() {
        GameStatus::Checkmate => println!("checkmate, {} wins", state.side_to_move().opposite()),
        GameStatus::Stalemate => println!("stalemate"),
        GameStatus::Ongoing => println!("stopped after {} plies", state.history().len()),
    }
}

fn format_move_log(log: &[String]) -> String {
    log.chunks(2)
        .enumerate()
        .map(|(i, pair)| format!("{}. {}", i + 1, pair.join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_outside_the_search_range_is_rejected() {
        assert!(Args::try_parse_from(["chess-selfplay", "--depth", "0"]).is_err());
        assert!(Args::try_parse_from(["chess-selfplay", "--depth", "40"]).is_err());
        let args = Args::try_parse_from(["chess-selfplay", "--depth", "6"]).unwrap();
        assert_eq!(args.depth, MAX_DEPTH);
        assert_eq!(Args::try_parse_from(["chess-selfplay"]).unwrap().depth, 3);
    }

    #[test]
    fn move_log_is_numbered_in_pairs() {
        let log = ["e4", "e5", "Nf3"].map(String::from);
        assert_eq!(format_move_log(&log), "1. e4 e5 2. Nf3");
    }
}
