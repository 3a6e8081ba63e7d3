//! Node counts from the well-known perft reference positions. Any missed
//! pin, check evasion, castling or en passant rule shows up as a mismatch.

use chess_core::{GameState, STARTING_FEN};

fn perft(fen: &str, depth: u32) -> u64 {
    GameState::from_fen(fen).expect("valid FEN").perft(depth)
}

#[test]
fn start_position() {
    assert_eq!(perft(STARTING_FEN, 1), 20);
    assert_eq!(perft(STARTING_FEN, 2), 400);
    assert_eq!(perft(STARTING_FEN, 3), 8_902);
}

#[test]
fn kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    assert_eq!(perft(fen, 1), 48);
    assert_eq!(perft(fen, 2), 2_039);
}

#[test]
fn rank_pins_and_en_passant() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    assert_eq!(perft(fen, 1), 14);
    assert_eq!(perft(fen, 2), 191);
    assert_eq!(perft(fen, 3), 2_812);
    assert_eq!(perft(fen, 4), 43_238);
}

#[test]
fn promotions_and_checks() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    assert_eq!(perft(fen, 1), 6);
    assert_eq!(perft(fen, 2), 264);
    assert_eq!(perft(fen, 3), 9_467);
}

#[test]
fn discovered_checks_and_underpromotion() {
    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    assert_eq!(perft(fen, 1), 44);
    assert_eq!(perft(fen, 2), 1_486);
}

#[test]
fn divide_sums_to_perft() {
    let mut state = GameState::new();
    let divided = state.divide(2);
    assert_eq!(divided.len(), 20);
    assert_eq!(divided.iter().map(|(_, nodes)| nodes).sum::<u64>(), 400);
}
