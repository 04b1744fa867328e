//! Dump the per-tile annotations of a position.
//!
//! Usage: `diagnostics [--strict] [FEN]`. Without a FEN the start position
//! is used.

use std::io::Write;
use std::process::ExitCode;

use chess_tiles::{Board, Rules, Square};

fn flags(board: &Board, square: Square) -> String {
    let tile = &board[square];
    [
        (tile.held_by_white, 'W'),
        (tile.held_by_black, 'B'),
        (tile.pinned_by_white, 'w'),
        (tile.pinned_by_black, 'b'),
        (tile.in_check_path, '+'),
        (tile.marked_for_en_passant, 'e'),
    ]
    .into_iter()
    .map(|(set, c)| if set { c } else { '.' })
    .collect()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .init();

    let mut rules = Rules::default();
    let mut fen = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--strict" {
            rules = Rules::strict();
        } else {
            fen.push(arg);
        }
    }

    let board = if fen.is_empty() {
        Board::with_rules(rules)
    } else {
        match Board::from_fen_with_rules(&fen.join(" "), rules) {
            Ok(board) => board,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        }
    };

    println!("{board}");
    println!();
    println!("{}", board.to_fen());
    println!();
    println!("Tile flags: W/B held, w/b pinned by, + check path, e en passant");
    for y in 0..8 {
        let row: Vec<String> = (0..8).map(|x| flags(&board, Square::new(x, y))).collect();
        println!("{} {}", 8 - y, row.join(" "));
    }

    println!();
    match board.color_in_check() {
        Some(color) => {
            let checks: Vec<String> = board.checks().iter().map(Square::to_string).collect();
            println!("{color:?} in check from {}", checks.join(", "));
        }
        None => println!("No check"),
    }
    if let Some(outcome) = board.outcome() {
        println!("Checkmate, {:?} wins", outcome.winner());
    }

    println!();
    for (from, moves) in board.valid_moves() {
        if moves.is_empty() {
            continue;
        }
        let moves: Vec<String> = moves.iter().map(Square::to_string).collect();
        let piece = board
            .piece_at(*from)
            .map_or('?', |piece| piece.char());
        println!("{piece} {from}: {}", moves.join(" "));
    }

    ExitCode::SUCCESS
}
