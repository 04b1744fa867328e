use std::io::{self, Write};

use log::{error, info};

use super::TerminalDisplay;
use crate::BoardDisplay;
use crate::board::Board;
use crate::feedback::compute_feedback;
use crate::game_logic::{GameEngine, GameState};
use crate::rules::Rules;
use crate::square::Square;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal game.
///
/// Squares typed at the prompt act as clicks on the board; the board is
/// redrawn with move and check highlights after every command.
pub fn run_interactive_terminal(rules: Rules) {
    let mut engine = GameEngine::with_rules(rules);
    let mut display = TerminalDisplay::new();
    let mut status = String::new();

    loop {
        let state = engine.state();
        clear_screen();
        draw_interface(&mut display, &engine, &state);
        if !status.is_empty() {
            println!("\n{status}");
            status.clear();
        }

        print!("> ");
        if let Err(e) = io::stdout().flush() {
            error!("failed to flush stdout: {e}");
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("failed to read input: {e}");
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };

        match command {
            "q" => break,
            "r" => {
                engine = GameEngine::with_rules(rules);
                status = "🔄 Reset to initial state".to_string();
            }
            "p" => {}
            "!" => {
                engine.deselect();
            }
            "fen" => status = engine.board().to_fen(),
            "load" => {
                let fen = input.trim_start()[4..].trim();
                match Board::from_fen_with_rules(fen, rules) {
                    Ok(board) => {
                        engine = GameEngine::from_board(board);
                        info!("loaded {fen}");
                        status = "✅ Position loaded from FEN".to_string();
                    }
                    Err(e) => status = format!("❌ {e}"),
                }
            }
            "m" => match parts.get(1).map(|mv| parse_move(mv)) {
                Some(Ok((from, to))) => {
                    if let Err(e) = engine.play(from, to) {
                        status = format!("❌ {e}");
                    }
                }
                Some(Err(e)) => status = format!("❌ {e}"),
                None => status = "Usage: m <from><to>".to_string(),
            },
            square => match square.parse::<Square>() {
                Ok(square) => {
                    engine.click(square);
                }
                Err(_) => status = format!("Unknown command: {square}"),
            },
        }
    }
}

/// Split "e2e4" into its two squares.
fn parse_move(text: &str) -> Result<(Square, Square), crate::Error> {
    if text.len() != 4 || !text.is_ascii() {
        return Err(crate::Error::InvalidSquare(text.to_string()));
    }
    let (from, to) = text.split_at(2);
    Ok((from.parse()?, to.parse()?))
}

/// Draws the complete interface: help text, board, and game status.
fn draw_interface(display: &mut TerminalDisplay, engine: &GameEngine, state: &GameState) {
    println!("♟️  Chess Tiles");
    println!();
    println!("Commands: <square> (click) | m <from><to> | ! (deselect) | load <fen> | fen | r (reset) | p (refresh) | q (quit)");
    println!();

    if let Err(e) = display.show(engine.board(), &compute_feedback(state)) {
        error!("failed to draw board: {e}");
    }

    println!();
    match state.outcome() {
        Some(outcome) => println!("Checkmate, {:?} wins", outcome.winner()),
        None => {
            let board = engine.board();
            print!("{:?} to move", state.turn());
            if board.color_in_check().is_some() {
                print!(", in check");
            }
            if let Some(target) = board.en_passant_target() {
                print!(", en passant on {target}");
            }
            println!();
        }
    }
}
