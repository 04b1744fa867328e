use std::io::{self, Write};

use crate::BoardDisplay;
use crate::board::Board;
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::square::{SIZE, Square};

/// Terminal-based board display for development and testing.
///
/// Renders the board with [`BoardFeedback`] as ANSI color-coded squares
/// matching the feedback type (destinations, captures, etc.).
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render(&mut io::stdout(), board, feedback)
    }
}

/// Render board and feedback to any writer. Extracted for testability.
fn render(w: &mut impl Write, board: &Board, feedback: &BoardFeedback) -> Result<(), DisplayError> {
    for y in 0..SIZE {
        write!(w, " {} ", SIZE - y)?;
        for x in 0..SIZE {
            let square = Square::new(x, y);
            let symbol = board.piece_at(square).map_or('·', |piece| piece.char());
            match background(feedback.get(square)) {
                Some(color) => write!(w, "\x1b[{color}m {symbol} \x1b[0m")?,
                None => write!(w, " {symbol} ")?,
            }
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// ANSI background code for a feedback variant.
fn background(feedback: Option<SquareFeedback>) -> Option<u8> {
    match feedback? {
        SquareFeedback::Destination => Some(44),
        SquareFeedback::Capture => Some(41),
        SquareFeedback::Origin => Some(42),
        SquareFeedback::Castle => Some(46),
        SquareFeedback::Check => Some(45),
        SquareFeedback::Checker => Some(43),
        SquareFeedback::CheckPath => Some(100),
    }
}
