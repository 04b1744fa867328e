use shakmaty::Color;
use thiserror::Error;

use crate::square::Square;

/// Errors surfaced by the board and the game session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The game ended in checkmate; no further moves are accepted.
    #[error("game over: {winner:?} wins by checkmate")]
    GameOver { winner: Color },

    /// The FEN string could not be parsed or describes an unusable position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// The string is not an algebraic square like "e4".
    #[error("invalid square notation: '{0}'")]
    InvalidSquare(String),

    /// The destination is not in the published move list for the piece.
    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },
}
