//! Chess board state with per-square annotations.
//!
//! Every ply a generation pass marks which squares each color holds, which
//! pieces are pinned, where a check comes from, and publishes the moves the
//! side to move may play. [`game_logic::GameEngine`] wraps a [`Board`] into a
//! click-driven session.

pub mod board;
pub mod error;
pub mod feedback;
pub mod game_logic;
pub mod mock;
pub mod piece;
pub mod rules;
pub mod square;
pub mod tile;

pub use board::{Board, Outcome};
pub use error::Error;
pub use piece::Piece;
pub use rules::Rules;
pub use square::Square;
pub use tile::Tile;

/// Trait for reading player actions.
///
/// Abstracts over interactive and scripted inputs, providing a uniform
/// interface for [`game_logic::GameEngine::run`].
pub trait InputSource {
    /// Error type for input read failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Next pending action, or `None` when the source is exhausted.
    fn next_input(&mut self) -> Result<Option<game_logic::Input>, Self::Error>;
}

/// Trait for displaying the board and its feedback to the player.
///
/// Mirrors [`InputSource`] on the output side of the game loop.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the pieces of `board` with the given highlights.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants to their
    /// own output (terminal colors, etc.).
    fn show(&mut self, board: &Board, feedback: &feedback::BoardFeedback)
    -> Result<(), Self::Error>;
}
