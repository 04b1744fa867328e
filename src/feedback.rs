use crate::square::Square;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Empty square the selected piece can move to
    Destination,
    /// Destination that takes an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King destination of an allowed castle
    Castle,
    /// King currently in check
    Check,
    /// Piece giving check
    Checker,
    /// Square between a slider and the king it checks
    CheckPath,
}

/// Per-square highlights for the current board state.
///
/// `BoardFeedback` is computed by [`compute_feedback`] and consumed by the
/// terminal renderer. A square carries at most one highlight; later calls to
/// [`BoardFeedback::set`] replace earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Highlight `square`, replacing what it showed before.
    pub fn set(&mut self, square: Square, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Square, SquareFeedback)>> for BoardFeedback {
    fn from(entries: Vec<(Square, SquareFeedback)>) -> Self {
        let mut feedback = Self::new();
        for (square, kind) in entries {
            feedback.set(square, kind);
        }
        feedback
    }
}

/// Where a check comes from and what it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub king_square: Square,
    pub checkers: Vec<Square>,
    /// Squares strictly between a sliding checker and the king.
    pub path: Vec<Square>,
}

/// Game state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the game engine.
pub trait FeedbackSource {
    /// Square of the piece the player has selected
    fn selected(&self) -> Option<Square>;

    /// Destinations of the selected piece
    fn destinations(&self) -> &[Square];

    /// Whether moving to `square` takes a piece, en passant included
    fn is_capture(&self, square: Square) -> bool;

    /// King destinations of the castles open to the selected king
    fn castles(&self) -> &[Square];

    /// Check details for the side to move, if it is in check
    fn check_info(&self) -> Option<CheckInfo>;
}

/// Compute visual feedback based on current game state.
///
/// Check highlights are laid down first so a selection drawn over the
/// checked king or a blocking square stays visible.
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();

    if let Some(check) = source.check_info() {
        for &square in &check.path {
            feedback.set(square, SquareFeedback::CheckPath);
        }
        for &square in &check.checkers {
            feedback.set(square, SquareFeedback::Checker);
        }
        feedback.set(check.king_square, SquareFeedback::Check);
    }

    if let Some(from) = source.selected() {
        for &to in source.destinations() {
            feedback.set(to, classify_destination(source, to));
        }
        for &to in source.castles() {
            feedback.set(to, SquareFeedback::Castle);
        }
        feedback.set(from, SquareFeedback::Origin);
    }

    feedback
}

/// Classify a destination as either a capture or a plain move
fn classify_destination(source: &impl FeedbackSource, to: Square) -> SquareFeedback {
    if source.is_capture(to) {
        SquareFeedback::Capture
    } else {
        SquareFeedback::Destination
    }
}
