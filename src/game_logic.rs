use std::fmt;

use log::{debug, info, warn};
use shakmaty::{CastlingSide, Color, Role};

use crate::InputSource;
use crate::board::{Board, Outcome, rook_home};
use crate::error::Error;
use crate::feedback::{CheckInfo, FeedbackSource};
use crate::piece::Piece;
use crate::rules::Rules;
use crate::square::Square;

/// One action from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Click on a square: select, reselect or complete a move.
    Click(Square),
    /// Drop the current selection.
    Escape,
}

/// Current game state snapshot for feedback and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    selected: Option<Square>,
    destinations: Vec<Square>,
    captures: Vec<Square>,
    castles: Vec<Square>,
    check: Option<CheckInfo>,
    turn: Color,
    outcome: Option<Outcome>,
}

impl GameState {
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

impl FeedbackSource for GameState {
    fn selected(&self) -> Option<Square> {
        self.selected
    }

    fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    fn is_capture(&self, square: Square) -> bool {
        self.captures.contains(&square)
    }

    fn castles(&self) -> &[Square] {
        &self.castles
    }

    fn check_info(&self) -> Option<CheckInfo> {
        self.check.clone()
    }
}

/// Click-driven game session on top of a [`Board`].
///
/// The engine keeps the player's selection, validates moves against the
/// board's published move map and runs a generation pass after every ply.
#[derive(Default)]
pub struct GameEngine {
    board: Board,
    selected: Option<Square>,
}

impl GameEngine {
    #[inline]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Start position under `rules`.
    #[inline]
    pub fn with_rules(rules: Rules) -> Self {
        Self::from_board(Board::with_rules(rules))
    }

    /// Creates a GameEngine from an existing board.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            selected: None,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, Error> {
        Ok(Self::from_board(fen.parse()?))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Process one player input.
    pub fn handle(&mut self, input: Input) -> GameState {
        match input {
            Input::Click(square) => self.click(square),
            Input::Escape => self.deselect(),
        }
    }

    /// Feed every pending input from `source` and return the final state.
    pub fn run<S: InputSource>(&mut self, source: &mut S) -> Result<GameState, S::Error> {
        while let Some(input) = source.next_input()? {
            self.handle(input);
        }
        Ok(self.state())
    }

    /// React to a click on `square`.
    ///
    /// With a piece selected, a click on one of its destinations (or on a
    /// castle destination of the selected king) plays the move. Any other
    /// click selects the piece of the side to move found there, or clears
    /// the selection.
    pub fn click(&mut self, square: Square) -> GameState {
        if let Some(from) = self.selected
            && from != square
            && self.is_playable(from, square)
        {
            if let Err(e) = self.commit(from, square) {
                warn!("move {from}{square} rejected: {e}");
            }
            return self.state();
        }

        if self.selected == Some(square) {
            return self.deselect();
        }
        self.select(square);
        self.state()
    }

    pub fn deselect(&mut self) -> GameState {
        self.selected = None;
        self.board.deselect();
        self.state()
    }

    /// Play `from` to `to` directly, without going through clicks.
    ///
    /// A king moving to a castle destination castles.
    pub fn play(&mut self, from: Square, to: Square) -> Result<GameState, Error> {
        if let Some(outcome) = self.board.outcome() {
            return Err(Error::GameOver {
                winner: outcome.winner(),
            });
        }
        self.select(from);
        if self.selected != Some(from) || !self.is_playable(from, to) {
            self.deselect();
            return Err(Error::IllegalMove { from, to });
        }
        self.commit(from, to)?;
        Ok(self.state())
    }

    /// Select the piece on `square` if it belongs to the side to move.
    fn select(&mut self, square: Square) {
        let selectable = self.board.outcome().is_none()
            && self
                .board
                .piece_at(square)
                .is_some_and(|piece| piece.color == self.board.turn());

        if selectable {
            debug!("selected {square}");
            self.selected = Some(square);
            self.board.select(square);
        } else {
            self.selected = None;
            self.board.deselect();
        }
    }

    fn is_playable(&self, from: Square, to: Square) -> bool {
        self.board.moves_from(from).contains(&to) || self.board.valid_castles().contains(&to)
    }

    /// Apply a validated move, then regenerate.
    fn commit(&mut self, from: Square, to: Square) -> Result<(), Error> {
        self.selected = None;
        let castling = self.board.valid_castles().contains(&to)
            && self
                .board
                .piece_at(from)
                .is_some_and(|piece| piece.role == Role::King);

        if castling {
            let side = if to.x < from.x {
                CastlingSide::QueenSide
            } else {
                CastlingSide::KingSide
            };
            self.board.castle(rook_home(self.board.turn(), side))?;
        } else {
            self.board.make_move(from, to)?;
        }
        self.board.compute_moves();

        if let Some(outcome) = self.board.outcome() {
            info!("game over, {:?} wins", outcome.winner());
        }
        Ok(())
    }

    /// Snapshot of what the player should see right now.
    pub fn state(&self) -> GameState {
        let destinations = self
            .selected
            .map(|from| self.board.moves_from(from).to_vec())
            .unwrap_or_default();
        let captures = destinations
            .iter()
            .copied()
            .filter(|&to| self.takes_piece(to))
            .collect();

        let check = self.board.color_in_check().and_then(|color| {
            let king_square = self.board.king_square(color)?;
            Some(CheckInfo {
                king_square,
                checkers: self.board.checks().to_vec(),
                path: Square::all()
                    .filter(|&square| self.board[square].in_check_path)
                    .collect(),
            })
        });

        GameState {
            selected: self.selected,
            destinations,
            captures,
            castles: self.board.valid_castles().to_vec(),
            check,
            turn: self.board.turn(),
            outcome: self.board.outcome(),
        }
    }

    /// Whether the selected piece takes something by moving to `to`.
    fn takes_piece(&self, to: Square) -> bool {
        if self.board.piece_at(to).is_some() {
            return true;
        }
        let Some(piece) = self.selected.and_then(|from| self.board.piece_at(from)) else {
            return false;
        };
        piece.role == Role::Pawn
            && to.x != piece.pos.x
            && self.board.en_passant_square() == Some(to)
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("position", &self.board.to_fen())
            .field("selected", &self.selected)
            .finish()
    }
}
