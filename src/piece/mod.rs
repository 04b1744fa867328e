//! Pieces and their attack ("hold") and move generation.
//!
//! A [`Piece`] is a plain value: role, color and the square of the tile that
//! owns it. Per-role behavior is looked up in a small capability table so
//! that the board can drive every piece through the same two entry points,
//! [`Piece::holds`] and [`Piece::moves`].

mod leaper;
mod pawn;
mod slider;

pub(crate) use pawn::last_row;

use std::fmt;

use log::trace;
use shakmaty::{Color, Role};

use crate::board::Board;
use crate::square::Square;

/// A chess piece standing on a board tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub role: Role,
    pub color: Color,
    /// Always equal to the coordinates of the owning tile.
    pub pos: Square,
}

/// Generation entry points for one role.
pub(crate) struct Behavior {
    /// Mark attacked squares, pins and checks on the board tiles.
    pub holds: fn(Piece, &mut Board),
    /// Append candidate destinations to the board's move map.
    pub moves: fn(Piece, &mut Board),
}

const PAWN: Behavior = Behavior {
    holds: pawn::holds,
    moves: pawn::moves,
};

const KNIGHT: Behavior = Behavior {
    holds: leaper::knight_holds,
    moves: leaper::knight_moves,
};

const KING: Behavior = Behavior {
    holds: leaper::king_holds,
    moves: leaper::king_moves,
};

const SLIDER: Behavior = Behavior {
    holds: slider::holds,
    moves: slider::moves,
};

impl Behavior {
    #[inline]
    pub(crate) fn of(role: Role) -> &'static Behavior {
        match role {
            Role::Pawn => &PAWN,
            Role::Knight => &KNIGHT,
            Role::King => &KING,
            Role::Bishop | Role::Rook | Role::Queen => &SLIDER,
        }
    }
}

/// True iff `target` is on the board and empty.
#[inline]
pub fn can_step(board: &Board, target: Square) -> bool {
    board.tile(target).is_some_and(|tile| !tile.is_occupied())
}

impl Piece {
    #[inline]
    pub const fn new(role: Role, color: Color, pos: Square) -> Self {
        Self { role, color, pos }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    #[inline]
    pub fn char(self) -> char {
        shakmaty::Piece {
            role: self.role,
            color: self.color,
        }
        .char()
    }

    /// Run the hold pass for this piece.
    #[inline]
    pub fn holds(self, board: &mut Board) {
        (Behavior::of(self.role).holds)(self, board)
    }

    /// Run the move pass for this piece.
    #[inline]
    pub fn moves(self, board: &mut Board) {
        (Behavior::of(self.role).moves)(self, board)
    }

    /// True iff `target` holds a piece of the other color.
    pub fn can_attack(self, board: &Board, target: Square) -> bool {
        board
            .tile(target)
            .and_then(|tile| tile.piece)
            .is_some_and(|other| other.color != self.color)
    }

    /// True iff `target` holds the enemy king.
    pub fn can_check(self, board: &Board, target: Square) -> bool {
        board
            .tile(target)
            .and_then(|tile| tile.piece)
            .is_some_and(|other| other.color != self.color && other.role == Role::King)
    }

    /// A step or a capture. A king additionally refuses squares the opponent
    /// holds.
    pub fn can_move(self, board: &Board, target: Square) -> bool {
        let reachable = can_step(board, target) || self.can_attack(board, target);
        if self.role != Role::King {
            return reachable;
        }
        reachable && board.tile(target).is_some_and(|tile| !tile.held_by(!self.color))
    }

    /// Mark `target` as attacked by this piece's color.
    pub fn hold(self, board: &mut Board, target: Square) {
        if let Some(tile) = board.tile_mut(target) {
            match self.color {
                Color::White => tile.held_by_white = true,
                Color::Black => tile.held_by_black = true,
            }
        }
    }

    /// Mark the occupant of `target` as pinned by this piece's color.
    pub fn pin(self, board: &mut Board, target: Square) {
        if let Some(tile) = board.tile_mut(target) {
            trace!("{self} pins the piece on {target}");
            match self.color {
                Color::White => tile.pinned_by_white = true,
                Color::Black => tile.pinned_by_black = true,
            }
        }
    }

    /// Record that this piece gives check.
    pub fn check(self, board: &mut Board) {
        trace!("{self} gives check");
        board.record_check(self);
    }

    pub fn seek_step(self, board: &mut Board, target: Square) -> bool {
        let found = can_step(board, target);
        if found {
            board.add_move(self.pos, target);
        }
        found
    }

    pub fn seek_attack(self, board: &mut Board, target: Square) -> bool {
        let found = self.can_attack(board, target);
        if found {
            board.add_move(self.pos, target);
        }
        found
    }

    pub fn seek_move(self, board: &mut Board, target: Square) -> bool {
        let found = self.can_move(board, target);
        if found {
            board.add_move(self.pos, target);
        }
        found
    }

    /// Unlike the other `seek_*` helpers this records the check rather than
    /// a destination.
    pub fn seek_check(self, board: &mut Board, target: Square) -> bool {
        let found = self.can_check(board, target);
        if found {
            self.check(board);
        }
        found
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} at {}", self.color, self.role, self.pos)
    }
}
