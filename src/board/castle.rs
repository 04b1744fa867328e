use log::{debug, info};
use shakmaty::{CastlingSide, Color, Role};

use super::{Board, side_index};
use crate::error::Error;
use crate::piece::Piece;
use crate::square::Square;

const SIDES: [CastlingSide; 2] = [CastlingSide::QueenSide, CastlingSide::KingSide];

#[inline]
const fn home_row(color: Color) -> i8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

const KING_FILE: i8 = 4;

/// Where the king of `color` starts.
#[inline]
pub const fn king_home(color: Color) -> Square {
    Square::new(KING_FILE, home_row(color))
}

/// Corner the `side` rook of `color` starts on.
#[inline]
pub const fn rook_home(color: Color, side: CastlingSide) -> Square {
    let x = match side {
        CastlingSide::QueenSide => 0,
        CastlingSide::KingSide => 7,
    };
    Square::new(x, home_row(color))
}

/// Where the king lands after castling.
#[inline]
pub const fn king_destination(color: Color, side: CastlingSide) -> Square {
    let x = match side {
        CastlingSide::QueenSide => 2,
        CastlingSide::KingSide => 6,
    };
    Square::new(x, home_row(color))
}

/// Where the rook lands after castling.
#[inline]
const fn rook_destination(color: Color, side: CastlingSide) -> Square {
    let x = match side {
        CastlingSide::QueenSide => 3,
        CastlingSide::KingSide => 5,
    };
    Square::new(x, home_row(color))
}

/// The (color, side) whose rook starts on `corner`.
fn corner_owner(corner: Square) -> Option<(Color, CastlingSide)> {
    [Color::White, Color::Black]
        .into_iter()
        .flat_map(|color| SIDES.map(|side| (color, side)))
        .find(|&(color, side)| rook_home(color, side) == corner)
}

impl Board {
    fn holds_piece(&self, square: Square, role: Role, color: Color) -> bool {
        self.piece_at(square)
            .is_some_and(|piece| piece.role == role && piece.color == color)
    }

    /// Whether `color` can castle on `side` right now.
    ///
    /// The base test is geometric: rook on its corner, king on its home
    /// square, nothing in between. [`Rules`](crate::Rules) can add the
    /// castling flags and king safety on top.
    pub fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        let king = king_home(color);
        let rook = rook_home(color, side);

        let pieces_home =
            self.holds_piece(rook, Role::Rook, color) && self.holds_piece(king, Role::King, color);
        let (low, high) = if rook.x < king.x {
            (rook.x + 1, king.x)
        } else {
            (king.x + 1, rook.x)
        };
        let path_empty =
            (low..high).all(|x| !self[Square::new(x, home_row(color))].is_occupied());

        if !(pieces_home && path_empty) {
            return false;
        }
        if self.rules.castling_rights && !self.available_castle(color, side) {
            return false;
        }
        if self.rules.castling_safety {
            let destination = king_destination(color, side);
            let step = if destination.x < king.x { -1 } else { 1 };
            let mut square = king;
            loop {
                if self[square].held_by(!color) {
                    return false;
                }
                if square == destination {
                    break;
                }
                square = square + Square::new(step, 0);
            }
        }
        true
    }

    /// Select the piece on `square` for the caller.
    ///
    /// For a king of the side to move this fills
    /// [`valid_castles`](Board::valid_castles) with the king destinations of
    /// every castle currently allowed; for anything else it is cleared.
    pub fn select(&mut self, square: Square) {
        self.valid_castles.clear();
        let Some(piece) = self.piece_at(square) else {
            return;
        };
        if piece.role != Role::King || piece.color != self.turn || self.outcome.is_some() {
            return;
        }
        for side in SIDES {
            if self.can_castle(piece.color, side) {
                self.valid_castles.push(king_destination(piece.color, side));
            }
        }
    }

    /// Forget the castle destinations of the last selection.
    #[inline]
    pub fn deselect(&mut self) {
        self.valid_castles.clear();
    }

    /// Castle with the rook standing on `rook_square`.
    ///
    /// King and rook jump to their castled squares, the turn passes and holds
    /// are recomputed. Squares that are not a castling corner of the side to
    /// move, or a castle that is not allowed, are ignored.
    pub fn castle(&mut self, rook_square: Square) -> Result<(), Error> {
        self.game_over()?;

        let Some((color, side)) = corner_owner(rook_square) else {
            debug!("castle ignored: {rook_square} is not a rook corner");
            return Ok(());
        };
        if color != self.turn || !self.can_castle(color, side) {
            debug!("castle ignored: {color:?} cannot castle on {side:?}");
            return Ok(());
        }

        self.clear_en_passant();

        let king_to = king_destination(color, side);
        let rook_to = rook_destination(color, side);
        self[king_home(color)].piece = None;
        self[rook_square].piece = None;
        self[king_to].piece = Some(Piece::new(Role::King, color, king_to));
        self[rook_to].piece = Some(Piece::new(Role::Rook, color, rook_to));

        *self.available_castles.get_mut(color) = [false, false];
        self.halfmove_clock += 1;
        self.end_turn();

        info!("{color:?} castles {side:?}");
        self.compute_holds();
        Ok(())
    }

    /// Drop castling rights tied to `square`: the king's home clears both
    /// sides, a rook corner clears its own side.
    pub(crate) fn revoke_castling(&mut self, square: Square) {
        for color in [Color::White, Color::Black] {
            if square == king_home(color) {
                *self.available_castles.get_mut(color) = [false, false];
            }
        }
        if let Some((color, side)) = corner_owner(square) {
            self.available_castles.get_mut(color)[side_index(side)] = false;
        }
    }
}
