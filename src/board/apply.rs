use log::{debug, info};
use shakmaty::{Color, Role};

use super::Board;
use crate::error::Error;
use crate::piece::{Piece, last_row};
use crate::square::Square;

impl Board {
    /// Drop the pending en-passant target and its tile marker.
    pub(crate) fn clear_en_passant(&mut self) {
        if let Some(target) = self.en_passant_target.take()
            && let Some(tile) = self.tile_mut(target)
        {
            tile.reset_en_passant();
        }
    }

    /// Pass the turn, counting full moves after Black.
    pub(crate) fn end_turn(&mut self) {
        if self.turn == Color::Black {
            self.fullmove_clock += 1;
        }
        self.turn = !self.turn;
        self.valid_castles.clear();
    }

    /// Move the piece on `from` to `to`.
    ///
    /// No legality check is done here; callers validate against
    /// [`valid_moves`](Board::valid_moves) first. An off-board destination or
    /// an empty origin is ignored. The move list is not regenerated, call
    /// [`compute_moves`](Board::compute_moves) afterwards.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), Error> {
        self.game_over()?;

        let en_passant = self.en_passant_target;
        self.clear_en_passant();

        if !to.is_valid() {
            debug!("move ignored: {to} is off the board");
            return Ok(());
        }
        let Some(mut piece) = self.piece_at(from) else {
            debug!("move ignored: no piece on {from}");
            return Ok(());
        };

        let mut captured = self[to].piece;
        if piece.role == Role::Pawn && Some(to) == en_passant && to.x != from.x {
            let victim = Square::new(to.x, from.y);
            captured = self[victim].piece.take();
            debug!("{piece} takes en passant on {victim}");
        }

        piece.pos = to;
        self[to].piece = Some(piece);
        self[from].piece = None;
        self.revoke_castling(from);
        self.revoke_castling(to);

        if piece.role == Role::Pawn && (to.y - from.y).abs() == 2 {
            let skipped = Square::new(to.x, (from.y + to.y) / 2);
            self[skipped].marked_for_en_passant = true;
            self.en_passant_target = Some(skipped);
        }

        if piece.role == Role::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        info!("{:?} {:?} {from}{to}", piece.color, piece.role);
        self.end_turn();
        self.promote_pawns();
        Ok(())
    }

    /// Replace every pawn on its last row with a queen.
    fn promote_pawns(&mut self) {
        for piece in self.pieces() {
            if piece.role == Role::Pawn && piece.pos.y == last_row(piece.color) {
                info!("{piece} promotes to a queen");
                self[piece.pos].piece = Some(Piece::new(Role::Queen, piece.color, piece.pos));
            }
        }
    }
}
