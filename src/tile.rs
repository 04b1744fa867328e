use shakmaty::Color;

use crate::piece::Piece;

/// One board square and the annotations computed for it.
///
/// Everything except `piece` and `marked_for_en_passant` is rebuilt on every
/// generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub piece: Option<Piece>,
    pub held_by_white: bool,
    pub held_by_black: bool,
    pub pinned_by_white: bool,
    pub pinned_by_black: bool,
    pub in_check_path: bool,
    pub marked_for_en_passant: bool,
}

impl Tile {
    /// Clear holds, pins and the check path. The en-passant marker and the
    /// occupant are only cleared on request.
    pub fn reset(&mut self, reset_en_passant: bool, reset_piece: bool) {
        self.held_by_white = false;
        self.held_by_black = false;
        self.pinned_by_white = false;
        self.pinned_by_black = false;
        self.in_check_path = false;
        if reset_en_passant {
            self.marked_for_en_passant = false;
        }
        if reset_piece {
            self.piece = None;
        }
    }

    #[inline]
    pub fn reset_en_passant(&mut self) {
        self.marked_for_en_passant = false;
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.piece.is_some()
    }

    /// True iff `color` attacks this square.
    #[inline]
    pub fn held_by(&self, color: Color) -> bool {
        match color {
            Color::White => self.held_by_white,
            Color::Black => self.held_by_black,
        }
    }

    /// True iff the occupant is pinned against its king by `color`.
    #[inline]
    pub fn pinned_by(&self, color: Color) -> bool {
        match color {
            Color::White => self.pinned_by_white,
            Color::Black => self.pinned_by_black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;
    use shakmaty::Role;

    fn annotated() -> Tile {
        Tile {
            piece: Some(Piece::new(Role::Rook, Color::White, Square::new(0, 7))),
            held_by_white: true,
            held_by_black: true,
            pinned_by_white: true,
            pinned_by_black: true,
            in_check_path: true,
            marked_for_en_passant: true,
        }
    }

    #[test]
    fn test_reset_keeps_marker_and_piece() {
        let mut tile = annotated();
        tile.reset(false, false);

        assert!(!tile.held_by_white && !tile.held_by_black);
        assert!(!tile.pinned_by_white && !tile.pinned_by_black);
        assert!(!tile.in_check_path);
        assert!(tile.marked_for_en_passant);
        assert!(tile.is_occupied());
    }

    #[test]
    fn test_reset_everything() {
        let mut tile = annotated();
        tile.reset(true, true);
        assert_eq!(tile, Tile::default());
    }

    #[test]
    fn test_reset_en_passant_only() {
        let mut tile = annotated();
        tile.reset_en_passant();
        assert!(!tile.marked_for_en_passant);
        assert!(tile.held_by_white);
    }

    #[test]
    fn test_color_accessors() {
        let tile = Tile {
            held_by_black: true,
            pinned_by_white: true,
            ..Tile::default()
        };
        assert!(tile.held_by(Color::Black) && !tile.held_by(Color::White));
        assert!(tile.pinned_by(Color::White) && !tile.pinned_by(Color::Black));
    }
}
