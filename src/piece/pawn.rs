use shakmaty::Color;

use super::Piece;
use crate::board::Board;
use crate::square::Square;

/// Row delta of a forward step.
#[inline]
const fn forward(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Row a pawn of `color` starts on.
#[inline]
const fn start_row(color: Color) -> i8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row on which a pawn of `color` promotes.
#[inline]
pub(crate) const fn last_row(color: Color) -> i8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

fn diagonals(piece: Piece) -> [Square; 2] {
    let dy = forward(piece.color);
    [
        piece.pos + Square::new(1, dy),
        piece.pos + Square::new(-1, dy),
    ]
}

fn seek_en_passant(piece: Piece, board: &mut Board, target: Square) {
    if board.tile(target).is_some_and(|tile| tile.marked_for_en_passant) {
        board.add_move(piece.pos, target);
    }
}

pub(super) fn holds(piece: Piece, board: &mut Board) {
    for target in diagonals(piece) {
        piece.hold(board, target);
    }
}

pub(super) fn moves(piece: Piece, board: &mut Board) {
    let dy = forward(piece.color);
    let single = piece.pos + Square::new(0, dy);

    if piece.seek_step(board, single) && piece.pos.y == start_row(piece.color) {
        piece.seek_step(board, single + Square::new(0, dy));
    }

    for target in diagonals(piece) {
        piece.seek_attack(board, target);
        piece.seek_check(board, target);
        seek_en_passant(piece, board, target);
    }
}
