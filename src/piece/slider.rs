use shakmaty::Role;

use super::{Piece, can_step};
use crate::board::Board;
use crate::square::Square;

const ORTHOGONAL: [Square; 4] = [
    Square::new(1, 0),
    Square::new(-1, 0),
    Square::new(0, 1),
    Square::new(0, -1),
];

const DIAGONAL: [Square; 4] = [
    Square::new(1, 1),
    Square::new(1, -1),
    Square::new(-1, 1),
    Square::new(-1, -1),
];

const ALL: [Square; 8] = [
    Square::new(1, 0),
    Square::new(-1, 0),
    Square::new(0, 1),
    Square::new(0, -1),
    Square::new(1, 1),
    Square::new(1, -1),
    Square::new(-1, 1),
    Square::new(-1, -1),
];

/// Ray directions for a sliding role; empty for the others.
pub(crate) fn offsets(role: Role) -> &'static [Square] {
    match role {
        Role::Rook => &ORTHOGONAL,
        Role::Bishop => &DIAGONAL,
        Role::Queen => &ALL,
        _ => &[],
    }
}

/// First square along `offset` from `from` that is not steppable.
fn first_blocker(board: &Board, from: Square, offset: Square) -> Square {
    let mut pos = from + offset;
    while can_step(board, pos) {
        pos = pos + offset;
    }
    pos
}

pub(super) fn holds(piece: Piece, board: &mut Board) {
    let xray = board.rules().slider_xray;

    for &offset in offsets(piece.role) {
        let mut pos = piece.pos + offset;
        while can_step(board, pos) {
            piece.hold(board, pos);
            pos = pos + offset;
        }

        // `pos` is now the first blocker, or off the board.
        if piece.can_attack(board, pos) || xray {
            piece.hold(board, pos);
        }

        if piece.can_check(board, pos) {
            piece.check(board);
            let mut path = piece.pos + offset;
            while path != pos {
                if let Some(tile) = board.tile_mut(path) {
                    tile.in_check_path = true;
                }
                path = path + offset;
            }

            if xray {
                let mut behind = pos + offset;
                while can_step(board, behind) {
                    piece.hold(board, behind);
                    behind = behind + offset;
                }
                piece.hold(board, behind);
            }
            continue;
        }

        // Look through the blocker: if the enemy king stands right behind it,
        // the blocker is pinned.
        if board.tile(pos).is_some_and(|tile| tile.is_occupied()) {
            let behind = first_blocker(board, pos, offset);
            if piece.can_check(board, behind) {
                piece.pin(board, pos);
            }
        }
    }
}

pub(super) fn moves(piece: Piece, board: &mut Board) {
    for &offset in offsets(piece.role) {
        let mut pos = piece.pos + offset;
        while piece.seek_step(board, pos) {
            pos = pos + offset;
        }
        piece.seek_attack(board, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;
    use shakmaty::Color;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn board(fen: &str) -> Board {
        fen.parse().expect("valid FEN")
    }

    #[test]
    fn test_offsets_per_role() {
        assert_eq!(offsets(Role::Rook).len(), 4);
        assert_eq!(offsets(Role::Bishop).len(), 4);
        assert_eq!(offsets(Role::Queen).len(), 8);
        assert!(offsets(Role::Knight).is_empty());
    }

    #[test]
    fn test_lone_rook_checks_along_rank() {
        // White rook on (0,0) = a8, black king on (7,0) = h8.
        let board = board("R6k/8/8/8/8/8/8/K7 b - - 0 1");

        for x in 1..=6 {
            let tile = &board[Square::new(x, 0)];
            assert!(tile.in_check_path, "({x}, 0) should be on the check path");
            assert!(tile.held_by_white);
        }
        assert!(!board[Square::new(7, 0)].in_check_path);
        assert!(board[Square::new(7, 0)].held_by_white);
        assert_eq!(board.color_in_check(), Some(Color::Black));
        assert_eq!(board.checks(), &[Square::new(0, 0)]);
    }

    #[test]
    fn test_holds_stop_at_first_blocker() {
        // Rook d4, own pawn d6, enemy pawn f4.
        let board = board("4k3/8/3P4/8/3R1p2/8/8/4K3 w - - 0 1");

        assert!(board[sq("d5")].held_by_white);
        assert!(!board[sq("d6")].held_by_white, "own piece is not held");
        assert!(!board[sq("d7")].held_by_white);
        assert!(board[sq("e4")].held_by_white);
        assert!(board[sq("f4")].held_by_white, "enemy blocker is held");
        assert!(!board[sq("g4")].held_by_white);
    }

    #[test]
    fn test_xray_holds_defended_piece_and_behind_king() {
        let mut board = Board::from_fen_with_rules(
            "4k3/8/3P4/8/3R4/8/8/K7 w - - 0 1",
            Rules::strict(),
        )
        .unwrap();
        assert!(board[sq("d6")].held_by_white);

        board = Board::from_fen_with_rules("R3k3/8/8/8/8/8/8/K7 b - - 0 1", Rules::strict())
            .unwrap();
        assert!(board[sq("f8")].held_by_white);
        assert!(board[sq("h8")].held_by_white);
    }

    #[test]
    fn test_pin_through_single_piece() {
        // Bishop b5 pins the knight on d7 against the king on e8.
        let board = board("4k3/3n4/8/1B6/8/8/8/4K3 b - - 0 1");

        assert!(board[sq("d7")].pinned_by_white);
        assert!(board.valid_moves()[&sq("d7")].is_empty());
    }

    #[test]
    fn test_no_pin_through_two_pieces() {
        let board = board("4k3/3n4/2p5/1B6/8/8/8/4K3 b - - 0 1");

        assert!(!board[sq("c6")].pinned_by_white);
        assert!(!board[sq("d7")].pinned_by_white);
        assert!(!board.valid_moves()[&sq("d7")].is_empty());
    }

    #[test]
    fn test_moves_step_then_capture() {
        let board = board("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1");
        let moves = &board.valid_moves()[&sq("d4")];

        for target in ["c4", "b4", "e4", "f4", "d1", "d8"] {
            assert!(moves.contains(&sq(target)), "missing {target}");
        }
        assert!(!moves.contains(&sq("a4")));
        assert!(!moves.contains(&sq("g4")));
    }
}
