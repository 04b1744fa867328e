use super::Piece;
use crate::board::Board;
use crate::square::Square;

const KNIGHT_OFFSETS: [Square; 8] = [
    Square::new(1, 2),
    Square::new(2, 1),
    Square::new(-1, 2),
    Square::new(-2, 1),
    Square::new(1, -2),
    Square::new(2, -1),
    Square::new(-1, -2),
    Square::new(-2, -1),
];

const KING_OFFSETS: [Square; 8] = [
    Square::new(1, 0),
    Square::new(-1, 0),
    Square::new(0, 1),
    Square::new(0, -1),
    Square::new(1, 1),
    Square::new(1, -1),
    Square::new(-1, 1),
    Square::new(-1, -1),
];

pub(super) fn knight_holds(piece: Piece, board: &mut Board) {
    for offset in KNIGHT_OFFSETS {
        piece.hold(board, piece.pos + offset);
    }
}

pub(super) fn knight_moves(piece: Piece, board: &mut Board) {
    for offset in KNIGHT_OFFSETS {
        let target = piece.pos + offset;
        piece.seek_move(board, target);
        piece.seek_check(board, target);
    }
}

pub(super) fn king_holds(piece: Piece, board: &mut Board) {
    for offset in KING_OFFSETS {
        piece.hold(board, piece.pos + offset);
    }
}

pub(super) fn king_moves(piece: Piece, board: &mut Board) {
    for offset in KING_OFFSETS {
        piece.seek_move(board, piece.pos + offset);
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::Color;

    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn board(fen: &str) -> Board {
        fen.parse().expect("valid FEN")
    }

    #[test]
    fn test_knight_holds_all_targets_regardless_of_occupancy() {
        let board = Board::new();
        // b1 knight: a3, c3 empty, d2 own pawn.
        assert!(board[sq("a3")].held_by_white);
        assert!(board[sq("c3")].held_by_white);
        assert!(board[sq("d2")].held_by_white);
    }

    #[test]
    fn test_knight_in_corner_moves() {
        let board = board("4k3/8/8/8/8/8/8/N3K3 w - - 0 1");
        let mut moves = board.valid_moves()[&sq("a1")].clone();
        moves.sort();
        let mut expected = vec![sq("b3"), sq("c2")];
        expected.sort();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_knight_check_is_recorded_once() {
        let board = board("4k3/8/3N4/8/8/8/8/4K3 b - - 0 1");

        assert_eq!(board.color_in_check(), Some(Color::Black));
        assert_eq!(board.checks(), &[sq("d6")]);

        let knight_moves = &board.valid_moves()[&sq("d6")];
        let captures = knight_moves.iter().filter(|&&t| t == sq("e8")).count();
        assert_eq!(captures, 1, "destination lists behave as sets");
    }

    #[test]
    fn test_king_holds_neighbours() {
        let board = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        for name in ["d1", "d2", "e2", "f2", "f1"] {
            assert!(board[sq(name)].held_by_white, "{name}");
        }
        for name in ["d8", "d7", "e7", "f7", "f8"] {
            assert!(board[sq(name)].held_by_black, "{name}");
        }
    }

    #[test]
    fn test_kings_keep_their_distance() {
        // The black king on e3 holds d2, e2 and f2.
        let board = board("8/8/8/8/8/4k3/8/4K3 w - - 0 1");
        let moves = &board.valid_moves()[&sq("e1")];

        assert!(!moves.contains(&sq("d2")));
        assert!(!moves.contains(&sq("e2")));
        assert!(!moves.contains(&sq("f2")));
        assert!(moves.contains(&sq("d1")));
        assert!(moves.contains(&sq("f1")));
    }
}
