use log::{debug, info};

use super::{Board, Outcome};
use crate::square::Square;

impl Board {
    /// Clear holds, pins and the check path on every tile.
    fn reset_tiles(&mut self) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.reset(false, false);
        }
    }

    pub(crate) fn reset_en_passants(&mut self) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.reset_en_passant();
        }
    }

    /// Recompute attacked squares, pins and checks for both colors.
    ///
    /// This is the first half of [`Board::compute_moves`]; it is also run
    /// on its own after castling.
    pub fn compute_holds(&mut self) {
        self.reset_tiles();
        self.color_in_check = None;
        self.checks.clear();
        for piece in self.pieces() {
            piece.holds(self);
        }
    }

    /// Run a full generation pass.
    ///
    /// Holds are computed for every piece before any move, so king safety
    /// and pins always see the opponent's complete attack map. Afterwards
    /// pinned pieces lose their moves and, if a king is in check, the moves
    /// of its side are cut down to blocks and captures of the checker.
    pub fn compute_moves(&mut self) {
        self.valid_moves = self
            .pieces()
            .into_iter()
            .map(|piece| (piece.pos, Vec::new()))
            .collect();
        self.compute_holds();

        for piece in self.pieces() {
            piece.moves(self);
        }

        // The marker only lives for the pass that follows the double step.
        self.reset_en_passants();

        self.filter_pins();
        if self.color_in_check.is_some() {
            self.filter_check();
            self.detect_checkmate();
        }

        debug!(
            "generated {} moves for {} pieces, in check: {:?}",
            self.valid_moves.values().map(Vec::len).sum::<usize>(),
            self.valid_moves.len(),
            self.color_in_check
        );
    }

    /// Absolute pins: a piece pinned by the opponent may not move at all.
    fn filter_pins(&mut self) {
        for piece in self.pieces() {
            if self[piece.pos].pinned_by(!piece.color)
                && let Some(moves) = self.valid_moves.get_mut(&piece.pos)
            {
                moves.clear();
            }
        }
    }

    /// Restrict the checked side to capturing `checks[0]` or blocking its
    /// path. The king keeps its own moves; it already avoids held squares.
    fn filter_check(&mut self) {
        let Some(color) = self.color_in_check else {
            return;
        };
        let Some(&checker) = self.checks.first() else {
            return;
        };
        let king = self.king_square(color);
        let king_only = self.rules.double_check && self.checks.len() > 1;

        let defenders: Vec<Square> = self
            .pieces()
            .into_iter()
            .filter(|piece| piece.color == color && Some(piece.pos) != king)
            .map(|piece| piece.pos)
            .collect();

        for from in defenders {
            let Some(moves) = self.valid_moves.get(&from) else {
                continue;
            };
            let kept: Vec<Square> = if king_only {
                Vec::new()
            } else {
                moves
                    .iter()
                    .copied()
                    .filter(|&to| to == checker || self[to].in_check_path)
                    .collect()
            };
            self.valid_moves.insert(from, kept);
        }
    }

    /// In check with nothing left to play ends the game.
    fn detect_checkmate(&mut self) {
        let Some(color) = self.color_in_check else {
            return;
        };
        let stuck = self
            .valid_moves
            .iter()
            .filter(|(from, _)| self.piece_at(**from).is_some_and(|p| p.color == color))
            .all(|(_, moves)| moves.is_empty());

        if stuck {
            let winner = !color;
            info!("checkmate, {winner:?} wins");
            self.outcome = Some(Outcome::Checkmate { winner });
        }
    }

    /// Squares currently marked for en passant.
    pub fn en_passant_marks(&self) -> Vec<Square> {
        Square::all()
            .filter(|&square| self[square].marked_for_en_passant)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::Color;

    use super::*;
    use crate::rules::Rules;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn board(fen: &str) -> Board {
        fen.parse().expect("valid FEN")
    }

    #[test]
    fn test_every_occupied_square_has_an_entry() {
        let board = Board::new();
        assert_eq!(board.valid_moves().len(), 32);
        for piece in board.pieces() {
            assert!(board.valid_moves().contains_key(&piece.pos));
        }
        // Rooks are boxed in at the start.
        assert!(board.moves_from(sq("a1")).is_empty());
    }

    #[test]
    fn test_start_position_has_twenty_white_moves() {
        let board = Board::new();
        let white: usize = board
            .pieces()
            .iter()
            .filter(|p| p.color == Color::White)
            .map(|p| board.moves_from(p.pos).len())
            .sum();
        assert_eq!(white, 20);
    }

    #[test]
    fn test_check_restricts_to_block_or_capture() {
        // Rook a8 checks the king on h8. The knight on f6 can block on e8
        // or g8; the bishop on c6 can block on e8 or take the rook.
        let board = board("R6k/8/2b2n2/8/8/8/8/K7 b - - 0 1");

        assert_eq!(board.color_in_check(), Some(Color::Black));
        for &to in board.moves_from(sq("f6")) {
            assert!(board[to].in_check_path, "{to} should block");
        }
        assert!(board.moves_from(sq("f6")).contains(&sq("e8")));
        assert!(board.moves_from(sq("f6")).contains(&sq("g8")));
        let mut bishop = board.moves_from(sq("c6")).to_vec();
        bishop.sort();
        assert_eq!(bishop, vec![sq("a8"), sq("e8")]);
        assert!(board.outcome().is_none());
    }

    #[test]
    fn test_check_allows_capturing_checker() {
        let board = board_with_knight_check();
        assert_eq!(board.moves_from(sq("b1")), &[sq("c3")]);
    }

    fn board_with_knight_check() -> Board {
        // Knight c3 checks the king on e2; the knight on b1 can take it.
        board("4k3/8/8/8/8/2n5/4K3/1N6 w - - 0 1")
    }

    #[test]
    fn test_king_moves_survive_check_filter() {
        let board = board_with_knight_check();
        let king_moves = board.moves_from(sq("e2"));
        assert!(!king_moves.is_empty());
        assert!(!king_moves.contains(&sq("d1")), "d1 is held by the knight");
    }

    #[test]
    fn test_opponent_lists_untouched_by_check_filter() {
        let board = board_with_knight_check();
        assert!(board.moves_from(sq("e8")).len() > 1);
    }

    #[test]
    fn test_back_rank_mate() {
        let board = board("R6k/6pp/8/8/8/8/8/K7 b - - 0 1");
        assert_eq!(
            board.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::White
            })
        );
    }

    #[test]
    fn test_king_steps_back_along_ray_without_xray() {
        // h8 sits behind the king on the checking rank.
        let fen = "R5k1/5ppp/8/8/8/8/8/K7 b - - 0 1";

        let loose = board(fen);
        assert_eq!(loose.moves_from(sq("g8")), &[sq("h8")]);
        assert!(loose.outcome().is_none());

        let strict = Board::from_fen_with_rules(fen, Rules::strict()).unwrap();
        assert!(strict.moves_from(sq("g8")).is_empty());
        assert_eq!(strict.outcome().map(Outcome::winner), Some(Color::White));
    }

    #[test]
    fn test_smothered_mate() {
        let board = board("6rk/5Npp/8/8/8/8/8/K7 b - - 0 1");
        assert_eq!(board.color_in_check(), Some(Color::Black));
        assert_eq!(board.outcome().map(Outcome::winner), Some(Color::White));
    }

    #[test]
    fn test_double_check_single_checker_filter() {
        // Rook e1 and bishop b5 both check the king on e8. The default
        // filter only looks at the first checker found.
        let fen = "4k3/8/8/1B6/8/8/3r4/K3R3 b - - 0 1";
        let loose = board(fen);
        assert_eq!(loose.checks().len(), 2);

        let strict = Board::from_fen_with_rules(fen, Rules {
            double_check: true,
            ..Rules::default()
        })
        .unwrap();
        assert!(strict.moves_from(sq("d2")).is_empty());
        assert!(!strict.moves_from(sq("e8")).is_empty());
    }

    #[test]
    fn test_en_passant_marker_consumed_by_generation() {
        let board = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(board.en_passant_marks().is_empty());
        assert_eq!(board.en_passant_target().as_deref(), Some("d6"));
    }
}
