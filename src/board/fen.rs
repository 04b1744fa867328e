use std::str::FromStr;

use log::debug;
use shakmaty::fen::Fen;
use shakmaty::{CastlingSide, Color};

use super::{Board, rook_home};
use crate::error::Error;
use crate::piece::Piece;
use crate::rules::Rules;
use crate::square::Square;

impl Board {
    /// Serialize the position as a six-field FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for (y, row) in self.tiles.iter().enumerate() {
            if y > 0 {
                fen.push('/');
            }
            let mut empty = 0;
            for tile in row {
                match tile.piece {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
        }

        fen.push(' ');
        fen.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = [
            (Color::White, CastlingSide::KingSide, 'K'),
            (Color::White, CastlingSide::QueenSide, 'Q'),
            (Color::Black, CastlingSide::KingSide, 'k'),
            (Color::Black, CastlingSide::QueenSide, 'q'),
        ];
        let castling: String = rights
            .into_iter()
            .filter(|&(color, side, _)| self.available_castle(color, side))
            .map(|(_, _, letter)| letter)
            .collect();
        if castling.is_empty() {
            fen.push('-');
        } else {
            fen.push_str(&castling);
        }

        let en_passant = self
            .en_passant_target()
            .unwrap_or_else(|| "-".to_string());
        fen.push_str(&format!(
            " {en_passant} {} {}",
            self.halfmove_clock, self.fullmove_clock
        ));
        fen
    }

    /// Load a position from FEN under the default rules.
    pub fn from_fen(fen: &str) -> Result<Self, Error> {
        Self::from_fen_with_rules(fen, Rules::default())
    }

    /// Load a position from FEN and run a generation pass.
    ///
    /// Castling availability comes from the FEN rights field; the en-passant
    /// square, if any, is marked so the following pass offers the capture.
    pub fn from_fen_with_rules(fen: &str, rules: Rules) -> Result<Self, Error> {
        let setup = fen
            .trim()
            .parse::<Fen>()
            .map_err(|e| Error::InvalidFen(format!("{fen}: {e}")))?
            .into_setup();

        let mut board = Board::empty(rules);
        for square in Square::all() {
            if let Some(piece) = setup.board.piece_at(square.to_shakmaty()) {
                board[square].piece = Some(Piece::new(piece.role, piece.color, square));
            }
        }
        for color in [Color::White, Color::Black] {
            if board.king_square(color).is_none() {
                return Err(Error::InvalidFen(format!("{fen}: no {color:?} king")));
            }
        }

        board.turn = setup.turn;
        for color in [Color::White, Color::Black] {
            for side in [CastlingSide::QueenSide, CastlingSide::KingSide] {
                let corner = rook_home(color, side).to_shakmaty();
                board.available_castles.get_mut(color)[super::side_index(side)] =
                    setup.castling_rights.contains(corner);
            }
        }

        if let Some(square) = setup.ep_square {
            let target: Square = square.to_string().parse()?;
            board[target].marked_for_en_passant = true;
            board.en_passant_target = Some(target);
        }
        board.halfmove_clock = setup.halfmoves;
        board.fullmove_clock = setup.fullmoves.get();

        debug!("loaded {}", board.to_fen());
        board.compute_moves();
        Ok(board)
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}
