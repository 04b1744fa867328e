//! The tile grid and everything computed on top of it.
//!
//! A [`Board`] owns 64 [`Tile`]s and the game bookkeeping (turn, castling
//! availability, en-passant target, clocks). Every ply the caller runs
//! [`Board::compute_moves`], reads the published move map and check state,
//! and then applies a move with [`Board::make_move`] or [`Board::castle`].

mod apply;
mod castle;
mod fen;
mod generate;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use shakmaty::{ByColor, CastlingSide, Color, Role};

use crate::error::Error;
use crate::piece::Piece;
use crate::rules::Rules;
use crate::square::{SIZE, Square};
use crate::tile::Tile;

pub use castle::{king_destination, rook_home};

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
}

impl Outcome {
    #[inline]
    pub fn winner(self) -> Color {
        match self {
            Outcome::Checkmate { winner } => winner,
        }
    }
}

const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// An 8×8 chess board with per-square annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major, row 0 is rank 8.
    tiles: [[Tile; SIZE as usize]; SIZE as usize],
    turn: Color,
    /// `[queenside, kingside]` per color.
    available_castles: ByColor<[bool; 2]>,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_clock: u32,
    color_in_check: Option<Color>,
    checks: Vec<Square>,
    valid_moves: BTreeMap<Square, Vec<Square>>,
    valid_castles: Vec<Square>,
    outcome: Option<Outcome>,
    rules: Rules,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub(crate) const fn side_index(side: CastlingSide) -> usize {
    match side {
        CastlingSide::QueenSide => 0,
        CastlingSide::KingSide => 1,
    }
}

impl Board {
    /// The standard starting position with the default rules, moves already
    /// computed.
    #[inline]
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    /// The standard starting position under `rules`.
    pub fn with_rules(rules: Rules) -> Self {
        let mut board = Self::empty(rules);
        for (x, role) in BACK_RANK.into_iter().enumerate() {
            let x = x as i8;
            board.put(Piece::new(role, Color::Black, Square::new(x, 0)));
            board.put(Piece::new(Role::Pawn, Color::Black, Square::new(x, 1)));
            board.put(Piece::new(Role::Pawn, Color::White, Square::new(x, 6)));
            board.put(Piece::new(role, Color::White, Square::new(x, 7)));
        }
        board.available_castles = ByColor {
            white: [true, true],
            black: [true, true],
        };
        board.compute_moves();
        board
    }

    /// A board with no pieces, White to move and no castling rights.
    pub(crate) fn empty(rules: Rules) -> Self {
        Self {
            tiles: [[Tile::default(); SIZE as usize]; SIZE as usize],
            turn: Color::White,
            available_castles: ByColor {
                white: [false, false],
                black: [false, false],
            },
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
            color_in_check: None,
            checks: Vec::new(),
            valid_moves: BTreeMap::new(),
            valid_castles: Vec::new(),
            outcome: None,
            rules,
        }
    }

    /// Place `piece` on the tile at its own position.
    fn put(&mut self, piece: Piece) {
        self[piece.pos].piece = Some(piece);
    }

    /// The tile at `square`, or `None` off the board.
    #[inline]
    pub fn tile(&self, square: Square) -> Option<&Tile> {
        square
            .is_valid()
            .then(|| &self.tiles[square.y as usize][square.x as usize])
    }

    #[inline]
    pub fn tile_mut(&mut self, square: Square) -> Option<&mut Tile> {
        if square.is_valid() {
            Some(&mut self.tiles[square.y as usize][square.x as usize])
        } else {
            None
        }
    }

    /// The piece standing on `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.tile(square).and_then(|tile| tile.piece)
    }

    /// All pieces, top row first.
    pub fn pieces(&self) -> Vec<Piece> {
        self.tiles
            .iter()
            .flatten()
            .filter_map(|tile| tile.piece)
            .collect()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .into_iter()
            .find(|piece| piece.color == color && piece.role == Role::King)
            .map(|piece| piece.pos)
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Whether `color` may still castle on `side` (king and rook unmoved).
    #[inline]
    pub fn available_castle(&self, color: Color, side: CastlingSide) -> bool {
        self.available_castles.get(color)[side_index(side)]
    }

    /// The en-passant target in algebraic notation, valid for one ply.
    pub fn en_passant_target(&self) -> Option<String> {
        self.en_passant_target.map(Square::to_notation)
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_clock(&self) -> u32 {
        self.fullmove_clock
    }

    #[inline]
    pub fn color_in_check(&self) -> Option<Color> {
        self.color_in_check
    }

    /// Squares of the pieces giving check, in discovery order.
    #[inline]
    pub fn checks(&self) -> &[Square] {
        &self.checks
    }

    /// Destinations per occupied square, as of the last generation pass.
    #[inline]
    pub fn valid_moves(&self) -> &BTreeMap<Square, Vec<Square>> {
        &self.valid_moves
    }

    /// Destinations of the piece on `from`; empty for unknown squares.
    pub fn moves_from(&self, from: Square) -> &[Square] {
        self.valid_moves.get(&from).map_or(&[], Vec::as_slice)
    }

    /// King destinations for the selected king, see [`Board::select`].
    #[inline]
    pub fn valid_castles(&self) -> &[Square] {
        &self.valid_castles
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Append `to` to the move list of `from`, once.
    pub(crate) fn add_move(&mut self, from: Square, to: Square) {
        let moves = self.valid_moves.entry(from).or_default();
        if !moves.contains(&to) {
            moves.push(to);
        }
    }

    /// Put the opponent of `checker` in check.
    pub(crate) fn record_check(&mut self, checker: Piece) {
        self.color_in_check = Some(!checker.color);
        if !self.checks.contains(&checker.pos) {
            self.checks.push(checker.pos);
        }
    }

    fn game_over(&self) -> Result<(), Error> {
        match self.outcome {
            Some(outcome) => Err(Error::GameOver {
                winner: outcome.winner(),
            }),
            None => Ok(()),
        }
    }
}

/// Panics on off-board squares; use [`Board::tile`] for unchecked input.
impl Index<Square> for Board {
    type Output = Tile;

    fn index(&self, square: Square) -> &Tile {
        self.tile(square)
            .unwrap_or_else(|| panic!("square off the board: {square}"))
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, square: Square) -> &mut Tile {
        self.tile_mut(square)
            .unwrap_or_else(|| panic!("square off the board: {square}"))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.tiles.iter().enumerate() {
            write!(f, "{} ", SIZE - y as i8)?;
            for tile in row {
                match tile.piece {
                    Some(piece) => write!(f, " {}", piece.char())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
