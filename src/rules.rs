/// Switches for the known gaps of the ray-based legality heuristics.
///
/// The default keeps every gap as-is. [`Rules::strict`] closes all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    /// `can_castle` also requires the matching `available_castles` flag.
    pub castling_rights: bool,
    /// `can_castle` also requires the king not to be in check and the squares
    /// it crosses or lands on not to be held by the opponent.
    pub castling_safety: bool,
    /// With two distinct checkers only the king may move.
    pub double_check: bool,
    /// Sliders hold a friendly blocker (it is defended) and keep holding past
    /// the king they check.
    pub slider_xray: bool,
}

impl Rules {
    pub const fn strict() -> Self {
        Self {
            castling_rights: true,
            castling_safety: true,
            double_check: true,
            slider_xray: true,
        }
    }
}
