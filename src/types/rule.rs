//! Game rule variants.

/// Rule set the engine is playing under.
///
/// Only `Renju` has forbidden points, and only for Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Five or more in a row wins, for either color.
    Freestyle,
    /// Exactly five in a row wins; overlines count for nobody.
    Standard,
    /// Exactly five for Black (overline is forbidden), five or more for
    /// White. Black may not make double-fours or double-threes.
    Renju,
}

impl Rule {
    /// Whether this rule has forbidden points for `color`.
    #[inline]
    pub const fn has_forbidden_points(self, color: super::Color) -> bool {
        matches!(self, Rule::Renju) && matches!(color, super::Color::Black)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Freestyle => write!(f, "freestyle"),
            Rule::Standard => write!(f, "standard"),
            Rule::Renju => write!(f, "renju"),
        }
    }
}
