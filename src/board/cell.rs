//! Aggregate view of one board square.

use crate::types::{Color, Pattern4, Score};

/// Classification and static score of an empty cell, one entry per color.
///
/// Occupied cells keep the default (no threat, zero score) value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cell {
    pattern4: [Pattern4; Color::NUM],
    score: [Score; Color::NUM],
}

impl Cell {
    #[inline]
    pub(crate) const fn from_parts(
        pattern4: [Pattern4; Color::NUM],
        score: [Score; Color::NUM],
    ) -> Cell {
        Cell { pattern4, score }
    }

    /// Strongest threat a `color` move at this cell would create.
    #[inline]
    pub fn pattern4(&self, color: Color) -> Pattern4 {
        self.pattern4[color.index()]
    }

    /// Static ordering score of a `color` move at this cell.
    #[inline]
    pub fn score(&self, color: Color) -> Score {
        self.score[color.index()]
    }
}
