//! Move picker internal types.

/// Move picking stages. Usual procedure: `*Tt -> *Moves -> AllMoves`.
///
/// Each TT stage yields the transposition-table move (when valid) and
/// hands over to its generation stage; `AllMoves` streams the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stage {
    MainTt,
    MainMoves,
    DefendFiveTt,
    DefendFiveMoves,
    DefendFourTt,
    DefendFourMoves,
    DefendB4f3Tt,
    DefendB4f3Moves,
    QvcfTt,
    QvcfMoves,
    AllMoves,
}

impl Stage {
    /// The generation stage paired with a TT stage. Entered directly when
    /// the TT move is invalid, so the TT yield is skipped.
    pub(crate) fn after_tt(self) -> Stage {
        match self {
            Stage::MainTt => Stage::MainMoves,
            Stage::DefendFiveTt => Stage::DefendFiveMoves,
            Stage::DefendFourTt => Stage::DefendFourMoves,
            Stage::DefendB4f3Tt => Stage::DefendB4f3Moves,
            Stage::QvcfTt => Stage::QvcfMoves,
            _ => unreachable!("after_tt on non-TT stage {self:?}"),
        }
    }
}

/// How the streaming operation selects among remaining buffer entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickStrategy {
    /// Linear scan in current buffer order. Used by the plain stream.
    Next,
    /// Select the max-scoring remaining entry on each call. For callers
    /// that want lazy top-K filtered selection without pre-sorting.
    Best,
}

/// What the scorer combines into a move's ordering key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ScoreFlags(u8);

impl ScoreFlags {
    pub(crate) const ATTACK: ScoreFlags = ScoreFlags(0b000001);
    pub(crate) const DEFEND: ScoreFlags = ScoreFlags(0b000010);
    pub(crate) const BALANCED: ScoreFlags = ScoreFlags(0b000011);
    pub(crate) const POLICY: ScoreFlags = ScoreFlags(0b000100);
    pub(crate) const MAIN_HISTORY: ScoreFlags = ScoreFlags(0b001000);
    pub(crate) const COUNTER_MOVE: ScoreFlags = ScoreFlags(0b010000);
    pub(crate) const CONT_HISTORY: ScoreFlags = ScoreFlags(0b100000);

    #[inline]
    pub(crate) const fn contains(self, other: ScoreFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ScoreFlags {
    type Output = ScoreFlags;

    #[inline]
    fn bitor(self, rhs: ScoreFlags) -> ScoreFlags {
        ScoreFlags(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_pairs() {
        assert_eq!(Stage::MainTt.after_tt(), Stage::MainMoves);
        assert_eq!(Stage::DefendFiveTt.after_tt(), Stage::DefendFiveMoves);
        assert_eq!(Stage::DefendFourTt.after_tt(), Stage::DefendFourMoves);
        assert_eq!(Stage::DefendB4f3Tt.after_tt(), Stage::DefendB4f3Moves);
        assert_eq!(Stage::QvcfTt.after_tt(), Stage::QvcfMoves);
    }

    #[test]
    fn test_flag_composition() {
        let flags = ScoreFlags::BALANCED | ScoreFlags::POLICY | ScoreFlags::MAIN_HISTORY;
        assert!(flags.contains(ScoreFlags::ATTACK));
        assert!(flags.contains(ScoreFlags::DEFEND));
        assert!(flags.contains(ScoreFlags::BALANCED));
        assert!(flags.contains(ScoreFlags::POLICY));
        assert!(!flags.contains(ScoreFlags::COUNTER_MOVE));
    }
}
