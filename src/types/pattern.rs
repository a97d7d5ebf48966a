//! Per-cell threat classification.

/// Classification of the strongest threat a move at a cell would create
/// for one color.
///
/// Variants are ordered: a larger discriminant is a stronger immediate
/// threat. Move generation and TT-move validation rely on this ordering,
/// so the ladder is pinned by compile-time asserts below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Pattern4 {
    /// No meaningful threat.
    #[default]
    None = 0,
    /// One open two.
    LFlex2,
    /// One closed three.
    KBlock3,
    /// Two open twos.
    JFlex22,
    /// Closed three plus another small threat.
    IBlock3Plus,
    /// One open three.
    HFlex3,
    /// Open three plus a small threat.
    GFlex3Plus,
    /// Double open three.
    FFlex32x,
    /// Renju-illegal point for Black (overline, double-four or
    /// double-three). Provisional at classification time; the board's
    /// forbidden-point check gives the authoritative answer.
    Forbid,
    /// One closed four.
    EBlock4,
    /// Closed four plus a small threat.
    DBlock4Plus,
    /// Closed four plus open three.
    CBlock4Flex3,
    /// Makes an open four (or a double four).
    BFlex4,
    /// Makes five.
    AFive,
}

impl Pattern4 {
    /// Number of classification values.
    pub const NUM: usize = Pattern4::AFive as usize + 1;

    /// Index for pattern-keyed tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

// The move picker encodes threat strength comparisons directly on the
// discriminants; keep the documented order locked in.
const _: () = {
    assert!((Pattern4::AFive as u8) > (Pattern4::BFlex4 as u8));
    assert!((Pattern4::BFlex4 as u8) > (Pattern4::CBlock4Flex3 as u8));
    assert!((Pattern4::CBlock4Flex3 as u8) > (Pattern4::DBlock4Plus as u8));
    assert!((Pattern4::DBlock4Plus as u8) > (Pattern4::EBlock4 as u8));
    assert!((Pattern4::EBlock4 as u8) > (Pattern4::Forbid as u8));
    assert!((Pattern4::Forbid as u8) > (Pattern4::HFlex3 as u8));
    assert!((Pattern4::HFlex3 as u8) > (Pattern4::None as u8));
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_threat_strength() {
        assert!(Pattern4::AFive > Pattern4::BFlex4);
        assert!(Pattern4::EBlock4 > Pattern4::Forbid);
        assert!(Pattern4::Forbid > Pattern4::HFlex3);
        assert!(Pattern4::HFlex3 > Pattern4::KBlock3);
        assert_eq!(Pattern4::NUM, 14);
    }
}
