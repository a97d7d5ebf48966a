//! Line-based threat classification.
//!
//! A cell's threat for one color is ranked per direction on a radius-4
//! window by completion counting: a line is a four when one more stone
//! makes a five, a three when one more stone makes an open four, and so
//! on down to twos. Direction ranks then combine into the [`Pattern4`]
//! ladder. Rule differences (five-or-more vs. exact five, Renju overlines)
//! live entirely in the five test at the bottom.

use crate::types::{Color, Pattern4, Rule, Score};

/// The four scan directions.
pub(crate) const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Cells observed along a scan line, relative to the color being ranked.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Slot {
    Own,
    Opp,
    Empty,
    Wall,
}

/// Window length: the center cell plus four to each side.
pub(crate) const WINDOW: usize = 9;
const CENTER: usize = 4;

/// Threat rank of a single direction, weakest to strongest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub(crate) enum DirRank {
    Dead,
    Block2,
    Flex2,
    Block3,
    Flex3,
    Block4,
    Flex4,
    Five,
    /// Six or more in a row. Only reported for Black under Renju; other
    /// rule/color combinations fold it into `Five` or ignore it.
    Overline,
}

/// Length of the contiguous own-stone run through the center.
fn run_through_center(line: &[Slot; WINDOW]) -> usize {
    debug_assert!(line[CENTER] == Slot::Own);
    let mut len = 1;
    let mut i = CENTER;
    while i > 0 && line[i - 1] == Slot::Own {
        i -= 1;
        len += 1;
    }
    let mut j = CENTER;
    while j + 1 < WINDOW && line[j + 1] == Slot::Own {
        j += 1;
        len += 1;
    }
    len
}

/// Whether the line as it stands wins through the center.
fn five_state(line: &[Slot; WINDOW], rule: Rule, color: Color) -> Option<DirRank> {
    let len = run_through_center(line);
    match (rule, color) {
        (Rule::Freestyle, _) | (Rule::Renju, Color::White) => {
            (len >= 5).then_some(DirRank::Five)
        }
        (Rule::Standard, _) => (len == 5).then_some(DirRank::Five),
        (Rule::Renju, Color::Black) => match len {
            5 => Some(DirRank::Five),
            6.. => Some(DirRank::Overline),
            _ => None,
        },
    }
}

/// Number of empty slots whose occupation completes a five through the
/// center. Overline completions do not count for Renju Black.
pub(crate) fn five_completions(line: &[Slot; WINDOW], rule: Rule, color: Color) -> u32 {
    let mut n = 0;
    for i in 0..WINDOW {
        if line[i] == Slot::Empty {
            let mut next = *line;
            next[i] = Slot::Own;
            if five_state(&next, rule, color) == Some(DirRank::Five) {
                n += 1;
            }
        }
    }
    n
}

/// Rank one direction of a hypothetical move (the center slot is the
/// move being ranked and must be `Own`).
pub(crate) fn dir_rank(line: &[Slot; WINDOW], rule: Rule, color: Color) -> DirRank {
    if let Some(win) = five_state(line, rule, color) {
        return win;
    }

    // A lone stone cannot rank above Dead; skip the completion search.
    if !line
        .iter()
        .enumerate()
        .any(|(i, &s)| i != CENTER && s == Slot::Own)
    {
        return DirRank::Dead;
    }

    let n5 = five_completions(line, rule, color);
    if n5 >= 2 {
        return DirRank::Flex4;
    }
    if n5 == 1 {
        return DirRank::Block4;
    }

    let mut makes_flex4 = false;
    let mut makes_block4 = false;
    for i in 0..WINDOW {
        if line[i] != Slot::Empty {
            continue;
        }
        let mut next = *line;
        next[i] = Slot::Own;
        if five_state(&next, rule, color).is_some() {
            continue;
        }
        match five_completions(&next, rule, color) {
            2.. => makes_flex4 = true,
            1 => makes_block4 = true,
            0 => {}
        }
    }
    if makes_flex4 {
        return DirRank::Flex3;
    }
    if makes_block4 {
        return DirRank::Block3;
    }

    let mut makes_flex3 = false;
    let mut makes_block3 = false;
    for i in 0..WINDOW {
        if line[i] != Slot::Empty {
            continue;
        }
        let mut mid = *line;
        mid[i] = Slot::Own;
        for j in 0..WINDOW {
            if mid[j] != Slot::Empty {
                continue;
            }
            let mut next = mid;
            next[j] = Slot::Own;
            if five_state(&next, rule, color).is_some() {
                continue;
            }
            match five_completions(&next, rule, color) {
                2.. => makes_flex3 = true,
                1 => makes_block3 = true,
                0 => {}
            }
        }
        if makes_flex3 {
            break;
        }
    }
    if makes_flex3 {
        return DirRank::Flex2;
    }
    if makes_block3 {
        return DirRank::Block2;
    }
    DirRank::Dead
}

/// Fold four direction ranks into a cell classification.
pub(crate) fn combine(ranks: &[DirRank; 4], rule: Rule, color: Color) -> Pattern4 {
    let mut five = 0;
    let mut overline = 0;
    let mut f4 = 0;
    let mut b4 = 0;
    let mut f3 = 0;
    let mut b3 = 0;
    let mut f2 = 0;
    for &r in ranks {
        match r {
            DirRank::Five => five += 1,
            DirRank::Overline => overline += 1,
            DirRank::Flex4 => f4 += 1,
            DirRank::Block4 => b4 += 1,
            DirRank::Flex3 => f3 += 1,
            DirRank::Block3 => b3 += 1,
            DirRank::Flex2 => f2 += 1,
            DirRank::Block2 | DirRank::Dead => {}
        }
    }

    // A five always takes precedence, even on a Renju forbidden shape.
    if five > 0 {
        return Pattern4::AFive;
    }
    if rule.has_forbidden_points(color) && (overline > 0 || f4 + b4 >= 2 || f3 >= 2) {
        // Provisional: double-threes still need live-three validation,
        // which the board's forbidden-point check performs.
        return Pattern4::Forbid;
    }
    if f4 >= 1 || b4 >= 2 {
        return Pattern4::BFlex4;
    }
    if b4 == 1 {
        return if f3 >= 1 {
            Pattern4::CBlock4Flex3
        } else if b3 >= 1 || f2 >= 1 {
            Pattern4::DBlock4Plus
        } else {
            Pattern4::EBlock4
        };
    }
    if f3 >= 2 {
        return Pattern4::FFlex32x;
    }
    if f3 == 1 {
        return if b3 >= 1 || f2 >= 1 {
            Pattern4::GFlex3Plus
        } else {
            Pattern4::HFlex3
        };
    }
    if b3 >= 2 || (b3 == 1 && f2 >= 1) {
        return Pattern4::IBlock3Plus;
    }
    if f2 >= 2 {
        return Pattern4::JFlex22;
    }
    if b3 == 1 {
        return Pattern4::KBlock3;
    }
    if f2 == 1 {
        return Pattern4::LFlex2;
    }
    Pattern4::None
}

/// Static score contribution of one direction rank.
const fn dir_score(rank: DirRank) -> Score {
    match rank {
        DirRank::Five => 400,
        DirRank::Overline => 0,
        DirRank::Flex4 => 330,
        DirRank::Block4 => 150,
        DirRank::Flex3 => 125,
        DirRank::Block3 => 50,
        DirRank::Flex2 => 35,
        DirRank::Block2 => 15,
        DirRank::Dead => 0,
    }
}

/// Static cell score: the sum of its direction contributions.
pub(crate) fn cell_score(ranks: &[DirRank; 4]) -> Score {
    let mut s = 0;
    for &r in ranks {
        s += dir_score(r);
    }
    s
}
