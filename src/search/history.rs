//! History statistics for move ordering.
//!
//! The search records move successes and failures here; the move picker
//! only reads. Tables are keyed by color and the dense cell index.
//!
//! - [`MainHistory`]: `[color][pos][attack|quiet] -> score`
//! - [`CounterMoveHistory`]: `[color][prev pos] -> (reply, reply pattern)`
//! - [`MoveHistory`] / [`ContinuationHistory`]: per-ply reply tables,
//!   reserved for future scoring

use crate::types::{Color, Pattern4, Pos};

/// Bound for main-history entries.
pub const MAIN_HISTORY_LIMIT: i32 = 7183;

/// Bound for continuation-history entries.
pub const MOVE_HISTORY_LIMIT: i32 = 30000;

/// One bounded history entry.
///
/// Update rule: `entry += clamp(bonus, -D, D) - entry * |clamp(bonus)| / D`,
/// which converges to `D` under repeated maximal bonuses and decays
/// toward zero otherwise.
#[derive(Clone, Copy)]
pub struct StatsEntry<const D: i32> {
    value: i16,
}

impl<const D: i32> Default for StatsEntry<D> {
    fn default() -> Self {
        Self { value: 0 }
    }
}

impl<const D: i32> StatsEntry<D> {
    #[inline]
    pub fn get(&self) -> i16 {
        self.value
    }

    #[inline]
    pub fn set(&mut self, v: i16) {
        self.value = v;
    }

    #[inline]
    pub fn update(&mut self, bonus: i32) {
        let clamped = bonus.clamp(-D, D);
        let delta = clamped - (self.value as i32) * clamped.abs() / D;
        self.value = (self.value as i32 + delta) as i16;
        debug_assert!(
            (self.value as i32).abs() <= D,
            "StatsEntry out of range: {} (D={})",
            self.value,
            D
        );
    }
}

/// Which half of the main history a lookup reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HistoryKind {
    /// The move carried a direct threat when it was played.
    Attack = 0,
    /// Quiet move.
    Quiet = 1,
}

impl HistoryKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Main (butterfly-style) history: `[color][pos][kind] -> score`.
pub struct MainHistory {
    table: Box<[[[StatsEntry<MAIN_HISTORY_LIMIT>; 2]; Pos::NUM]; Color::NUM]>,
}

impl MainHistory {
    pub fn new() -> Self {
        Self {
            table: Box::new([[[StatsEntry::default(); 2]; Pos::NUM]; Color::NUM]),
        }
    }

    #[inline]
    pub fn get(&self, color: Color, pos: Pos, kind: HistoryKind) -> i16 {
        self.table[color.index()][pos.move_index()][kind.index()].get()
    }

    #[inline]
    pub fn update(&mut self, color: Color, pos: Pos, kind: HistoryKind, bonus: i32) {
        self.table[color.index()][pos.move_index()][kind.index()].update(bonus);
    }

    /// Test-only backdoor to pin exact table values.
    #[cfg(test)]
    pub(crate) fn set_raw(&mut self, color: Color, pos: Pos, kind: HistoryKind, value: i16) {
        self.table[color.index()][pos.move_index()][kind.index()].set(value);
    }

    pub fn clear(&mut self) {
        for color_table in self.table.iter_mut() {
            for pos_table in color_table.iter_mut() {
                for entry in pos_table.iter_mut() {
                    entry.set(0);
                }
            }
        }
    }
}

impl Default for MainHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Best reply to an opponent move: `[opponent color][prev pos] ->
/// (reply, pattern the reply had when recorded)`.
pub struct CounterMoveHistory {
    table: Box<[[(Pos, Pattern4); Pos::NUM]; Color::NUM]>,
}

impl CounterMoveHistory {
    pub fn new() -> Self {
        Self {
            table: Box::new([[(Pos::NONE, Pattern4::None); Pos::NUM]; Color::NUM]),
        }
    }

    #[inline]
    pub fn get(&self, color: Color, prev_move_index: usize) -> (Pos, Pattern4) {
        self.table[color.index()][prev_move_index]
    }

    #[inline]
    pub fn set(&mut self, color: Color, prev_move_index: usize, reply: Pos, pattern: Pattern4) {
        self.table[color.index()][prev_move_index] = (reply, pattern);
    }

    pub fn clear(&mut self) {
        for color_table in self.table.iter_mut() {
            color_table.fill((Pos::NONE, Pattern4::None));
        }
    }
}

impl Default for CounterMoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-cell reply history used as one continuation-history slice.
pub struct MoveHistory {
    table: Box<[StatsEntry<MOVE_HISTORY_LIMIT>; Pos::NUM]>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self {
            table: Box::new([StatsEntry::default(); Pos::NUM]),
        }
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> i16 {
        self.table[pos.move_index()].get()
    }

    #[inline]
    pub fn update(&mut self, pos: Pos, bonus: i32) {
        self.table[pos.move_index()].update(bonus);
    }

    pub fn clear(&mut self) {
        for entry in self.table.iter_mut() {
            entry.set(0);
        }
    }
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Continuation history: one [`MoveHistory`] per previous move cell. The
/// search stacks borrowed slices of these per ply; the picker accepts the
/// slices but currently applies no contribution.
pub struct ContinuationHistory {
    table: Box<[MoveHistory; Pos::NUM]>,
}

impl ContinuationHistory {
    pub fn new() -> Self {
        Self {
            table: Box::new(std::array::from_fn(|_| MoveHistory::new())),
        }
    }

    #[inline]
    pub fn get_table(&self, prev: Pos) -> &MoveHistory {
        &self.table[prev.move_index()]
    }

    #[inline]
    pub fn get_table_mut(&mut self, prev: Pos) -> &mut MoveHistory {
        &mut self.table[prev.move_index()]
    }

    pub fn clear(&mut self) {
        for t in self.table.iter_mut() {
            t.clear();
        }
    }
}

impl Default for ContinuationHistory {
    fn default() -> Self {
        Self::new()
    }
}
