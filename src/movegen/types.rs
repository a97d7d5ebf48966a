//! Move generation kinds and limits.

use crate::types::Rule;

/// Capacity of a move buffer: the cell count of the largest supported
/// board, so one `All` generation can never overflow.
pub const MAX_MOVES: usize = crate::types::Pos::NUM;

/// What subset of the empty cells to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenType {
    /// Moves that immediately make a five or an open four.
    Winning,
    /// The minimal set of moves preventing the opponent's immediate five.
    DefendFive,
    /// Moves defending an opponent open four.
    DefendFour,
    /// `DefendFour` widened with all remaining quiet moves.
    DefendFourAll,
    /// Rule-specific defense against a combined closed-four / open-three
    /// threat.
    DefendB4F3(Rule),
    /// Victory-by-continuous-four candidates: closed fours and forcing
    /// extensions.
    Vcf,
    /// Every legal empty cell.
    All,
}

/// Filter applied by neighborhood-restricted VCF generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcfKind {
    /// Any four-making move.
    Plain,
    /// Only fours combined with another threat; plain closed fours are
    /// excluded.
    Comb,
}
