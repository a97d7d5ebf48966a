//! Move ordering score.

/// Ordering score attached to generated moves.
pub type Score = i32;

/// Sentinel used before any policy maximum is known. Half of the integer
/// minimum so that adding bounded history terms cannot underflow.
pub const SCORE_LOWEST: Score = Score::MIN / 2;
