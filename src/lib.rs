//! Move-ordering core of a Gomoku/Renju engine.
//!
//! The centerpiece is [`MovePicker`]: a staged picker that selects which
//! subset of the legal moves to generate from the board's per-cell threat
//! classification, scores and partially sorts them, and streams them one
//! at a time to the search. The supporting subsystems (board with
//! incremental [`Pattern4`] classification, pattern-driven move
//! generation, history statistics, the policy-evaluation seam) live
//! alongside it.

pub mod board;
pub mod eval;
pub mod movegen;
pub mod search;
pub mod types;

pub use board::{Board, Cell, DiagramError};
pub use eval::{PolicyBuffer, PolicyEvaluator};
pub use movegen::{
    generate, generate_neighbors, validate_opponent_c_move, GenType, MoveBuffer, ScoredMove,
    VcfKind, MAX_MOVES, RANGE_SQUARE2_LINE4,
};
pub use search::history::{
    ContinuationHistory, CounterMoveHistory, HistoryKind, MainHistory, MoveHistory, StatsEntry,
};
pub use search::move_picker::{fast_partial_sort, MovePicker, PickStrategy};
pub use types::{Color, Depth, Pattern4, Pos, Rule, Score, DEPTH_QVCF_FULL, MAX_PLY};
