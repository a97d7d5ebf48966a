//! Move picker tests.

mod defend_tests;

use crate::board::Board;
use crate::eval::{PolicyBuffer, PolicyEvaluator};
use crate::search::move_picker::MovePicker;
use crate::types::{Pos, Score};

/// Collect every remaining yield of a picker.
fn drain(picker: &mut MovePicker) -> Vec<Pos> {
    std::iter::from_fn(|| picker.next()).collect()
}

/// Deterministic policy stub: a linear function of the coordinates.
struct LinearPolicy {
    weight_x: Score,
    weight_y: Score,
}

impl LinearPolicy {
    fn boxed(weight_x: Score, weight_y: Score) -> Box<LinearPolicy> {
        Box::new(LinearPolicy { weight_x, weight_y })
    }

    fn value(&self, pos: Pos) -> Score {
        self.weight_x * pos.x() as Score + self.weight_y * pos.y() as Score
    }
}

impl PolicyEvaluator for LinearPolicy {
    fn evaluate_policy(&self, board: &Board, buf: &mut PolicyBuffer) {
        for pos in board.iter_empty() {
            if buf.is_compute_flagged(pos) {
                buf.set_score(pos, self.value(pos));
            }
        }
    }
}
