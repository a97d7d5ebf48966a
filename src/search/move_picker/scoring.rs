//! Move scoring for the picker.

use crate::eval::PolicyBuffer;
use crate::search::history::HistoryKind;
use crate::types::{Pattern4, Score, SCORE_LOWEST};

use super::picker::MovePicker;
use super::types::ScoreFlags;

/// Bonus for the recorded counter-move against the opponent's last move.
pub(crate) const COUNTER_MOVE_BONUS: Score = 21;

/// History is attenuated before joining the static score: attack history
/// by 2^7, quiet history by 2^8.
const MAIN_HISTORY_ATTACK_SHIFT: u32 = 7;
const MAIN_HISTORY_QUIET_SHIFT: u32 = 8;

impl<'a> MovePicker<'a> {
    /// Score the unpicked part of the buffer according to `flags`.
    ///
    /// Policy scoring replaces the static base when an evaluator is
    /// attached; history terms add to `score` only, never to
    /// `raw_score`.
    pub(super) fn score_moves(&mut self, flags: ScoreFlags) {
        let board = self.board;
        let self_side = board.side_to_move();
        let oppo = !self_side;
        let range = self.cur..self.buf.len();

        let mut policy_scored = false;
        if flags.contains(ScoreFlags::POLICY) {
            if let Some(evaluator) = board.evaluator() {
                let policy = self
                    .policy
                    .get_or_insert_with(|| PolicyBuffer::new(board.size()));
                policy.clear_flags();
                for i in range.clone() {
                    policy.set_compute_flag(self.buf[i].pos);
                }
                evaluator.evaluate_policy(board, policy);

                self.has_policy = true;
                self.max_policy_score = SCORE_LOWEST;
                for i in range.clone() {
                    let s = policy.score(self.buf[i].pos);
                    self.buf[i].score = s;
                    self.buf[i].raw_score = s;
                    self.max_policy_score = self.max_policy_score.max(s);
                }
                policy_scored = true;
            }
        }

        if !policy_scored {
            debug_assert!(
                flags.contains(ScoreFlags::ATTACK) || flags.contains(ScoreFlags::DEFEND),
                "scoring needs a static base when policy is unavailable"
            );
            for i in range.clone() {
                let cell = board.cell(self.buf[i].pos);
                let base = if flags.contains(ScoreFlags::BALANCED) {
                    cell.score(self_side)
                } else if flags.contains(ScoreFlags::ATTACK) {
                    (cell.score(self_side) * 2 + cell.score(oppo)) / 3
                } else {
                    (cell.score(self_side) + cell.score(oppo) * 2) / 3
                };
                self.buf[i].score = base;
                self.buf[i].raw_score = base;
            }
        }

        if flags.contains(ScoreFlags::MAIN_HISTORY) {
            debug_assert!(self.main_history.is_some());
            if let Some(history) = self.main_history {
                for i in range.clone() {
                    let pos = self.buf[i].pos;
                    let bonus = if board.cell(pos).pattern4(self_side) >= Pattern4::HFlex3 {
                        i32::from(history.get(self_side, pos, HistoryKind::Attack))
                            >> MAIN_HISTORY_ATTACK_SHIFT
                    } else {
                        i32::from(history.get(self_side, pos, HistoryKind::Quiet))
                            >> MAIN_HISTORY_QUIET_SHIFT
                    };
                    self.buf[i].score += bonus;
                }
            }
        }

        if flags.contains(ScoreFlags::COUNTER_MOVE) {
            debug_assert!(self.counter_move_history.is_some());
            if let Some(history) = self.counter_move_history {
                let last = board.last_move();
                if last.is_cell() && board.is_in_board(last) {
                    let (reply, reply_p4) = history.get(oppo, last.move_index());
                    for i in range.clone() {
                        let pos = self.buf[i].pos;
                        if reply == pos && reply_p4 <= board.cell(pos).pattern4(self_side) {
                            self.buf[i].score += COUNTER_MOVE_BONUS;
                        }
                    }
                }
            }
        }

        if flags.contains(ScoreFlags::CONT_HISTORY) {
            // Reserved: the capability is borrowed but contributes
            // nothing to the ordering key yet.
            debug_assert!(self.continuation_history.is_some());
        }
    }
}
