//! Staged move picker.

use crate::board::{Board, Cell};
use crate::eval::PolicyBuffer;
use crate::movegen::{self, GenType, MoveBuffer, VcfKind};
use crate::search::history::{CounterMoveHistory, MainHistory, MoveHistory};
use crate::types::{Color, Depth, Pattern4, Pos, Rule, Score, DEPTH_QVCF_FULL, SCORE_LOWEST};

use super::sorting::fast_partial_sort;
use super::types::{PickStrategy, ScoreFlags, Stage};

/// Streams candidate moves for one search node, most promising first, so
/// the alpha-beta search cuts off as early as possible.
///
/// A picker is built once per node (root, main or quiescence-VCF flavor)
/// and consumed by repeated [`MovePicker::next`] calls until `None`. It
/// borrows the board and history tables read-only; the generated move
/// buffer is inline, so streaming allocates nothing beyond the lazily
/// created policy buffer.
pub struct MovePicker<'a> {
    pub(super) board: &'a Board,
    pub(super) rule: Rule,
    pub(super) stage: Stage,
    pub(super) tt_move: Pos,
    pub(super) allow_plain_b4_in_vcf: bool,
    pub(super) has_policy: bool,
    pub(super) cur_score: Score,
    pub(super) cur_policy_score: Score,
    pub(super) max_policy_score: Score,
    pub(super) main_history: Option<&'a MainHistory>,
    pub(super) counter_move_history: Option<&'a CounterMoveHistory>,
    pub(super) continuation_history: Option<&'a [&'a MoveHistory]>,
    pub(super) policy: Option<PolicyBuffer>,
    pub(super) cur: usize,
    pub(super) buf: MoveBuffer,
}

impl<'a> MovePicker<'a> {
    /// Root picker: choose one generation batch from the threat topology
    /// and stream it unscored; root ordering is the search driver's job.
    pub fn new_root(rule: Rule, board: &'a Board) -> Self {
        let mut picker = Self::empty(rule, board, Stage::AllMoves);
        let self_side = board.side_to_move();
        let oppo = !self_side;

        if board.p4_count(self_side, Pattern4::AFive) > 0 {
            movegen::generate(board, GenType::Winning, &mut picker.buf);
        } else if board.p4_count(oppo, Pattern4::AFive) > 0 {
            movegen::generate(board, GenType::DefendFive, &mut picker.buf);
        } else if board.p4_count(self_side, Pattern4::BFlex4) > 0 {
            movegen::generate(board, GenType::Winning, &mut picker.buf);
        } else if board.p4_count(oppo, Pattern4::BFlex4) > 0 {
            movegen::generate(board, GenType::DefendFourAll, &mut picker.buf);
            movegen::generate(board, GenType::Vcf, &mut picker.buf);
        } else if board.p4_count(oppo, Pattern4::CBlock4Flex3) > 0
            && (rule != Rule::Renju || movegen::validate_opponent_c_move(board))
        {
            movegen::generate(board, GenType::DefendB4F3(rule), &mut picker.buf);
            if picker.buf.is_empty() {
                movegen::generate(board, GenType::All, &mut picker.buf);
            } else {
                movegen::generate(board, GenType::Vcf, &mut picker.buf);
            }
        } else {
            movegen::generate(board, GenType::All, &mut picker.buf);
        }
        picker
    }

    /// Main-search picker. The initial stage is selected from the
    /// opponent's threat topology, and `tt_move` is kept only when it
    /// passes the stage's validity predicate and is playable.
    pub fn new_main(
        rule: Rule,
        board: &'a Board,
        tt_move: Pos,
        main_history: &'a MainHistory,
        counter_move_history: &'a CounterMoveHistory,
        continuation_history: &'a [&'a MoveHistory],
    ) -> Self {
        let oppo = !board.side_to_move();

        let (stage, tt_valid) = if board.p4_count(oppo, Pattern4::AFive) > 0 {
            let valid = Self::tt_cell(board, tt_move).pattern4(oppo) == Pattern4::AFive;
            (Stage::DefendFiveTt, valid)
        } else if board.p4_count(oppo, Pattern4::BFlex4) > 0 {
            let cell = Self::tt_cell(board, tt_move);
            let valid = cell.pattern4(Color::Black) >= Pattern4::EBlock4
                || cell.pattern4(Color::Black) == Pattern4::Forbid
                || cell.pattern4(Color::White) >= Pattern4::EBlock4;
            (Stage::DefendFourTt, valid)
        } else if board.p4_count(oppo, Pattern4::CBlock4Flex3) > 0
            && (rule != Rule::Renju || movegen::validate_opponent_c_move(board))
        {
            (Stage::DefendB4f3Tt, true)
        } else {
            (Stage::MainTt, true)
        };
        let tt_valid = tt_valid && Self::tt_is_playable(board, tt_move);

        let mut picker = Self::empty(rule, board, if tt_valid { stage } else { stage.after_tt() });
        picker.tt_move = if tt_valid { tt_move } else { Pos::NONE };
        picker.main_history = Some(main_history);
        picker.counter_move_history = Some(counter_move_history);
        picker.continuation_history = Some(continuation_history);
        picker
    }

    /// Quiescence-VCF picker: forcing fours in the neighborhood of the
    /// side's own last move. `previous_self_p4` carries the pattern the
    /// side's previous two moves had when played; sustained strong fours
    /// unlock plain closed fours even at deep qvcf plies.
    pub fn new_qvcf(
        rule: Rule,
        board: &'a Board,
        tt_move: Pos,
        depth: Depth,
        previous_self_p4: [Pattern4; 2],
    ) -> Self {
        let self_side = board.side_to_move();
        let oppo = !self_side;
        let allow_plain_b4 = depth >= DEPTH_QVCF_FULL
            || (previous_self_p4[0] >= Pattern4::DBlock4Plus
                && previous_self_p4[1] >= Pattern4::DBlock4Plus);

        let (stage, tt_valid) = if board.p4_count(oppo, Pattern4::AFive) > 0 {
            let valid = Self::tt_cell(board, tt_move).pattern4(oppo) == Pattern4::AFive;
            (Stage::DefendFiveTt, valid)
        } else {
            let valid = Self::tt_cell(board, tt_move).pattern4(self_side) >= Pattern4::EBlock4;
            (Stage::QvcfTt, valid)
        };
        let tt_valid = tt_valid && Self::tt_is_playable(board, tt_move);

        let mut picker = Self::empty(rule, board, if tt_valid { stage } else { stage.after_tt() });
        picker.tt_move = if tt_valid { tt_move } else { Pos::NONE };
        picker.allow_plain_b4_in_vcf = allow_plain_b4;
        picker
    }

    /// Yield the next candidate, or `None` when exhausted.
    #[inline]
    pub fn next(&mut self) -> Option<Pos> {
        self.next_filtered(PickStrategy::Next, |_| true)
    }

    /// Yield the next candidate accepted by `filter`, selecting among the
    /// buffered moves with `strategy`. `PickStrategy::Best` gives lazy
    /// top-K selection without a prior sort.
    pub fn next_filtered<F>(&mut self, strategy: PickStrategy, mut filter: F) -> Option<Pos>
    where
        F: FnMut(Pos) -> bool,
    {
        loop {
            match self.stage {
                Stage::MainTt
                | Stage::DefendFiveTt
                | Stage::DefendFourTt
                | Stage::DefendB4f3Tt
                | Stage::QvcfTt => {
                    debug_assert!(self.tt_move != Pos::NONE);
                    self.stage = self.stage.after_tt();
                    return Some(self.tt_move);
                }

                Stage::MainMoves => {
                    let oppo = !self.board.side_to_move();
                    debug_assert_eq!(self.board.p4_count(oppo, Pattern4::AFive), 0);
                    debug_assert_eq!(self.board.p4_count(oppo, Pattern4::BFlex4), 0);

                    self.restart_buffer();
                    movegen::generate(self.board, GenType::All, &mut self.buf);
                    self.score_moves(
                        ScoreFlags::BALANCED
                            | ScoreFlags::POLICY
                            | ScoreFlags::MAIN_HISTORY
                            | ScoreFlags::COUNTER_MOVE
                            | ScoreFlags::CONT_HISTORY,
                    );
                    self.sort_pending(0);
                    self.stage = Stage::AllMoves;
                }

                Stage::DefendFiveMoves => {
                    let oppo = !self.board.side_to_move();
                    // At most one five threat is expected here; a valid
                    // TT move already was the only defense.
                    debug_assert!(self.board.p4_count(oppo, Pattern4::AFive) > 0);

                    self.restart_buffer();
                    if self.tt_move == Pos::NONE {
                        movegen::generate(self.board, GenType::DefendFive, &mut self.buf);
                    }
                    self.stage = Stage::AllMoves;
                }

                Stage::DefendFourMoves => {
                    debug_assert!(
                        self.board.p4_count(!self.board.side_to_move(), Pattern4::BFlex4) > 0
                    );

                    self.restart_buffer();
                    movegen::generate(self.board, GenType::DefendFour, &mut self.buf);
                    movegen::generate(self.board, GenType::Vcf, &mut self.buf);
                    self.score_moves(
                        ScoreFlags::BALANCED | ScoreFlags::POLICY | ScoreFlags::MAIN_HISTORY,
                    );
                    self.sort_pending(0);
                    self.stage = Stage::AllMoves;
                }

                Stage::DefendB4f3Moves => {
                    debug_assert!(
                        self.board
                            .p4_count(!self.board.side_to_move(), Pattern4::CBlock4Flex3)
                            > 0
                    );

                    self.restart_buffer();
                    movegen::generate(self.board, GenType::DefendB4F3(self.rule), &mut self.buf);
                    if self.buf.is_empty() {
                        // Defense generation can come back empty even
                        // after the entry-time check once moves are
                        // filtered; fall back to the quiet stage.
                        self.stage = Stage::MainMoves;
                        continue;
                    }
                    movegen::generate(self.board, GenType::Vcf, &mut self.buf);
                    self.score_moves(
                        ScoreFlags::BALANCED | ScoreFlags::POLICY | ScoreFlags::MAIN_HISTORY,
                    );
                    self.sort_pending(0);
                    self.stage = Stage::AllMoves;
                }

                Stage::QvcfMoves => {
                    self.restart_buffer();
                    let seed = self
                        .board
                        .last_actual_move_of_side(self.board.side_to_move());
                    let kind = if self.allow_plain_b4_in_vcf {
                        VcfKind::Plain
                    } else {
                        VcfKind::Comb
                    };
                    movegen::generate_neighbors(self.board, kind, seed, &mut self.buf);
                    self.score_moves(ScoreFlags::BALANCED);
                    self.sort_pending(0);
                    self.stage = Stage::AllMoves;
                }

                Stage::AllMoves => return self.pick_from_buffer(strategy, &mut filter),
            }
        }
    }

    /// The TT move this picker will (or did) yield, `Pos::NONE` when the
    /// provided one was rejected.
    #[inline]
    pub fn tt_move(&self) -> Pos {
        self.tt_move
    }

    /// Whether policy scoring ran for the streamed buffer.
    #[inline]
    pub fn has_policy_score(&self) -> bool {
        self.has_policy
    }

    /// Largest `raw_score` over the buffer at scoring time.
    #[inline]
    pub fn max_move_policy(&self) -> Score {
        self.max_policy_score
    }

    /// `raw_score` of the most recently yielded move.
    #[inline]
    pub fn cur_move_policy(&self) -> Score {
        self.cur_policy_score
    }

    /// Ordering score of the most recently yielded move.
    #[inline]
    pub fn cur_move_score(&self) -> Score {
        self.cur_score
    }

    /// Gap between the best policy in the buffer and the current move's
    /// policy.
    #[inline]
    pub fn cur_move_policy_diff(&self) -> Score {
        self.max_policy_score - self.cur_policy_score
    }

    /// Gap between the best policy in the buffer and the current move's
    /// ordering score.
    #[inline]
    pub fn cur_move_score_diff(&self) -> Score {
        self.max_policy_score - self.cur_score
    }

    // ---- internals -----------------------------------------------------

    fn empty(rule: Rule, board: &'a Board, stage: Stage) -> Self {
        MovePicker {
            board,
            rule,
            stage,
            tt_move: Pos::NONE,
            allow_plain_b4_in_vcf: false,
            has_policy: false,
            cur_score: 0,
            cur_policy_score: 0,
            max_policy_score: SCORE_LOWEST,
            main_history: None,
            counter_move_history: None,
            continuation_history: None,
            policy: None,
            cur: 0,
            buf: MoveBuffer::new(),
        }
    }

    /// Cell view of a caller-provided TT move; off-board and occupied
    /// positions read as a blank cell, which fails every validity
    /// predicate.
    fn tt_cell(board: &Board, tt: Pos) -> Cell {
        if tt.is_cell() && board.is_in_board(tt) {
            *board.cell(tt)
        } else {
            Cell::default()
        }
    }

    fn tt_is_playable(board: &Board, tt: Pos) -> bool {
        tt.is_cell() && board.is_in_board(tt) && board.is_empty(tt)
    }

    fn restart_buffer(&mut self) {
        self.buf.clear();
        self.cur = 0;
    }

    fn sort_pending(&mut self, limit: Score) {
        let cur = self.cur;
        fast_partial_sort(&mut self.buf.as_mut_slice()[cur..], limit);
    }

    /// Stream the next buffered move that is not the TT move, not a
    /// Renju-Black forbidden point, and passes `filter`.
    fn pick_from_buffer<F>(&mut self, strategy: PickStrategy, filter: &mut F) -> Option<Pos>
    where
        F: FnMut(Pos) -> bool,
    {
        let renju_black =
            self.rule == Rule::Renju && self.board.side_to_move() == Color::Black;

        while self.cur < self.buf.len() {
            if strategy == PickStrategy::Best {
                if let Some(best) = (self.cur..self.buf.len()).max_by_key(|&i| self.buf[i].score)
                {
                    self.buf.as_mut_slice().swap(self.cur, best);
                }
            }

            let m = self.buf[self.cur];
            self.cur += 1;

            if m.pos != self.tt_move
                && (!renju_black || !self.board.check_forbidden_point(m.pos))
                && filter(m.pos)
            {
                debug_assert!(self.board.is_empty(m.pos));
                self.cur_score = m.score;
                self.cur_policy_score = m.raw_score;
                return Some(m.pos);
            }
        }
        None
    }
}
