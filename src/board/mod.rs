//! Board state with per-cell threat bookkeeping.
//!
//! The board keeps, for every empty cell, the [`Pattern4`] classification
//! and static score of a hypothetical move there for both colors, plus
//! per-color counters over the classifications. Classification is
//! refreshed incrementally: a stone only influences empty cells within
//! line distance 4 of itself.

mod cell;
pub(crate) mod classify;
mod diagram;
mod forbidden;

pub use cell::Cell;
pub use diagram::DiagramError;

use log::debug;

use crate::eval::PolicyEvaluator;
use crate::types::{Color, Pattern4, Pos, Rule};

use classify::{cell_score, combine, dir_rank, DirRank, Slot, DIRECTIONS};

/// Smallest playable board side.
pub const MIN_BOARD_SIZE: u16 = 5;

/// Game board.
pub struct Board {
    size: u16,
    rule: Rule,
    side_to_move: Color,
    stones: Box<[Option<Color>; Pos::NUM]>,
    cells: Box<[Cell; Pos::NUM]>,
    /// Classification counters over empty in-board cells.
    p4_counts: [[u16; Pattern4::NUM]; Color::NUM],
    history: Vec<(Pos, Color)>,
    evaluator: Option<Box<dyn PolicyEvaluator>>,
}

impl Board {
    /// Create an empty board. `size` must be within
    /// [`MIN_BOARD_SIZE`]..=[`Pos::SIDE_MAX`].
    pub fn new(size: u16, rule: Rule) -> Board {
        assert!(
            (MIN_BOARD_SIZE..=Pos::SIDE_MAX).contains(&size),
            "unsupported board size {size}"
        );
        let mut board = Board {
            size,
            rule,
            side_to_move: Color::Black,
            stones: Box::new([None; Pos::NUM]),
            cells: Box::new([Cell::default(); Pos::NUM]),
            p4_counts: [[0; Pattern4::NUM]; Color::NUM],
            history: Vec::with_capacity((size * size) as usize),
            evaluator: None,
        };
        board.rebuild();
        debug!("new {size}x{size} {rule} board");
        board
    }

    #[inline]
    pub fn size(&self) -> u16 {
        self.size
    }

    #[inline]
    pub fn rule(&self) -> Rule {
        self.rule
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Override the side to move. Position setup only; game flow goes
    /// through [`Board::do_move`].
    pub fn set_side_to_move(&mut self, side: Color) {
        self.side_to_move = side;
    }

    #[inline]
    pub fn is_in_board(&self, pos: Pos) -> bool {
        pos.is_cell() && pos.x() < self.size && pos.y() < self.size
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        debug_assert!(self.is_in_board(pos));
        self.stones[pos.move_index()].is_none()
    }

    #[inline]
    pub fn stone_at(&self, pos: Pos) -> Option<Color> {
        debug_assert!(self.is_in_board(pos));
        self.stones[pos.move_index()]
    }

    /// Classification view of a cell. Occupied cells read as the default
    /// (no threat) cell.
    #[inline]
    pub fn cell(&self, pos: Pos) -> &Cell {
        debug_assert!(self.is_in_board(pos));
        &self.cells[pos.move_index()]
    }

    /// Number of empty cells classified `p4` for `color`.
    #[inline]
    pub fn p4_count(&self, color: Color, p4: Pattern4) -> u16 {
        self.p4_counts[color.index()][p4.index()]
    }

    /// All empty in-board cells, in index order.
    pub fn iter_empty(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&p| self.is_in_board(p) && self.stones[p.move_index()].is_none())
    }

    /// Play a move (or [`Pos::PASS`]) for the side to move.
    pub fn do_move(&mut self, pos: Pos) {
        let side = self.side_to_move;
        if pos != Pos::PASS {
            assert!(self.is_in_board(pos), "move {pos} is off the board");
            assert!(self.is_empty(pos), "cell {pos} is already occupied");
            self.place(pos, side);
        }
        self.history.push((pos, side));
        self.side_to_move = !side;
    }

    /// Take back the most recent move. No-op on an empty history.
    pub fn undo_move(&mut self) {
        let Some((pos, side)) = self.history.pop() else {
            return;
        };
        self.side_to_move = side;
        if pos == Pos::PASS {
            return;
        }
        let idx = pos.move_index();
        self.stones[idx] = None;
        self.cells[idx] = self.classify_cell(pos);
        self.add_cell_counts(idx);
        self.refresh_lines_around(pos);
    }

    /// Place a stone outside the game flow (position setup / tests).
    /// Classification is refreshed but the move history is untouched.
    pub fn put_stone(&mut self, pos: Pos, color: Color) {
        assert!(self.is_in_board(pos), "stone {pos} is off the board");
        assert!(self.is_empty(pos), "cell {pos} is already occupied");
        self.place(pos, color);
    }

    /// The most recent move, [`Pos::PASS`] included, or [`Pos::NONE`].
    #[inline]
    pub fn last_move(&self) -> Pos {
        self.history.last().map_or(Pos::NONE, |&(p, _)| p)
    }

    /// The most recent non-pass move played by `color`, or [`Pos::NONE`].
    pub fn last_actual_move_of_side(&self, color: Color) -> Pos {
        self.history
            .iter()
            .rev()
            .find(|&&(p, c)| c == color && p != Pos::PASS)
            .map_or(Pos::NONE, |&(p, _)| p)
    }

    /// Whether placing Black at `pos` is a Renju forbidden point.
    /// Always false for non-Renju rules.
    pub fn check_forbidden_point(&self, pos: Pos) -> bool {
        if !self.rule.has_forbidden_points(Color::Black) {
            return false;
        }
        if !self.is_in_board(pos) || !self.is_empty(pos) {
            return false;
        }
        if self.cell(pos).pattern4(Color::Black) != Pattern4::Forbid {
            return false;
        }
        forbidden::is_forbidden(self, pos)
    }

    /// Whether a Black `CBlock4Flex3` cell is a genuine combined threat.
    #[inline]
    pub(crate) fn black_c_move_is_real(&self, pos: Pos) -> bool {
        forbidden::black_c_move_is_real(self, pos)
    }

    /// Attach a policy evaluator. The picker consults it when asked to
    /// score with policy.
    pub fn attach_evaluator(&mut self, evaluator: Box<dyn PolicyEvaluator>) {
        debug!("policy evaluator attached");
        self.evaluator = Some(evaluator);
    }

    #[inline]
    pub fn evaluator(&self) -> Option<&dyn PolicyEvaluator> {
        self.evaluator.as_deref()
    }

    // ---- classification bookkeeping ------------------------------------

    fn place(&mut self, pos: Pos, color: Color) {
        let idx = pos.move_index();
        self.remove_cell_counts(idx);
        self.cells[idx] = Cell::default();
        self.stones[idx] = Some(color);
        self.refresh_lines_around(pos);
    }

    /// Line window of radius 4 around `pos` for `color`, the center slot
    /// holding the hypothetical move.
    pub(crate) fn line_window(
        &self,
        pos: Pos,
        dir: (i32, i32),
        color: Color,
    ) -> [Slot; classify::WINDOW] {
        let mut window = [Slot::Wall; classify::WINDOW];
        window[classify::WINDOW / 2] = Slot::Own;
        for k in 1..=4i32 {
            for (slot, step) in [(4 + k as usize, k), (4 - k as usize, -k)] {
                let target = pos
                    .offset(dir.0 * step, dir.1 * step)
                    .filter(|&p| self.is_in_board(p));
                window[slot] = match target {
                    None => Slot::Wall,
                    Some(p) => match self.stones[p.move_index()] {
                        None => Slot::Empty,
                        Some(c) if c == color => Slot::Own,
                        Some(_) => Slot::Opp,
                    },
                };
            }
        }
        window
    }

    pub(crate) fn dir_ranks(&self, pos: Pos, color: Color) -> [DirRank; 4] {
        let mut ranks = [DirRank::Dead; 4];
        for (i, dir) in DIRECTIONS.into_iter().enumerate() {
            let window = self.line_window(pos, dir, color);
            ranks[i] = dir_rank(&window, self.rule, color);
        }
        ranks
    }

    fn classify_cell(&self, pos: Pos) -> Cell {
        let mut pattern4 = [Pattern4::None; Color::NUM];
        let mut score = [0; Color::NUM];
        for color in [Color::Black, Color::White] {
            let ranks = self.dir_ranks(pos, color);
            pattern4[color.index()] = combine(&ranks, self.rule, color);
            score[color.index()] = cell_score(&ranks);
        }
        Cell::from_parts(pattern4, score)
    }

    fn add_cell_counts(&mut self, idx: usize) {
        for color in [Color::Black, Color::White] {
            let p4 = self.cells[idx].pattern4(color);
            self.p4_counts[color.index()][p4.index()] += 1;
        }
    }

    fn remove_cell_counts(&mut self, idx: usize) {
        for color in [Color::Black, Color::White] {
            let p4 = self.cells[idx].pattern4(color);
            debug_assert!(self.p4_counts[color.index()][p4.index()] > 0);
            self.p4_counts[color.index()][p4.index()] -= 1;
        }
    }

    fn reclassify_empty(&mut self, pos: Pos) {
        let idx = pos.move_index();
        debug_assert!(self.stones[idx].is_none());
        self.remove_cell_counts(idx);
        self.cells[idx] = self.classify_cell(pos);
        self.add_cell_counts(idx);
    }

    fn refresh_lines_around(&mut self, pos: Pos) {
        for dir in DIRECTIONS {
            for k in 1..=4i32 {
                for step in [k, -k] {
                    if let Some(p) = pos.offset(dir.0 * step, dir.1 * step) {
                        if self.is_in_board(p) && self.stones[p.move_index()].is_none() {
                            self.reclassify_empty(p);
                        }
                    }
                }
            }
        }
    }

    /// Recompute every cell classification and counter from scratch.
    fn rebuild(&mut self) {
        self.p4_counts = [[0; Pattern4::NUM]; Color::NUM];
        for pos in Pos::all() {
            let idx = pos.move_index();
            if !self.is_in_board(pos) || self.stones[idx].is_some() {
                self.cells[idx] = Cell::default();
            } else {
                self.cells[idx] = self.classify_cell(pos);
                self.add_cell_counts(idx);
            }
        }
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {}x{}, {} to move", self.rule, self.size, self.size, self.side_to_move)?;
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = match self.stones[Pos::new(x, y).move_index()] {
                    Some(Color::Black) => 'x',
                    Some(Color::White) => 'o',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
