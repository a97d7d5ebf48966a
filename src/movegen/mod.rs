//! Move generation facade.
//!
//! All generation kinds are driven by the board's per-cell [`Pattern4`]
//! classification: each kind selects a subset of the empty cells by
//! threat class. Appending a second kind to a non-empty buffer skips
//! cells that are already present, so a stage's buffer stays
//! duplicate-free.

mod buffer;
mod neighbors;
mod types;

pub use buffer::{MoveBuffer, ScoredMove};
pub use neighbors::RANGE_SQUARE2_LINE4;
pub use types::{GenType, VcfKind, MAX_MOVES};

use crate::board::Board;
use crate::types::{Color, Pattern4, Pos};

/// Append every empty cell matching `kind` to `buf`.
pub fn generate(board: &Board, kind: GenType, buf: &mut MoveBuffer) {
    let dedupe = !buf.is_empty();
    let self_side = board.side_to_move();
    let oppo = !self_side;

    for pos in board.iter_empty() {
        let cell = board.cell(pos);
        let keep = match kind {
            GenType::Winning => cell.pattern4(self_side) >= Pattern4::BFlex4,
            GenType::DefendFive => cell.pattern4(oppo) == Pattern4::AFive,
            GenType::DefendFour => cell.pattern4(oppo) >= Pattern4::EBlock4,
            GenType::DefendFourAll | GenType::All => true,
            GenType::DefendB4F3(rule) => {
                let p4 = cell.pattern4(oppo);
                p4 >= Pattern4::CBlock4Flex3
                    && (!rule.has_forbidden_points(oppo)
                        || p4 != Pattern4::CBlock4Flex3
                        || board.black_c_move_is_real(pos))
            }
            GenType::Vcf => cell.pattern4(self_side) >= Pattern4::EBlock4,
        };
        if keep && !(dedupe && buf.contains(pos)) {
            buf.push(ScoredMove::new(pos));
        }
    }
}

/// Append VCF candidates restricted to the [`RANGE_SQUARE2_LINE4`] window
/// around `seed`. The `Comb` kind keeps only fours that come with a
/// companion threat.
pub fn generate_neighbors(board: &Board, kind: VcfKind, seed: Pos, buf: &mut MoveBuffer) {
    if !seed.is_cell() || !board.is_in_board(seed) {
        return;
    }
    let dedupe = !buf.is_empty();
    let self_side = board.side_to_move();
    let required = match kind {
        VcfKind::Plain => Pattern4::EBlock4,
        VcfKind::Comb => Pattern4::DBlock4Plus,
    };

    for (dx, dy) in RANGE_SQUARE2_LINE4 {
        let Some(pos) = seed.offset(dx, dy) else {
            continue;
        };
        if !board.is_in_board(pos) || !board.is_empty(pos) {
            continue;
        }
        if board.cell(pos).pattern4(self_side) >= required && !(dedupe && buf.contains(pos)) {
            buf.push(ScoredMove::new(pos));
        }
    }
}

/// Renju-only gate: whether the opponent's pending `CBlock4Flex3` threat
/// is genuine. Spurious classifications arise for Black when every
/// open-four conversion of the three half is forbidden.
pub fn validate_opponent_c_move(board: &Board) -> bool {
    let oppo = !board.side_to_move();
    if !board.rule().has_forbidden_points(oppo) {
        return true;
    }
    board
        .iter_empty()
        .filter(|&p| board.cell(p).pattern4(Color::Black) == Pattern4::CBlock4Flex3)
        .any(|p| board.black_c_move_is_real(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rule;

    fn collect(board: &Board, kind: GenType) -> Vec<Pos> {
        let mut buf = MoveBuffer::new();
        generate(board, kind, &mut buf);
        buf.as_slice().iter().map(|m| m.pos).collect()
    }

    #[test]
    fn test_winning_generates_five_points() {
        let mut board = Board::new(15, Rule::Freestyle);
        for x in 7..11 {
            board.put_stone(Pos::new(x, 7), Color::Black);
        }
        let moves = collect(&board, GenType::Winning);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Pos::new(6, 7)));
        assert!(moves.contains(&Pos::new(11, 7)));
    }

    #[test]
    fn test_defend_five_is_minimal() {
        let mut board = Board::new(15, Rule::Freestyle);
        board.put_stone(Pos::new(6, 7), Color::Black);
        for x in 7..11 {
            board.put_stone(Pos::new(x, 7), Color::White);
        }
        board.set_side_to_move(Color::Black);

        let moves = collect(&board, GenType::DefendFive);
        assert_eq!(moves, vec![Pos::new(11, 7)]);
    }

    #[test]
    fn test_defend_four_covers_all_defense_points() {
        let mut board = Board::new(15, Rule::Freestyle);
        for x in 7..10 {
            board.put_stone(Pos::new(x, 7), Color::White);
        }
        board.set_side_to_move(Color::Black);

        let moves = collect(&board, GenType::DefendFour);
        for p in [Pos::new(5, 7), Pos::new(6, 7), Pos::new(10, 7), Pos::new(11, 7)] {
            assert!(moves.contains(&p), "defense point {p} missing");
        }
    }

    #[test]
    fn test_all_generates_every_empty_cell() {
        let mut board = Board::new(15, Rule::Freestyle);
        board.put_stone(Pos::new(7, 7), Color::Black);
        let moves = collect(&board, GenType::All);
        assert_eq!(moves.len(), 15 * 15 - 1);
    }

    #[test]
    fn test_append_dedupes() {
        let mut board = Board::new(15, Rule::Freestyle);
        for x in 7..10 {
            board.put_stone(Pos::new(x, 7), Color::Black);
        }
        board.set_side_to_move(Color::Black);

        let mut buf = MoveBuffer::new();
        generate(&board, GenType::Vcf, &mut buf);
        let vcf_len = buf.len();
        assert!(vcf_len > 0);
        generate(&board, GenType::All, &mut buf);

        assert_eq!(buf.len(), 15 * 15 - 3);
        let mut seen = std::collections::HashSet::new();
        assert!(buf.as_slice().iter().all(|m| seen.insert(m.pos)));
    }

    #[test]
    fn test_neighbor_vcf_window() {
        let mut board = Board::new(15, Rule::Freestyle);
        // black three on the diagonal; every four-making cell is near it
        board.do_move(Pos::new(7, 7));
        board.do_move(Pos::new(0, 14));
        board.do_move(Pos::new(8, 8));
        board.do_move(Pos::new(1, 14));
        board.do_move(Pos::new(9, 9));
        board.do_move(Pos::new(2, 14));

        let seed = board.last_actual_move_of_side(Color::Black);
        assert_eq!(seed, Pos::new(9, 9));

        let mut buf = MoveBuffer::new();
        generate_neighbors(&board, VcfKind::Plain, seed, &mut buf);
        assert!(!buf.is_empty());
        for m in buf.as_slice() {
            let dx = m.pos.x() as i32 - seed.x() as i32;
            let dy = m.pos.y() as i32 - seed.y() as i32;
            assert!(RANGE_SQUARE2_LINE4.contains(&(dx, dy)), "{} outside the window", m.pos);
        }
    }
}
