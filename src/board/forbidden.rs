//! Renju forbidden-point checking for Black.
//!
//! Classification marks a cell `Forbid` from raw shape counts (overline,
//! double-four, double-three). Overlines and double-fours are always
//! genuine; a double-three is only forbidden when at least two of its
//! open threes are *live*, i.e. can actually grow into an open four on a
//! playable cell. This module performs that validation.

use smallvec::SmallVec;

use crate::types::{Color, Pattern4, Pos};

use super::classify::{dir_rank, five_completions, DirRank, Slot, DIRECTIONS, WINDOW};
use super::Board;

const CENTER: i32 = 4;

/// Grid cells whose occupation turns the flex three in `window` (along
/// `dir` through `pos`) into an open four.
fn flex4_completions(
    board: &Board,
    pos: Pos,
    dir: (i32, i32),
    window: &[Slot; WINDOW],
) -> SmallVec<[Pos; 4]> {
    let mut out = SmallVec::new();
    for i in 0..WINDOW {
        if window[i] != Slot::Empty {
            continue;
        }
        let mut next = *window;
        next[i] = Slot::Own;
        if five_completions(&next, board.rule(), Color::Black) >= 2 {
            let off = i as i32 - CENTER;
            if let Some(e) = pos.offset(dir.0 * off, dir.1 * off) {
                if board.is_in_board(e) {
                    out.push(e);
                }
            }
        }
    }
    out
}

/// Whether a flex three can become an open four on some cell that is not
/// itself (provisionally) forbidden. One level of lookahead; the
/// completion cell's own classification stands in for a deeper recursion.
fn flex_three_is_live(board: &Board, pos: Pos, dir: (i32, i32), window: &[Slot; WINDOW]) -> bool {
    flex4_completions(board, pos, dir, window)
        .iter()
        .any(|&e| board.cell(e).pattern4(Color::Black) != Pattern4::Forbid)
}

/// Authoritative forbidden-point check for a provisionally forbidden
/// cell. Returns true when placing Black at `pos` is illegal under Renju.
pub(crate) fn is_forbidden(board: &Board, pos: Pos) -> bool {
    debug_assert!(board.is_in_board(pos) && board.is_empty(pos));
    debug_assert!(board.cell(pos).pattern4(Color::Black) == Pattern4::Forbid);

    let mut fours = 0;
    let mut live_threes = 0;
    for dir in DIRECTIONS {
        let window = board.line_window(pos, dir, Color::Black);
        match dir_rank(&window, board.rule(), Color::Black) {
            // A five wins outright; classification would have said AFive.
            DirRank::Five => return false,
            DirRank::Overline => return true,
            DirRank::Flex4 | DirRank::Block4 => fours += 1,
            DirRank::Flex3 => {
                if flex_three_is_live(board, pos, dir, &window) {
                    live_threes += 1;
                }
            }
            _ => {}
        }
    }
    fours >= 2 || live_threes >= 2
}

/// Whether a Black cell classified `CBlock4Flex3` carries a genuine open
/// three, as opposed to one whose open-four conversions are all
/// forbidden.
pub(crate) fn black_c_move_is_real(board: &Board, pos: Pos) -> bool {
    debug_assert!(board.cell(pos).pattern4(Color::Black) == Pattern4::CBlock4Flex3);
    for dir in DIRECTIONS {
        let window = board.line_window(pos, dir, Color::Black);
        if dir_rank(&window, board.rule(), Color::Black) == DirRank::Flex3
            && flex_three_is_live(board, pos, dir, &window)
        {
            return true;
        }
    }
    false
}
