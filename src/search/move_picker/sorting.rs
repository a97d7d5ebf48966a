//! Partial sorting of generated moves.

use crate::movegen::{ScoredMove, MAX_MOVES};
use crate::types::Score;

/// Below this length the list is insertion-sorted in place.
pub(crate) const INSERTION_SORT_LIMIT: usize = MAX_MOVES / 4;

/// Below this length the whole list is sorted; above it only the top
/// `SORT_LIMIT` entries are fully ordered.
pub(crate) const SORT_LIMIT: usize = MAX_MOVES * 2 / 3;

const _: () = {
    assert!(0 < INSERTION_SORT_LIMIT && INSERTION_SORT_LIMIT < SORT_LIMIT);
    assert!(SORT_LIMIT < MAX_MOVES);
};

/// Reorder `moves` so that every entry with `score >= limit` comes first,
/// in descending score order. Entries below the limit end up behind them
/// in unspecified order. Dispatches on list length: short high-threat
/// lists get a restricted insertion sort, mid-size lists a full sort, and
/// wide lists a bounded partial sort.
pub fn fast_partial_sort(moves: &mut [ScoredMove], limit: Score) {
    let n = moves.len();
    if n <= INSERTION_SORT_LIMIT {
        // Insertion sort over qualifying entries only; sub-limit entries
        // sink to the back of the growing prefix as better ones pass them.
        let mut sorted_end = 0usize;
        for p in 1..n {
            if moves[p].score >= limit {
                let tmp = moves[p];
                sorted_end += 1;
                moves[p] = moves[sorted_end];
                let mut q = sorted_end;
                while q > 0 && moves[q - 1].score < tmp.score {
                    moves[q] = moves[q - 1];
                    q -= 1;
                }
                moves[q] = tmp;
            }
        }
    } else if n <= SORT_LIMIT {
        moves.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    } else {
        moves.select_nth_unstable_by(SORT_LIMIT, |a, b| b.score.cmp(&a.score));
        moves[..SORT_LIMIT].sort_unstable_by(|a, b| b.score.cmp(&a.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn random_moves(rng: &mut Xoshiro256PlusPlus, n: usize) -> Vec<ScoredMove> {
        (0..n)
            .map(|i| {
                let mut m = ScoredMove::new(Pos::new((i % 20) as u16, (i / 20) as u16));
                m.score = rng.random_range(-600..400);
                m.raw_score = m.score;
                m
            })
            .collect()
    }

    fn assert_partial_sorted(moves: &[ScoredMove], limit: Score) {
        let qualifying = moves.iter().filter(|m| m.score >= limit).count();
        // every qualifying entry occupies the prefix, sorted descending
        for i in 0..qualifying {
            assert!(
                moves[i].score >= limit,
                "sub-limit score {} inside the prefix at {}",
                moves[i].score,
                i
            );
            if i > 0 {
                assert!(
                    moves[i - 1].score >= moves[i].score,
                    "prefix not descending at {i}"
                );
            }
        }
        for m in &moves[qualifying..] {
            assert!(m.score < limit, "qualifying score {} left in the tail", m.score);
        }
    }

    #[test]
    fn test_partial_sort_size_grid() {
        let sizes = [
            1,
            INSERTION_SORT_LIMIT,
            INSERTION_SORT_LIMIT + 1,
            SORT_LIMIT,
            SORT_LIMIT + 1,
            MAX_MOVES,
        ];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed);
        for &n in &sizes {
            for limit in [0, -100, 250] {
                let mut moves = random_moves(&mut rng, n);
                fast_partial_sort(&mut moves, limit);
                assert_partial_sorted(&moves, limit);
            }
        }
    }

    #[test]
    fn test_partial_sort_is_idempotent_on_prefix() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for n in [INSERTION_SORT_LIMIT, SORT_LIMIT, MAX_MOVES] {
            let mut moves = random_moves(&mut rng, n);
            fast_partial_sort(&mut moves, 0);
            let qualifying = moves.iter().filter(|m| m.score >= 0).count();
            let prefix: Vec<Score> = moves[..qualifying].iter().map(|m| m.score).collect();

            fast_partial_sort(&mut moves, 0);
            let again: Vec<Score> = moves[..qualifying].iter().map(|m| m.score).collect();
            assert_eq!(prefix, again);
        }
    }

    #[test]
    fn test_all_below_limit_leaves_any_order() {
        let mut moves: Vec<ScoredMove> = (0..8)
            .map(|i| {
                let mut m = ScoredMove::new(Pos::new(i, 0));
                m.score = -10 - i as Score;
                m
            })
            .collect();
        fast_partial_sort(&mut moves, 0);
        assert_partial_sorted(&moves, 0);
        assert_eq!(moves.len(), 8);
    }
}
