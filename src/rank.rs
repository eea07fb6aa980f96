//! Suffix rank construction.
//!
//! The rank is the permutation of corpus positions sorted by the
//! lexicographic order of the suffixes starting at them. A suffix that is
//! a proper prefix of another sorts strictly before it, and positions at
//! or past the corpus end behave as the empty suffix.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **RANK_PERMUTATION**: `build_rank` returns a permutation of `0..N`
//! 2. **RANK_SORTED**: consecutive ranks compare `<= 0` under
//!    `compare_suffixes`
//!
//! Construction is a plain comparison sort. That is O(N² · L) in the
//! worst case; substituting a linear-time suffix-array algorithm is fine
//! as long as the output order is identical.

use std::cmp::Ordering;

use crate::compare::TokenComparer;
use crate::types::Token;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Compare the suffixes of `context` starting at positions `x` and `y`.
///
/// Walks the two suffixes element-wise and returns the first non-equal
/// token comparison. The side that runs out of corpus first is smaller.
/// Identical positions short-circuit to `Equal` without touching the
/// corpus, so the order stays strict-weak even for positions past the
/// end. Does not allocate.
pub(crate) fn compare_suffixes(
    comparer: &TokenComparer,
    context: &[Token],
    x: usize,
    y: usize,
) -> Ordering {
    if x == y {
        return Ordering::Equal;
    }
    let n = context.len();
    let mut d = 0usize;
    loop {
        let x_end = x + d >= n;
        let y_end = y + d >= n;
        match (x_end, y_end) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {
                let ordering =
                    comparer.compare(context[x + d].as_deref(), context[y + d].as_deref());
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
        d += 1;
    }
}

/// Sort `0..context.len()` into suffix rank order.
pub(crate) fn build_rank(comparer: &TokenComparer, context: &[Token]) -> Vec<usize> {
    let mut rank: Vec<usize> = (0..context.len()).collect();

    // INVARIANT: RANK_SORTED is established here and never revisited.
    #[cfg(feature = "parallel")]
    {
        rank.par_sort_by(|&x, &y| compare_suffixes(comparer, context, x, y));
    }
    #[cfg(not(feature = "parallel"))]
    {
        rank.sort_by(|&x, &y| compare_suffixes(comparer, context, x, y));
    }

    rank
}

/// Check that `rank` is sorted under the suffix comparator.
pub fn is_rank_sorted(comparer: &TokenComparer, context: &[Token], rank: &[usize]) -> bool {
    rank.windows(2)
        .all(|pair| compare_suffixes(comparer, context, pair[0], pair[1]) != Ordering::Greater)
}
