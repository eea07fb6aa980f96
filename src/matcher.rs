// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Locating a cyclic sample inside the suffix rank.
//!
//! The renderer keeps its most-recent window in a fixed ring, so the
//! sample arrives as a buffer plus a start offset rather than a
//! contiguous slice. [`CycleView`] adapts that representation;
//! [`find_run`] binary-searches the rank for the contiguous run of
//! positions whose suffixes begin with the sample.
//!
//! The search is three-phase: bisect until a matching rank is hit, then
//! walk the run boundary down and up. Callers that already located a
//! prefix of the sample may pass narrowed bounds; the bounds are a
//! pruning hint and the boundary walk is allowed to leave them.

use std::cmp::Ordering;

use crate::compare::TokenComparer;
use crate::types::Token;

/// A logical sample over a ring buffer: element `d` is
/// `buffer[(start + d) % len]`.
#[derive(Clone, Copy)]
pub(crate) struct CycleView<'a> {
    buffer: &'a [Token],
    start: usize,
}

impl<'a> CycleView<'a> {
    pub(crate) fn new(buffer: &'a [Token], start: usize) -> Self {
        debug_assert!(buffer.is_empty() || start < buffer.len());
        CycleView { buffer, start }
    }

    /// View a contiguous sample (ring offset zero).
    pub(crate) fn contiguous(sample: &'a [Token]) -> Self {
        CycleView {
            buffer: sample,
            start: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buffer.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Token at logical index `d`.
    pub(crate) fn get(&self, d: usize) -> Option<&str> {
        self.buffer[(self.start + d) % self.buffer.len()].as_deref()
    }
}

/// A contiguous run of matching ranks.
///
/// `start` is the first matching rank index, or the insertion point that
/// would preserve sorted order when `count` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchRun {
    pub start: usize,
    pub count: usize,
}

/// Compare the suffix at `rank[m]` against the sample, prefix-wise.
///
/// Returns `Equal` when the suffix begins with the whole sample, `Less`
/// when the suffix is smaller (including running out of corpus first),
/// `Greater` when it is larger.
fn compare_range(
    comparer: &TokenComparer,
    context: &[Token],
    rank: &[usize],
    view: CycleView<'_>,
    m: usize,
) -> Ordering {
    let n = context.len();
    let position = rank[m];
    for d in 0..view.len() {
        if position + d >= n {
            return Ordering::Less;
        }
        let ordering = comparer.compare(context[position + d].as_deref(), view.get(d));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Find the run of ranks in `[bounds.0, bounds.1)` whose suffixes begin
/// with the cyclic sample.
///
/// An empty sample matches every rank in bounds. Bounds narrowed by the
/// caller must still contain at least one matching rank for the result
/// to be meaningful; no runtime check enforces that.
pub(crate) fn find_run(
    comparer: &TokenComparer,
    context: &[Token],
    rank: &[usize],
    view: CycleView<'_>,
    bounds: (usize, usize),
) -> MatchRun {
    let (mut low, mut high) = bounds;
    if view.is_empty() {
        return MatchRun {
            start: low,
            count: high.saturating_sub(low),
        };
    }

    let mut hit = None;
    while low < high {
        let mid = low + (high - low) / 2;
        match compare_range(comparer, context, rank, view, mid) {
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
            Ordering::Equal => {
                hit = Some(mid);
                break;
            }
        }
    }

    let Some(m) = hit else {
        // insertion point; nothing matched
        return MatchRun {
            start: low,
            count: 0,
        };
    };

    let mut run_start = m;
    while run_start > 0
        && compare_range(comparer, context, rank, view, run_start - 1) == Ordering::Equal
    {
        run_start -= 1;
    }
    let mut run_end = m + 1;
    while run_end < rank.len()
        && compare_range(comparer, context, rank, view, run_end) == Ordering::Equal
    {
        run_end += 1;
    }

    MatchRun {
        start: run_start,
        count: run_end - run_start,
    }
}
