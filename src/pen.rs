// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Pen: an immutable, query-only index over a token vector.
//!
//! A Pen owns the corpus (the *context*), the suffix rank computed over
//! it, the comparer that defined the order, and the sentinel that stops
//! rendering. Construction does all the work once; afterwards every
//! method takes `&self`, allocates nothing shared, and may be called from
//! any number of threads at once.
//!
//! # Queries
//!
//! [`positions_of`](Pen::positions_of) and friends treat their sample as
//! a contiguous window over the corpus. The empty sample is deemed to
//! occur at every position *including* the past-the-end position `N`, so
//! `first_position_of`/`last_position_of` return values directly usable
//! as a renderer seed. A miss returns `N`, not an error, for the same
//! reason.

use std::collections::HashSet;

use crate::compare::{StringRelation, TokenComparer};
use crate::error::PenError;
use crate::matcher::{find_run, CycleView, MatchRun};
use crate::rank::build_rank;
use crate::render::{Picker, Render};
use crate::types::{intern_tokens, Token};

/// Immutable corpus index; see the module docs.
#[derive(Debug, Clone)]
pub struct Pen {
    interned: bool,
    comparer: TokenComparer,
    sentinel: Token,
    context: Vec<Token>,
    rank: Vec<usize>,
}

impl Pen {
    /// Build a Pen from a token sequence under a tagged relation.
    ///
    /// The sequence is copied into owned storage; with `intern` set,
    /// equal strings collapse to one shared instance first. The suffix
    /// rank is computed eagerly.
    pub fn new<I>(tokens: I, relation: StringRelation, sentinel: Token, intern: bool) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        Self::with_comparer(tokens, TokenComparer::from(relation), sentinel, intern)
    }

    /// Build a Pen with an explicit comparer (tagged or custom hook).
    pub fn with_comparer<I>(
        tokens: I,
        comparer: TokenComparer,
        sentinel: Token,
        intern: bool,
    ) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        let mut context: Vec<Token> = tokens.into_iter().collect();
        if intern {
            context = intern_tokens(context);
        }
        let rank = build_rank(&comparer, &context);
        Pen {
            interned: intern,
            comparer,
            sentinel,
            context,
            rank,
        }
    }

    /// Copy this Pen, toggling the intern flag.
    ///
    /// The comparer is unchanged, so the existing rank is reused; only
    /// the token storage is re-canonicalised when interning is switched
    /// on.
    pub fn reintern(&self, intern: bool) -> Self {
        let context = if intern && !self.interned {
            intern_tokens(self.context.clone())
        } else {
            self.context.clone()
        };
        Pen {
            interned: intern,
            comparer: self.comparer.clone(),
            sentinel: self.sentinel.clone(),
            context,
            rank: self.rank.clone(),
        }
    }

    /// Assemble a Pen from pre-validated parts.
    ///
    /// No integrity checks are performed; the rank must be a permutation
    /// of `0..context.len()` sorted under `comparer`, and callers who
    /// hand over anything else get undefined query results. The
    /// serialisation envelope is the intended caller.
    pub fn from_raw_parts(
        interned: bool,
        comparer: TokenComparer,
        rank: Vec<usize>,
        context: Vec<Token>,
        sentinel: Token,
    ) -> Self {
        Pen {
            interned,
            comparer,
            sentinel,
            context,
            rank,
        }
    }

    /// Number of tokens in the corpus.
    pub fn len(&self) -> usize {
        self.context.len()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }

    pub fn context(&self) -> &[Token] {
        &self.context
    }

    pub fn rank(&self) -> &[usize] {
        &self.rank
    }

    pub fn sentinel(&self) -> &Token {
        &self.sentinel
    }

    pub fn comparer(&self) -> &TokenComparer {
        &self.comparer
    }

    pub fn interned(&self) -> bool {
        self.interned
    }

    /// Whether `token` is equivalent to the sentinel under the active
    /// relation.
    pub(crate) fn is_stop(&self, token: &Token) -> bool {
        self.comparer
            .equivalent(token.as_deref(), self.sentinel.as_deref())
    }

    pub(crate) fn match_run(&self, view: CycleView<'_>, bounds: (usize, usize)) -> MatchRun {
        find_run(&self.comparer, &self.context, &self.rank, view, bounds)
    }

    /// All positions where the sample occurs.
    ///
    /// The empty sample occurs everywhere, including the past-the-end
    /// position. Each call returns a fresh, unordered set.
    pub fn positions_of(&self, sample: &[Token]) -> HashSet<usize> {
        if sample.is_empty() {
            return (0..=self.len()).collect();
        }
        let run = self.match_run(CycleView::contiguous(sample), (0, self.len()));
        self.rank[run.start..run.start + run.count]
            .iter()
            .copied()
            .collect()
    }

    /// All positions of a single token.
    pub fn positions_of_token(&self, token: &Token) -> HashSet<usize> {
        self.positions_of(std::slice::from_ref(token))
    }

    /// The smallest position where the sample occurs, or `N` on a miss.
    ///
    /// `N` is deliberate (rather than an option or error): it is exactly
    /// the seed value that makes [`Pen::render`] stop immediately.
    pub fn first_position_of(&self, sample: &[Token]) -> usize {
        if sample.is_empty() {
            return 0;
        }
        let run = self.match_run(CycleView::contiguous(sample), (0, self.len()));
        self.rank[run.start..run.start + run.count]
            .iter()
            .copied()
            .min()
            .unwrap_or(self.len())
    }

    pub fn first_position_of_token(&self, token: &Token) -> usize {
        self.first_position_of(std::slice::from_ref(token))
    }

    /// The largest position where the sample occurs, or `N` on a miss.
    pub fn last_position_of(&self, sample: &[Token]) -> usize {
        if sample.is_empty() {
            return self.len();
        }
        let run = self.match_run(CycleView::contiguous(sample), (0, self.len()));
        self.rank[run.start..run.start + run.count]
            .iter()
            .copied()
            .max()
            .unwrap_or(self.len())
    }

    pub fn last_position_of_token(&self, token: &Token) -> usize {
        self.last_position_of(std::slice::from_ref(token))
    }

    /// How many positions the sample occurs at, without materialising
    /// the set.
    pub fn count(&self, sample: &[Token]) -> usize {
        if sample.is_empty() {
            return self.len() + 1;
        }
        self.match_run(CycleView::contiguous(sample), (0, self.len()))
            .count
    }

    pub fn count_token(&self, token: &Token) -> usize {
        self.count(std::slice::from_ref(token))
    }

    /// Start rendering: a lazy token stream conditioned on the last
    /// `window` emitted tokens.
    ///
    /// `from_position` seeds the stream with literal corpus tokens;
    /// `None` asks the picker for a starting rank instead. Positions
    /// beyond `N` are rejected here; everything else surfaces through
    /// the iterator.
    pub fn render<P: Picker>(
        &self,
        window: usize,
        picker: P,
        from_position: Option<usize>,
    ) -> Result<Render<'_, P>, PenError> {
        if let Some(position) = from_position {
            if position > self.len() {
                return Err(PenError::InvalidArgument {
                    argument: "from_position",
                    reason: format!("{} exceeds corpus length {}", position, self.len()),
                });
            }
        }
        Ok(Render::new(self, window, picker, from_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ordinal_pen, toks};
    use crate::types::token;
    use std::sync::Arc;

    #[test]
    fn every_single_token_finds_its_own_position() {
        let pen = ordinal_pen(&["c", "a", "b", "a"]);
        for (i, t) in pen.context().iter().enumerate() {
            let positions = pen.positions_of_token(t);
            assert!(positions.contains(&i), "position {} missing", i);
        }
    }

    #[test]
    fn window_queries_agree_with_count() {
        let pen = ordinal_pen(&["a", "b", "a", "b", "a"]);
        let sample = toks(&["a", "b"]);
        assert_eq!(pen.positions_of(&sample).len(), pen.count(&sample));
        assert_eq!(pen.positions_of(&sample), [0, 2].into_iter().collect());
    }

    #[test]
    fn first_and_last_bracket_the_position_set() {
        let pen = ordinal_pen(&["a", "b", "a", "b", "a"]);
        let sample = toks(&["b", "a"]);
        assert_eq!(pen.first_position_of(&sample), 1);
        assert_eq!(pen.last_position_of(&sample), 3);
    }

    #[test]
    fn miss_returns_corpus_length() {
        let pen = ordinal_pen(&["a", "b"]);
        let sample = toks(&["z"]);
        assert_eq!(pen.first_position_of(&sample), 2);
        assert_eq!(pen.last_position_of(&sample), 2);
        assert_eq!(pen.count(&sample), 0);
        assert!(pen.positions_of(&sample).is_empty());
    }

    #[test]
    fn empty_sample_occurs_everywhere_including_past_end() {
        let pen = ordinal_pen(&["p", "q"]);
        assert_eq!(pen.positions_of(&[]), (0..=2).collect());
        assert_eq!(pen.first_position_of(&[]), 0);
        assert_eq!(pen.last_position_of(&[]), 2);
        assert_eq!(pen.count(&[]), 3);
    }

    #[test]
    fn interned_pen_shares_string_storage() {
        let tokens = vec![token("w"), token("x"), token("w")];
        let pen = Pen::new(tokens, StringRelation::Ordinal, None, true);
        assert!(pen.interned());
        let a = pen.context()[0].as_ref().unwrap();
        let b = pen.context()[2].as_ref().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn reintern_reuses_rank_and_answers_identically() {
        let tokens = vec![token("m"), token("n"), token("m")];
        let plain = Pen::new(tokens, StringRelation::Ordinal, None, false);
        let shared = plain.reintern(true);

        assert_eq!(plain.rank(), shared.rank());
        let sample = toks(&["m"]);
        assert_eq!(plain.positions_of(&sample), shared.positions_of(&sample));
        let a = shared.context()[0].as_ref().unwrap();
        let b = shared.context()[2].as_ref().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn from_raw_parts_trusts_its_inputs() {
        let context = toks(&["a", "b"]);
        let rank = vec![0, 1];
        let pen = Pen::from_raw_parts(
            false,
            TokenComparer::from(StringRelation::Ordinal),
            rank.clone(),
            context,
            None,
        );
        assert_eq!(pen.rank(), rank.as_slice());
        assert_eq!(pen.len(), 2);
    }

    #[test]
    fn render_rejects_out_of_range_seed() {
        let pen = ordinal_pen(&["a"]);
        let err = pen.render(1, |_m: usize| 0usize, Some(2)).unwrap_err();
        assert!(matches!(
            err,
            PenError::InvalidArgument {
                argument: "from_position",
                ..
            }
        ));
    }

    #[test]
    fn pen_is_shareable_across_threads() {
        let pen = ordinal_pen(&["a", "b", "a"]);
        let sample = toks(&["a"]);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(pen.count(&sample), 2);
                });
            }
        });
    }
}
