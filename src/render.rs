// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy Markov-style rendering.
//!
//! [`Render`] is a hand-rolled iterator with three states:
//!
//! - **Seeding** - replay literal corpus tokens from `from_position`
//!   (up to `max(k, 1)` of them), or ask the picker for a starting rank
//!   when no position was given;
//! - **Streaming** - locate the up-to-`k` most recent tokens in the
//!   suffix rank, pick uniformly among the matches, and emit the token
//!   that follows the picked occurrence;
//! - **Stopped** - terminal; entered when the chosen token is equivalent
//!   to the sentinel or when an error was reported.
//!
//! Each advance yields at most one token, so consumers drive all the
//! work and may drop the iterator at any point; dropping releases only
//! the window ring and counters.
//!
//! A pick landing on `match_start + pick == N` selects the past-the-end
//! slot even when real matches remain. This biases generation toward
//! stopping when the latest corpus occurrence of the window sits at the
//! very end of the corpus.

use std::cell::RefCell;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PenError;
use crate::matcher::CycleView;
use crate::pen::Pen;
use crate::types::Token;

/// Chooses among `bound` candidates: returns a value in `[0, bound)`,
/// or `0` when `bound` is `0`.
pub trait Picker {
    fn pick(&mut self, bound: usize) -> usize;
}

impl<F> Picker for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, bound: usize) -> usize {
        self(bound)
    }
}

/// Uniform picker over an explicitly seeded generator.
///
/// Two pickers built from the same seed drive identical renders; use
/// this whenever results must be reproducible across processes.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn from_seed(seed: u64) -> Self {
        RandomPicker {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        RandomPicker {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Picker for RandomPicker {
    fn pick(&mut self, bound: usize) -> usize {
        if bound == 0 {
            0
        } else {
            self.rng.gen_range(0..bound)
        }
    }
}

/// Timestamp sampled once, on first picker use.
static PROCESS_SEED: Lazy<u64> = Lazy::new(|| {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
});

/// Per-thread ticket counter; taken under the mutex once per thread.
static THREAD_TICKET: Lazy<Mutex<u64>> = Lazy::new(|| Mutex::new(0));

thread_local! {
    static THREAD_RNG: RefCell<StdRng> = RefCell::new({
        let ticket = {
            let mut counter = THREAD_TICKET.lock().expect("picker ticket mutex poisoned");
            let ticket = *counter;
            *counter += 1;
            ticket
        };
        StdRng::seed_from_u64(*PROCESS_SEED ^ ticket.wrapping_mul(0x9e37_79b9_7f4a_7c15))
    });
}

/// The process-wide default picker.
///
/// Backed by a thread-local generator seeded from the process start
/// time combined with a per-thread ticket. Convenient for demos and
/// tests; not reproducible across processes, by design.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPicker;

impl Picker for DefaultPicker {
    fn pick(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        THREAD_RNG.with(|rng| rng.borrow_mut().gen_range(0..bound))
    }
}

enum State {
    /// Replaying literal corpus tokens from a seed position.
    SeedAt { from: usize, step: usize },
    /// Asking the picker for the starting rank.
    SeedPicked,
    Streaming,
    Stopped,
}

/// Lazy token stream over a borrowed [`Pen`]; created by
/// [`Pen::render`].
///
/// Yields `Ok(token)` per step. A picker misbehaving surfaces as one
/// `Err` item, after which the stream is over.
pub struct Render<'a, P: Picker> {
    pen: &'a Pen,
    window: usize,
    picker: P,
    state: State,
    ring: Vec<Token>,
    cycle_start: usize,
}

impl<'a, P: Picker> std::fmt::Debug for Render<'a, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Render")
            .field("window", &self.window)
            .field("ring", &self.ring)
            .field("cycle_start", &self.cycle_start)
            .finish()
    }
}

impl<'a, P: Picker> Render<'a, P> {
    pub(crate) fn new(pen: &'a Pen, window: usize, picker: P, from_position: Option<usize>) -> Self {
        let state = match from_position {
            Some(from) => State::SeedAt { from, step: 0 },
            None => State::SeedPicked,
        };
        Render {
            pen,
            window,
            picker,
            state,
            ring: Vec::with_capacity(window),
            cycle_start: 0,
        }
    }

    /// Append to the ring, or overwrite the oldest slot once full.
    fn push_window(&mut self, token: Token) {
        if self.window == 0 {
            return;
        }
        if self.ring.len() < self.window {
            self.ring.push(token);
        } else {
            self.ring[self.cycle_start] = token;
            self.cycle_start = (self.cycle_start + 1) % self.window;
        }
    }

    /// Corpus token at `position`, or the sentinel past the end.
    fn token_or_sentinel(&self, position: usize) -> Token {
        if position < self.pen.len() {
            self.pen.context()[position].clone()
        } else {
            self.pen.sentinel().clone()
        }
    }

    fn seed_at(&mut self, from: usize, step: usize) -> Option<Result<Token, PenError>> {
        let token = self.token_or_sentinel(from + step);
        if self.pen.is_stop(&token) {
            self.state = State::Stopped;
            return None;
        }
        self.push_window(token.clone());
        self.state = if step + 1 < self.window.max(1) {
            State::SeedAt {
                from,
                step: step + 1,
            }
        } else {
            State::Streaming
        };
        Some(Ok(token))
    }

    fn seed_picked(&mut self) -> Option<Result<Token, PenError>> {
        let n = self.pen.len();
        let picked = self.picker.pick(n + 1);
        if picked > n {
            self.state = State::Stopped;
            return Some(Err(PenError::InvalidPick {
                picked,
                bound: n + 1,
            }));
        }
        let first = if picked < n {
            self.pen.rank()[picked]
        } else {
            n
        };
        let token = self.token_or_sentinel(first);
        if self.pen.is_stop(&token) {
            self.state = State::Stopped;
            return None;
        }
        self.push_window(token.clone());
        self.state = State::Streaming;
        Some(Ok(token))
    }

    fn stream(&mut self) -> Option<Result<Token, PenError>> {
        let n = self.pen.len();

        let (match_start, match_count, depth) = if self.window == 0 {
            // conditioning on nothing: every position plus the
            // past-the-end slot is a candidate
            (0, n + 1, 0)
        } else {
            let view = CycleView::new(&self.ring, self.cycle_start);
            let run = self.pen.match_run(view, (0, n));
            (run.start, run.count, self.ring.len())
        };

        let picked = self.picker.pick(match_count);
        if picked >= match_count.max(1) {
            self.state = State::Stopped;
            return Some(Err(PenError::InvalidPick {
                picked,
                bound: match_count,
            }));
        }

        let selected = match_start + picked;
        let next_position = if selected < n {
            self.pen.rank()[selected] + depth
        } else {
            n
        };
        let token = self.token_or_sentinel(next_position);
        if self.pen.is_stop(&token) {
            self.state = State::Stopped;
            return None;
        }
        self.push_window(token.clone());
        Some(Ok(token))
    }
}

impl<'a, P: Picker> Iterator for Render<'a, P> {
    type Item = Result<Token, PenError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Stopped => None,
            State::SeedAt { from, step } => self.seed_at(from, step),
            State::SeedPicked => self.seed_picked(),
            State::Streaming => self.stream(),
        }
    }
}
