// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Splitting character streams into token vectors.
//!
//! Every tokeniser here implements [`Tokenizer`] by describing what a
//! single line shatters into; the provided [`Tokenizer::shatter`] walks
//! the input line by line and applies the [`ShatteringOptions`] pipeline:
//! intra-line empty-token filtering, empty-line suppression or
//! substitution, and line-end insertion between kept lines.
//!
//! Splitting strategies:
//! - [`RegexSplitTokenizer`] - separators are regex matches, optionally
//!   kept as their own tokens;
//! - [`RegexMatchTokenizer`] - tokens *are* the regex matches, optionally
//!   transformed by an extractor;
//! - [`SubstringSplitTokenizer`] - literal separator set;
//! - [`CharTokenizer`] - one token per character;
//! - [`LineTokenizer`] - one token per line;
//! - [`RandomSplitTokenizer`] / [`BernoulliSplitTokenizer`] - breakpoints
//!   decided by a predicate or a coin flip.

use std::cell::RefCell;
use std::sync::Arc;

use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;

use crate::error::PenError;
use crate::shatter::ShatteringOptions;
use crate::types::{token, Token};

/// Turns text into an ordered token vector.
pub trait Tokenizer {
    /// Tokens of a single line, before any option-driven filtering.
    fn shatter_line(&self, line: &str) -> Vec<Token>;

    /// Shatter a whole input, honouring the options.
    fn shatter(&self, text: &str, options: &ShatteringOptions) -> Vec<Token> {
        let mut out = Vec::new();
        let mut emitted_line = false;
        for line in text.lines() {
            let mut tokens = self.shatter_line(line);
            if options.ignore_empty_tokens {
                tokens.retain(|t| t.as_deref().is_some_and(|s| !s.is_empty()));
            }
            if tokens.is_empty() {
                if options.ignore_empty_lines {
                    continue;
                }
                tokens.push(options.empty_line_token.clone());
            }
            if emitted_line && !options.ignore_line_ends {
                out.push(options.line_end_token.clone());
            }
            out.extend(tokens);
            emitted_line = true;
        }
        out
    }
}

/// Split on regex matches; `inclusive` keeps each separator as a token.
#[derive(Debug)]
pub struct RegexSplitTokenizer {
    pattern: Regex,
    inclusive: bool,
}

impl RegexSplitTokenizer {
    pub fn new(pattern: &str, inclusive: bool) -> Result<Self, PenError> {
        let pattern = compile(pattern)?;
        Ok(RegexSplitTokenizer { pattern, inclusive })
    }
}

impl Tokenizer for RegexSplitTokenizer {
    fn shatter_line(&self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last = 0usize;
        for m in self.pattern.find_iter(line) {
            tokens.push(token(&line[last..m.start()]));
            if self.inclusive {
                tokens.push(token(m.as_str()));
            }
            last = m.end();
        }
        tokens.push(token(&line[last..]));
        tokens
    }
}

/// Maps a raw regex match to a token, or to absent.
pub type MatchExtractor = dyn Fn(&str) -> Token + Send + Sync;

/// Tokens are the regex matches themselves, optionally transformed.
pub struct RegexMatchTokenizer {
    pattern: Regex,
    extractor: Option<Arc<MatchExtractor>>,
}

impl RegexMatchTokenizer {
    pub fn new(pattern: &str) -> Result<Self, PenError> {
        Ok(RegexMatchTokenizer {
            pattern: compile(pattern)?,
            extractor: None,
        })
    }

    /// Transform each match before it becomes a token; returning absent
    /// emits an absent token.
    pub fn with_extractor(pattern: &str, extractor: Arc<MatchExtractor>) -> Result<Self, PenError> {
        Ok(RegexMatchTokenizer {
            pattern: compile(pattern)?,
            extractor: Some(extractor),
        })
    }
}

impl Tokenizer for RegexMatchTokenizer {
    fn shatter_line(&self, line: &str) -> Vec<Token> {
        self.pattern
            .find_iter(line)
            .map(|m| match &self.extractor {
                Some(extract) => extract(m.as_str()),
                None => token(m.as_str()),
            })
            .collect()
    }
}

/// Split on any of a set of literal separators, earliest listed first.
pub struct SubstringSplitTokenizer {
    separators: Vec<String>,
    remove_empty: bool,
}

impl SubstringSplitTokenizer {
    pub fn new(separators: Vec<String>, remove_empty: bool) -> Self {
        SubstringSplitTokenizer {
            separators,
            remove_empty,
        }
    }
}

impl Tokenizer for SubstringSplitTokenizer {
    fn shatter_line(&self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut segment_start = 0usize;
        let mut at = 0usize;
        while at < line.len() {
            let hit = self
                .separators
                .iter()
                .find(|sep| !sep.is_empty() && line[at..].starts_with(sep.as_str()));
            if let Some(sep) = hit {
                tokens.push(token(&line[segment_start..at]));
                at += sep.len();
                segment_start = at;
            } else {
                at += line[at..].chars().next().map_or(1, char::len_utf8);
            }
        }
        tokens.push(token(&line[segment_start..]));
        if self.remove_empty {
            tokens.retain(|t| t.as_deref().is_some_and(|s| !s.is_empty()));
        }
        tokens
    }
}

/// One token per character.
pub struct CharTokenizer;

impl Tokenizer for CharTokenizer {
    fn shatter_line(&self, line: &str) -> Vec<Token> {
        line.chars().map(|c| token(c.encode_utf8(&mut [0; 4]))).collect()
    }
}

/// One token per line.
pub struct LineTokenizer;

impl Tokenizer for LineTokenizer {
    fn shatter_line(&self, line: &str) -> Vec<Token> {
        vec![token(line)]
    }
}

/// Shatter one line by prompting for breakpoints.
///
/// The prompt sees `(n, i, j)`: line length in characters, the current
/// scan position in `[0, n]`, and how many breakpoints were already
/// taken on this line. The first prompt on every line is `(n, 0, 0)`;
/// a `true` answer cuts a token and re-prompts at the same position with
/// `j + 1`; a `false` answer consumes the character at `i` (when there
/// is one) and advances. The trailing token is always flushed, so a
/// line shatters into `j + 1` tokens.
fn split_at_breakpoints(
    line: &str,
    prompt: &mut dyn FnMut(usize, usize, usize) -> bool,
) -> Vec<Token> {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut i = 0usize;
    let mut j = 0usize;
    loop {
        if prompt(n, i, j) {
            tokens.push(token(current.as_str()));
            current.clear();
            j += 1;
        } else {
            if i == n {
                break;
            }
            current.push(chars[i]);
            i += 1;
        }
    }
    tokens.push(token(current.as_str()));
    tokens
}

/// Breakpoints decided by a caller-supplied predicate.
pub struct RandomSplitTokenizer<F> {
    predicate: F,
}

impl<F> RandomSplitTokenizer<F>
where
    F: Fn(usize, usize, usize) -> bool,
{
    pub fn new(predicate: F) -> Self {
        RandomSplitTokenizer { predicate }
    }
}

impl<F> Tokenizer for RandomSplitTokenizer<F>
where
    F: Fn(usize, usize, usize) -> bool,
{
    fn shatter_line(&self, line: &str) -> Vec<Token> {
        split_at_breakpoints(line, &mut |n, i, j| (self.predicate)(n, i, j))
    }
}

/// Breakpoints decided by a Bernoulli(p) coin flip.
pub struct BernoulliSplitTokenizer {
    coin: Bernoulli,
    rng: RefCell<StdRng>,
}

impl BernoulliSplitTokenizer {
    pub const DEFAULT_PROBABILITY: f64 = 0.5;

    pub fn new(probability: f64, seed: u64) -> Result<Self, PenError> {
        let coin = Bernoulli::new(probability).map_err(|_| PenError::InvalidArgument {
            argument: "probability",
            reason: format!("{} is not a probability", probability),
        })?;
        Ok(BernoulliSplitTokenizer {
            coin,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        })
    }
}

impl Tokenizer for BernoulliSplitTokenizer {
    fn shatter_line(&self, line: &str) -> Vec<Token> {
        let mut rng = self.rng.borrow_mut();
        split_at_breakpoints(line, &mut |_n, _i, _j| self.coin.sample(&mut *rng))
    }
}

fn compile(pattern: &str) -> Result<Regex, PenError> {
    Regex::new(pattern).map_err(|e| PenError::InvalidArgument {
        argument: "pattern",
        reason: e.to_string(),
    })
}
