//! Corpus-driven stochastic text generation over a suffix-ranked index.
//!
//! The core object is the [`Pen`]: an immutable index over a token
//! vector that can locate any sample in logarithmic time and render new
//! text by Markov-style sampling among the corpus continuations of the
//! most recent window.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌───────────┐     ┌────────────┐
//! │ tokenize / │────▶│  pen.rs   │────▶│ render.rs  │
//! │ shatter    │     │ (queries, │     │ (lazy      │
//! │ (corpus in)│     │  assembly)│     │  stream)   │
//! └────────────┘     └───────────┘     └────────────┘
//!                          │                  │
//!                    ┌─────┴─────┐      ┌─────┴─────┐
//!                    │  rank.rs  │      │ matcher.rs│
//!                    │ (suffix   │      │ (cyclic   │
//!                    │  order)   │      │  search)  │
//!                    └───────────┘      └───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use quill::{Pen, StringRelation, token};
//!
//! let tokens = "the cat sat on the mat"
//!     .split_whitespace()
//!     .map(|word| token(word))
//!     .collect::<Vec<_>>();
//! let pen = Pen::new(tokens, StringRelation::Ordinal, None, false);
//!
//! assert_eq!(pen.count(&[token("the")]), 2);
//!
//! let rendered: Vec<_> = pen
//!     .render(2, |_candidates: usize| 0, Some(0))
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert!(!rendered.is_empty());
//! ```

// Module declarations
mod compare;
pub mod config;
mod envelope;
mod error;
mod matcher;
mod pen;
mod rank;
mod render;
mod shatter;
pub mod testing;
mod tokenize;
mod types;

// Re-exports for public API
pub use compare::{CompareFn, StringRelation, TokenComparer};
pub use config::{AppConfig, GeneratorConfig, PenConfig, SplitMode, TokenizerConfig};
pub use envelope::PenEnvelope;
pub use error::PenError;
pub use pen::Pen;
pub use rank::is_rank_sorted;
pub use render::{DefaultPicker, Picker, RandomPicker, Render};
pub use shatter::ShatteringOptions;
pub use tokenize::{
    BernoulliSplitTokenizer, CharTokenizer, LineTokenizer, MatchExtractor, RandomSplitTokenizer,
    RegexMatchTokenizer, RegexSplitTokenizer, SubstringSplitTokenizer, Tokenizer,
};
pub use types::{token, Token};
