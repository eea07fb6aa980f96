// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the quill command-line interface.
//!
//! Four subcommands: `generate` renders stochastic text from a corpus,
//! `count` and `positions` query a sample against it, and `inspect`
//! prints corpus and rank statistics. Every subcommand reads the corpus
//! from a file (or stdin) and accepts a JSON config file whose values
//! individual flags override.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use quill::{SplitMode, StringRelation};

#[derive(Parser)]
#[command(
    name = "quill",
    about = "Corpus-driven stochastic text generator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand: input, config, tokenisation, pen.
#[derive(Args)]
pub struct CorpusArgs {
    /// Corpus file; stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// JSON config file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Splitting strategy
    #[arg(long, value_enum)]
    pub mode: Option<SplitMode>,

    /// Regex for the regex modes
    #[arg(long)]
    pub pattern: Option<String>,

    /// Comparison relation tag (e.g. Ordinal, OrdinalIgnoreCase)
    #[arg(long)]
    pub comparison: Option<StringRelation>,

    /// Sentinel token; rendering stops on tokens equivalent to it.
    /// Absent by default, which makes absent tokens the stops.
    #[arg(long)]
    pub sentinel: Option<String>,

    /// Deduplicate equal token strings into shared storage
    #[arg(long)]
    pub intern: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render stochastic text from the corpus
    Generate {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Window size: how many recent tokens condition each pick
        #[arg(short = 'k', long)]
        relevant_tokens: Option<usize>,

        /// Picker seed; omit for a process-local random picker
        #[arg(long)]
        seed: Option<u64>,

        /// Start by replaying the corpus window at this position
        #[arg(long)]
        from_position: Option<usize>,

        /// Upper bound on rendered tokens
        #[arg(long)]
        max_tokens: Option<usize>,

        /// String placed between printed tokens
        #[arg(long, default_value = "")]
        joiner: String,
    },

    /// Count the occurrences of a sample
    Count {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Sample tokens, in order
        #[arg(required = true)]
        sample: Vec<String>,
    },

    /// List the positions where a sample occurs
    Positions {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Sample tokens, in order
        #[arg(required = true)]
        sample: Vec<String>,

        /// Print at most this many positions
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Print corpus and suffix-rank statistics
    Inspect {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}
