//! Configuration file support for the demo driver.
//!
//! The config mirrors the key groups of the original system: text
//! source, tokeniser, shattering options, pen construction, and
//! generator settings. Everything is optional; CLI flags override file
//! values, and the built-in defaults cover the rest.
//!
//! Web-source keys are parsed for layout compatibility but not acted
//! on - fetching documents is a collaborator's job, not this binary's.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compare::StringRelation;
use crate::error::PenError;
use crate::shatter::ShatteringOptions;
use crate::types::Token;

/// Root of the JSON config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub text: TextConfig,
    pub tokenizer: TokenizerConfig,
    pub shattering_options: ShatteringOptions,
    pub pen: PenConfig,
    pub random_generator: GeneratorConfig,
}

/// Where the corpus text comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextConfig {
    /// Local file to read; stdin when absent.
    pub file: Option<PathBuf>,
    /// Accepted but unused; downloading is out of scope.
    pub web_source: Option<WebSourceConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebSourceConfig {
    pub base_address: Option<String>,
    pub request_uri: Option<String>,
    pub encoding: Option<String>,
}

/// Which splitter to run and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenizerConfig {
    pub mode: SplitMode,
    /// Regex for the regex modes.
    pub pattern: String,
    /// Keep separators as tokens (regex-split mode).
    pub inclusive: bool,
    /// Literal separators (substring mode).
    pub separators: Vec<String>,
    /// Drop empty segments eagerly (substring mode).
    pub remove_empty: bool,
    /// Breakpoint probability (random mode).
    pub probability: f64,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            mode: SplitMode::RegexSplit,
            pattern: r"\s+".to_string(),
            inclusive: true,
            separators: Vec::new(),
            remove_empty: false,
            probability: 0.5,
        }
    }
}

/// The splitting strategies the driver knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    RegexSplit,
    RegexMatch,
    Substring,
    Chars,
    Lines,
    Random,
}

/// Pen construction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PenConfig {
    pub comparison_type: StringRelation,
    pub sentinel_token: Token,
    pub intern: bool,
}

impl Default for PenConfig {
    fn default() -> Self {
        PenConfig {
            comparison_type: StringRelation::Ordinal,
            sentinel_token: None,
            intern: false,
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Window size: how many recent tokens condition the next pick.
    pub relevant_tokens: usize,
    pub seed: Option<u64>,
    pub from_position: Option<usize>,
    /// Upper bound on emitted tokens; rendering may stop earlier.
    pub max_tokens: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            relevant_tokens: 4,
            seed: None,
            from_position: None,
            max_tokens: 256,
        }
    }
}

impl AppConfig {
    /// Load a config file, surfacing malformed JSON as an integrity
    /// error naming the file.
    pub fn load(path: &Path) -> Result<Self, PenError> {
        let file = File::open(path).map_err(|e| PenError::InvalidArgument {
            argument: "config",
            reason: format!("{}: {}", path.display(), e),
        })?;
        serde_json::from_reader(file).map_err(|e| PenError::Integrity {
            reason: format!("{}: {}", path.display(), e),
        })
    }
}
