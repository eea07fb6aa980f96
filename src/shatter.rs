//! Options controlling how token streams are assembled from lines.
//!
//! Tokenisers work line by line; these options decide what happens to
//! empty tokens, to the boundaries between lines, and to lines that end
//! up contributing nothing.

use serde::{Deserialize, Serialize};

use crate::types::{token, Token};

/// Line-end token used when none is configured: the platform newline.
fn platform_line_end() -> Token {
    if cfg!(windows) {
        token("\r\n")
    } else {
        token("\n")
    }
}

/// How shattered tokens are filtered and stitched across lines.
///
/// | Option | Effect |
/// |---|---|
/// | `ignore_empty_tokens` | Drop absent and empty tokens after shattering. |
/// | `ignore_line_ends` | Do not emit a token between consecutive lines. |
/// | `ignore_empty_lines` | Suppress lines that produced no tokens, including their line end. |
/// | `line_end_token` | Token inserted between consecutive kept lines. |
/// | `empty_line_token` | Token standing in for a kept line that produced no tokens. |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShatteringOptions {
    pub ignore_empty_tokens: bool,
    pub ignore_line_ends: bool,
    pub ignore_empty_lines: bool,
    pub line_end_token: Token,
    pub empty_line_token: Token,
}

impl Default for ShatteringOptions {
    fn default() -> Self {
        ShatteringOptions {
            ignore_empty_tokens: false,
            ignore_line_ends: false,
            ignore_empty_lines: false,
            line_end_token: platform_line_end(),
            empty_line_token: token(""),
        }
    }
}

impl ShatteringOptions {
    /// Options that keep only substantive tokens: no empties, no line
    /// ends, no empty lines.
    pub fn trimmed() -> Self {
        ShatteringOptions {
            ignore_empty_tokens: true,
            ignore_line_ends: true,
            ignore_empty_lines: true,
            ..ShatteringOptions::default()
        }
    }
}
