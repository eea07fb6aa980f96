//! Error type for Pen construction, queries, and rendering.

use std::fmt;

/// Everything that can go wrong at the library surface.
///
/// Each variant carries the offending values so callers can report them
/// without re-deriving context. Rendering errors surface through the
/// iterator on the advance that hit them; everything else surfaces at the
/// call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PenError {
    /// A caller-supplied argument is out of range or malformed.
    InvalidArgument {
        /// Name of the offending parameter.
        argument: &'static str,
        reason: String,
    },
    /// The picker returned a value outside its declared range.
    ///
    /// The declared range is `[0, max(bound, 1))` where `bound` is the
    /// candidate count the picker was called with.
    InvalidPick { picked: usize, bound: usize },
    /// A deserialised envelope is missing fields or otherwise mangled.
    Integrity { reason: String },
}

impl fmt::Display for PenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenError::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument `{}`: {}", argument, reason)
            }
            PenError::InvalidPick { picked, bound } => {
                write!(
                    f,
                    "picker returned {} for {} candidate(s); expected a value below {}",
                    picked,
                    bound,
                    (*bound).max(1)
                )
            }
            PenError::Integrity { reason } => {
                write!(f, "envelope integrity violation: {}", reason)
            }
        }
    }
}

impl std::error::Error for PenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_offending_values() {
        let err = PenError::InvalidPick {
            picked: 7,
            bound: 3,
        };
        let text = err.to_string();
        assert!(text.contains('7'));
        assert!(text.contains('3'));
    }

    #[test]
    fn display_invalid_argument_names_parameter() {
        let err = PenError::InvalidArgument {
            argument: "from_position",
            reason: "9 exceeds corpus length 4".to_string(),
        };
        assert!(err.to_string().contains("from_position"));
    }
}
