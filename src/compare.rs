// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String comparison relations and the token comparer.
//!
//! Tokens are ordered by a configurable relation. The six tagged
//! relations cover the ordinal and culture-style orderings; the opaque
//! hook lets callers plug in anything else that behaves like a pure
//! total order over optional strings.
//!
//! Under every tagged relation the absent token compares strictly below
//! any present string, and equal only to itself. Custom comparers receive
//! both options and decide absent-handling on their own.
//!
//! The culture relations compare NFC-normalised scalar streams (no locale
//! tables are shipped, so current-culture and invariant-culture order the
//! same way). Without the `unicode-normalization` feature they degrade to
//! the corresponding ordinal relation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

use crate::error::PenError;

/// Tagged comparison relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringRelation {
    Ordinal,
    OrdinalIgnoreCase,
    InvariantCulture,
    InvariantCultureIgnoreCase,
    CurrentCulture,
    CurrentCultureIgnoreCase,
}

impl StringRelation {
    /// Compare two present strings under this relation.
    pub fn compare_str(self, a: &str, b: &str) -> Ordering {
        match self {
            StringRelation::Ordinal => a.cmp(b),
            StringRelation::OrdinalIgnoreCase => folded(a).cmp(folded(b)),
            StringRelation::InvariantCulture | StringRelation::CurrentCulture => {
                normalized(a).cmp(normalized(b))
            }
            StringRelation::InvariantCultureIgnoreCase
            | StringRelation::CurrentCultureIgnoreCase => {
                folded_normalized(a).cmp(folded_normalized(b))
            }
        }
    }

    /// The canonical tag, as accepted by [`StringRelation::from_str`].
    pub fn tag(self) -> &'static str {
        match self {
            StringRelation::Ordinal => "Ordinal",
            StringRelation::OrdinalIgnoreCase => "OrdinalIgnoreCase",
            StringRelation::InvariantCulture => "InvariantCulture",
            StringRelation::InvariantCultureIgnoreCase => "InvariantCultureIgnoreCase",
            StringRelation::CurrentCulture => "CurrentCulture",
            StringRelation::CurrentCultureIgnoreCase => "CurrentCultureIgnoreCase",
        }
    }
}

impl fmt::Display for StringRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for StringRelation {
    type Err = PenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ordinal" => Ok(StringRelation::Ordinal),
            "OrdinalIgnoreCase" => Ok(StringRelation::OrdinalIgnoreCase),
            "InvariantCulture" => Ok(StringRelation::InvariantCulture),
            "InvariantCultureIgnoreCase" => Ok(StringRelation::InvariantCultureIgnoreCase),
            "CurrentCulture" => Ok(StringRelation::CurrentCulture),
            "CurrentCultureIgnoreCase" => Ok(StringRelation::CurrentCultureIgnoreCase),
            other => Err(PenError::InvalidArgument {
                argument: "relation",
                reason: format!("unsupported comparison relation tag `{}`", other),
            }),
        }
    }
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

#[cfg(feature = "unicode-normalization")]
fn normalized(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfc()
}

#[cfg(not(feature = "unicode-normalization"))]
fn normalized(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
}

#[cfg(feature = "unicode-normalization")]
fn folded_normalized(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfc().flat_map(char::to_lowercase)
}

#[cfg(not(feature = "unicode-normalization"))]
fn folded_normalized(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Signature of the opaque comparer hook.
pub type CompareFn = dyn Fn(Option<&str>, Option<&str>) -> Ordering + Send + Sync;

/// A total order over tokens: a tagged relation or an opaque hook.
#[derive(Clone)]
pub enum TokenComparer {
    /// One of the six fixed relations; absent sorts below present.
    Relation(StringRelation),
    /// A caller-supplied pure comparison over optional strings.
    Custom(Arc<CompareFn>),
}

impl TokenComparer {
    /// Compare two tokens.
    pub fn compare(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        match self {
            TokenComparer::Relation(relation) => match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => relation.compare_str(a, b),
            },
            TokenComparer::Custom(hook) => hook(a, b),
        }
    }

    /// Whether two tokens are equivalent under this comparer.
    pub fn equivalent(&self, a: Option<&str>, b: Option<&str>) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// The tagged relation, if this comparer carries one.
    pub fn relation(&self) -> Option<StringRelation> {
        match self {
            TokenComparer::Relation(relation) => Some(*relation),
            TokenComparer::Custom(_) => None,
        }
    }
}

impl From<StringRelation> for TokenComparer {
    fn from(relation: StringRelation) -> Self {
        TokenComparer::Relation(relation)
    }
}

impl fmt::Debug for TokenComparer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenComparer::Relation(relation) => {
                f.debug_tuple("Relation").field(relation).finish()
            }
            TokenComparer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
