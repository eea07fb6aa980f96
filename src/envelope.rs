//! Serialisation envelope for Pens.
//!
//! The envelope is the tuple storage collaborators exchange: intern
//! flag, relation tag, rank as a 32-bit array, token vector, and
//! sentinel. JSON is the carrier here because no particular wire layout
//! is required; anything serde speaks would do.
//!
//! Deserialisation trusts the rank - `into_pen` goes through
//! [`Pen::from_raw_parts`] without re-validation. What *is* checked is
//! the envelope itself: missing fields, non-JSON payloads, and rank
//! entries that cannot be positions at all surface as
//! [`PenError::Integrity`].

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::compare::{StringRelation, TokenComparer};
use crate::error::PenError;
use crate::pen::Pen;
use crate::types::Token;

/// A Pen, flattened for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenEnvelope {
    pub interned: bool,
    pub relation: StringRelation,
    pub rank: Vec<i32>,
    pub context: Vec<Token>,
    pub sentinel: Token,
}

impl PenEnvelope {
    /// Flatten a Pen.
    ///
    /// Only tagged relations can travel; a Pen carrying an opaque
    /// comparer hook has no serialisable order and is refused.
    pub fn from_pen(pen: &Pen) -> Result<Self, PenError> {
        let relation = pen.comparer().relation().ok_or(PenError::InvalidArgument {
            argument: "pen",
            reason: "a custom comparer hook cannot be serialised".to_string(),
        })?;
        Ok(PenEnvelope {
            interned: pen.interned(),
            relation,
            rank: pen.rank().iter().map(|&p| p as i32).collect(),
            context: pen.context().to_vec(),
            sentinel: pen.sentinel().clone(),
        })
    }

    /// Reassemble the Pen, trusting the rank.
    pub fn into_pen(self) -> Result<Pen, PenError> {
        let mut rank = Vec::with_capacity(self.rank.len());
        for &entry in &self.rank {
            if entry < 0 {
                return Err(PenError::Integrity {
                    reason: format!("rank entry {} is negative", entry),
                });
            }
            rank.push(entry as usize);
        }
        Ok(Pen::from_raw_parts(
            self.interned,
            TokenComparer::from(self.relation),
            rank,
            self.context,
            self.sentinel,
        ))
    }

    /// Write the envelope as JSON.
    pub fn to_json<W: Write>(&self, writer: W) -> Result<(), PenError> {
        serde_json::to_writer(writer, self).map_err(|e| PenError::Integrity {
            reason: e.to_string(),
        })
    }

    /// Read an envelope from JSON.
    pub fn from_json<R: Read>(reader: R) -> Result<Self, PenError> {
        serde_json::from_reader(reader).map_err(|e| PenError::Integrity {
            reason: e.to_string(),
        })
    }
}
