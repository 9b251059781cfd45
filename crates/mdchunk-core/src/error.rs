//! Error type shared by every chunking operation.
//!
//! Two failure classes exist and callers treat them differently:
//!
//! - [`ChunkError::Config`] is raised before any document is touched. It is
//!   fatal for a whole batch and retrying cannot help.
//! - [`ChunkError::Tokenizer`] is scoped to the single document whose text
//!   could not be encoded or decoded. Batch callers may skip that document
//!   and carry on.

use thiserror::Error;

/// Errors produced by the chunking core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// A chunking parameter was rejected before processing began.
    #[error("invalid chunking configuration: {field} {reason}")]
    Config {
        field: &'static str,
        reason: String,
    },

    /// The tokenizer could not encode or decode part of a document.
    #[error("tokenizer failure: {0}")]
    Tokenizer(String),
}

impl ChunkError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        ChunkError::Config {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` for configuration errors, which must abort a batch.
    pub fn is_config(&self) -> bool {
        matches!(self, ChunkError::Config { .. })
    }
}
