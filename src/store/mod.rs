//! Persistence seam for chunk records.
//!
//! The [`ChunkStore`] trait is the contract the indexing pipeline expects
//! from the external persistence/query collaborator. Rows are unique on
//! `(file_identifier, chunk_index)` and a document is always written as a
//! whole: [`replace_document`](ChunkStore::replace_document) drops every
//! existing row for the identifier before inserting the new ones. There is
//! no partial or merge update.
//!
//! [`memory::InMemoryStore`] is the reference implementation.

pub mod memory;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::{ChunkRecord, DocumentInfo};

/// Abstract storage backend for chunked documents.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`replace_document`](ChunkStore::replace_document) | Replace a document and all its chunks |
/// | [`chunks`](ChunkStore::chunks) | Chunks of one document, by `chunk_index` |
/// | [`documents`](ChunkStore::documents) | All stored document summaries |
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Replace the document and every chunk row for `info.file_identifier`.
    async fn replace_document(&self, info: &DocumentInfo, records: &[ChunkRecord]) -> Result<()>;

    /// Chunks for one document in `chunk_index` order.
    async fn chunks(&self, file_identifier: &str) -> Result<Vec<ChunkRecord>>;

    /// All stored documents, ordered by identifier.
    async fn documents(&self) -> Result<Vec<DocumentInfo>>;
}

/// Reject a batch that would violate the `(file_identifier, chunk_index)`
/// uniqueness constraint or mix documents.
pub fn check_records(info: &DocumentInfo, records: &[ChunkRecord]) -> Result<()> {
    for (expected, record) in records.iter().enumerate() {
        if record.chunk.file_identifier != info.file_identifier {
            bail!(
                "chunk {} belongs to '{}', not '{}'",
                record.chunk.chunk_index,
                record.chunk.file_identifier,
                info.file_identifier
            );
        }
        if record.chunk.chunk_index != expected {
            bail!(
                "chunk indices for '{}' must be contiguous from 0: expected {}, got {}",
                info.file_identifier,
                expected,
                record.chunk.chunk_index
            );
        }
    }
    Ok(())
}
