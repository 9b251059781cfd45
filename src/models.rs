//! Records handed to the persistence collaborator.
//!
//! A re-chunked document always replaces every stored row for its
//! `file_identifier`; rows are unique on `(file_identifier, chunk_index)`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mdchunk_core::Chunk;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Per-document summary written alongside its chunks.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub file_identifier: String,
    pub filename: String,
    /// Parent path of the identifier, or `"root"`.
    pub folder: String,
    pub size_bytes: usize,
    pub chunk_count: usize,
    pub total_tokens: usize,
    /// Frontmatter `key: value` pairs.
    pub metadata: BTreeMap<String, String>,
    pub indexed_at: DateTime<Utc>,
}

impl DocumentInfo {
    pub fn new(file_identifier: &str, raw_text: &str, metadata: BTreeMap<String, String>) -> Self {
        let (folder, filename) = match file_identifier.rsplit_once('/') {
            Some((folder, name)) if !folder.is_empty() => (folder.to_string(), name.to_string()),
            Some((_, name)) => ("root".to_string(), name.to_string()),
            None => ("root".to_string(), file_identifier.to_string()),
        };

        Self {
            file_identifier: file_identifier.to_string(),
            filename,
            folder,
            size_bytes: raw_text.len(),
            chunk_count: 0,
            total_tokens: 0,
            metadata,
            indexed_at: Utc::now(),
        }
    }
}

/// One stored chunk row.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkRecord {
    /// UUID v5 of `file_identifier` and `chunk_index`; stable across runs.
    pub id: String,
    pub chunk: Chunk,
    /// The text that was (or would be) embedded.
    pub embed_text: String,
    /// SHA-256 of `embed_text`, for staleness checks.
    pub content_hash: String,
    pub embedding: Option<Vec<f32>>,
}

impl ChunkRecord {
    pub fn new(chunk: Chunk, embed_text: String) -> Self {
        Self {
            id: chunk_id(&chunk.file_identifier, chunk.chunk_index),
            content_hash: content_hash(&embed_text),
            chunk,
            embed_text,
            embedding: None,
        }
    }
}

/// Deterministic row id for a `(file_identifier, chunk_index)` pair.
pub fn chunk_id(file_identifier: &str, chunk_index: usize) -> String {
    let name = format!("{}#{}", file_identifier, chunk_index);
    Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()).to_string()
}

/// Hex SHA-256 of `text`.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
