//! In-memory [`ChunkStore`] used by the CLI and tests.
//!
//! Rows live in `BTreeMap`s behind `std::sync::RwLock`, keyed by
//! `(file_identifier, chunk_index)`, so iteration order is stable.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::{ChunkRecord, DocumentInfo};

use super::{check_records, ChunkStore};

/// In-memory store for testing and one-shot CLI runs.
pub struct InMemoryStore {
    docs: RwLock<BTreeMap<String, DocumentInfo>>,
    chunks: RwLock<BTreeMap<(String, usize), ChunkRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
            chunks: RwLock::new(BTreeMap::new()),
        }
    }

    /// Total number of stored chunk rows across all documents.
    pub fn chunk_count(&self) -> Result<usize> {
        Ok(self.chunks.read().map_err(|_| poisoned())?.len())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

#[async_trait]
impl ChunkStore for InMemoryStore {
    async fn replace_document(&self, info: &DocumentInfo, records: &[ChunkRecord]) -> Result<()> {
        check_records(info, records)?;

        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        let mut chunks = self.chunks.write().map_err(|_| poisoned())?;

        chunks.retain(|(file, _), _| file != &info.file_identifier);
        for record in records {
            chunks.insert(
                (info.file_identifier.clone(), record.chunk.chunk_index),
                record.clone(),
            );
        }
        docs.insert(info.file_identifier.clone(), info.clone());
        Ok(())
    }

    async fn chunks(&self, file_identifier: &str) -> Result<Vec<ChunkRecord>> {
        let chunks = self.chunks.read().map_err(|_| poisoned())?;
        Ok(chunks
            .iter()
            .filter(|((file, _), _)| file == file_identifier)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn documents(&self) -> Result<Vec<DocumentInfo>> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        Ok(docs.values().cloned().collect())
    }
}
