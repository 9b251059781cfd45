//! Indexing pipeline orchestration.
//!
//! Coordinates the flow for each document: frontmatter → chunking →
//! optional heading re-injection → batched embedding → store. The store is
//! written once per document, after every other step has succeeded, so a
//! failure never leaves a half-indexed document behind.
//!
//! Batch runs skip documents that fail (tokenizer, embedding, or store
//! errors) and report them in [`IndexStats`]. Configuration errors cannot
//! reach this stage: they are rejected when the [`Chunker`] is built.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use mdchunk_core::contextualize::contextualize;
use mdchunk_core::frontmatter::split_frontmatter;
use mdchunk_core::Chunker;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::models::{ChunkRecord, DocumentInfo};
use crate::store::ChunkStore;

/// A document that could not be indexed.
#[derive(Debug, Clone)]
pub struct IndexFailure {
    pub file_identifier: String,
    pub error: String,
}

/// Totals for a batch run.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub documents: usize,
    pub chunks: usize,
    pub tokens: usize,
    pub failures: Vec<IndexFailure>,
}

impl IndexStats {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn avg_tokens_per_chunk(&self) -> usize {
        if self.chunks == 0 {
            0
        } else {
            self.tokens / self.chunks
        }
    }
}

/// Chunks documents and hands the results to a [`ChunkStore`].
pub struct Indexer {
    chunker: Chunker,
    store: Arc<dyn ChunkStore>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    batch_size: usize,
    contextualize: bool,
}

impl Indexer {
    pub fn new(chunker: Chunker, store: Arc<dyn ChunkStore>) -> Self {
        Self {
            chunker,
            store,
            embedder: None,
            batch_size: 10,
            contextualize: false,
        }
    }

    /// Build an indexer from a validated [`Config`].
    pub fn from_config(config: &Config, store: Arc<dyn ChunkStore>) -> Result<Self> {
        let chunker = config.chunking.build_chunker()?;
        Ok(Self::new(chunker, store)
            .batch_size(config.indexing.batch_size)
            .contextualize(config.indexing.contextualize))
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Texts per embedding call. Values below 1 are treated as 1.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Embed chunk text with its heading re-stamped on top.
    pub fn contextualize(mut self, enabled: bool) -> Self {
        self.contextualize = enabled;
        self
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Index one document, replacing anything stored under its identifier.
    pub async fn index_document(&self, file_identifier: &str, raw_text: &str) -> Result<DocumentInfo> {
        let (metadata, body) = split_frontmatter(raw_text);
        let mut info = DocumentInfo::new(file_identifier, raw_text, metadata);

        let chunks = self
            .chunker
            .chunk_document(file_identifier, body)
            .with_context(|| format!("Failed to chunk {}", file_identifier))?;
        info.chunk_count = chunks.len();
        info.total_tokens = chunks.iter().map(|c| c.token_count).sum();

        let mut records: Vec<ChunkRecord> = chunks
            .into_iter()
            .map(|chunk| {
                let embed_text = if self.contextualize {
                    contextualize(&chunk).into_owned()
                } else {
                    chunk.text.clone()
                };
                ChunkRecord::new(chunk, embed_text)
            })
            .collect();

        if let Some(embedder) = &self.embedder {
            self.embed_records(embedder.as_ref(), &mut records)
                .await
                .with_context(|| format!("Failed to embed {}", file_identifier))?;
        }

        self.store
            .replace_document(&info, &records)
            .await
            .with_context(|| format!("Failed to store {}", file_identifier))?;

        info!(
            file = file_identifier,
            chunks = info.chunk_count,
            tokens = info.total_tokens,
            "indexed document"
        );
        Ok(info)
    }

    /// Index many documents, skipping the ones that fail.
    pub async fn index_documents<I, S, T>(&self, documents: I) -> IndexStats
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut stats = IndexStats::default();

        for (file_identifier, text) in documents {
            let file_identifier = file_identifier.as_ref();
            match self.index_document(file_identifier, text.as_ref()).await {
                Ok(info) => {
                    stats.documents += 1;
                    stats.chunks += info.chunk_count;
                    stats.tokens += info.total_tokens;
                }
                Err(e) => {
                    warn!(file = file_identifier, error = %format!("{:#}", e), "skipping document");
                    stats.failures.push(IndexFailure {
                        file_identifier: file_identifier.to_string(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        info!(
            documents = stats.documents,
            failed = stats.failed(),
            chunks = stats.chunks,
            "index run complete"
        );
        stats
    }

    async fn embed_records(
        &self,
        embedder: &dyn EmbeddingProvider,
        records: &mut [ChunkRecord],
    ) -> Result<()> {
        for batch in records.chunks_mut(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|r| r.embed_text.clone()).collect();
            let vectors = embedder.embed(&texts).await?;

            if vectors.len() != batch.len() {
                bail!(
                    "{} returned {} vectors for {} texts",
                    embedder.model_name(),
                    vectors.len(),
                    batch.len()
                );
            }

            for (record, vector) in batch.iter_mut().zip(vectors) {
                if vector.len() != embedder.dims() {
                    bail!(
                        "{} returned a {}-dim vector, expected {}",
                        embedder.model_name(),
                        vector.len(),
                        embedder.dims()
                    );
                }
                record.embedding = Some(vector);
            }
            debug!(batch = batch.len(), "embedded batch");
        }
        Ok(())
    }
}
