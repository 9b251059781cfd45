//! `mdchunk stats`: chunking summary for a set of files.
//!
//! Runs the full indexing pipeline (without embeddings) into an in-memory
//! store and prints per-file chunk and token counts, so chunk settings can
//! be tuned before anything is sent to a real embedding service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::index::{IndexFailure, Indexer};
use crate::store::memory::InMemoryStore;
use crate::store::ChunkStore;

/// Run the stats command over `files` and print a summary.
pub async fn run_stats(config: &Config, files: &[PathBuf]) -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let indexer = Indexer::from_config(config, store.clone())?;

    let mut unreadable = Vec::new();
    let mut documents = Vec::new();
    for path in files {
        let id = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(text) => documents.push((id, text)),
            Err(e) => unreadable.push(IndexFailure {
                file_identifier: id,
                error: e.to_string(),
            }),
        }
    }

    let stats = indexer.index_documents(documents).await;
    let docs = store.documents().await?;

    println!("mdchunk — Chunk Stats");
    println!("=====================");
    println!();
    println!("  Tokenizer:   {}", indexer.chunker().tokenizer().name());
    println!(
        "  Limits:      max {} / overlap {} tokens",
        indexer.chunker().limits().max_tokens(),
        indexer.chunker().limits().overlap_tokens()
    );
    println!();

    if !docs.is_empty() {
        println!(
            "  {:<40} {:>10} {:>8} {:>8}",
            "FILE", "SIZE", "CHUNKS", "TOKENS"
        );
        println!("  {}", "-".repeat(70));
        for doc in &docs {
            println!(
                "  {:<40} {:>10} {:>8} {:>8}",
                doc.file_identifier,
                format_bytes(doc.size_bytes as u64),
                doc.chunk_count,
                doc.total_tokens
            );
        }
        println!();
    }

    println!("  Documents:   {}", stats.documents);
    println!("  Chunks:      {}", stats.chunks);
    println!("  Tokens:      {}", stats.tokens);
    println!("  Avg tokens/chunk: {}", stats.avg_tokens_per_chunk());

    let failures: Vec<&IndexFailure> = unreadable.iter().chain(stats.failures.iter()).collect();
    if !failures.is_empty() {
        println!();
        println!("  Skipped:     {}", failures.len());
        for f in failures {
            eprintln!("  Warning: skipped {}: {}", f.file_identifier, f.error);
        }
    }
    println!();

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
