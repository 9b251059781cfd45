//! Token counting backed by a fixed subword vocabulary.
//!
//! The [`TokenCounter`] trait is the only seam through which the chunker
//! measures text. Implementations are constructed once, are immutable, and
//! are shared by reference (usually as `Arc<dyn TokenCounter>`) across any
//! number of concurrent chunking calls.
//!
//! Implementations must be round-trip faithful: `decode(encode(text))`
//! reproduces `text` exactly, and encoding the same text always yields the
//! same tokens. The windowing algorithm re-encodes trimmed windows to find
//! their true size and relies on this.
//!
//! | Backend | Name | Notes |
//! |---------|------|-------|
//! | [`Cl100kTokenizer`] | `cl100k_base` | GPT-3.5/4 BPE vocabulary via `tiktoken-rs` |
//! | [`CharTokenizer`] | `char` | One token per Unicode scalar value |
//!
//! Changing the tokenizer for an existing index invalidates every stored
//! token count and embedding.

use std::sync::Arc;

use tiktoken_rs::CoreBPE;

use crate::error::ChunkError;

/// A single token id.
pub type Token = u32;

/// Deterministic text ↔ token mapping.
pub trait TokenCounter: Send + Sync {
    /// Stable identifier of the vocabulary (e.g. `"cl100k_base"`).
    fn name(&self) -> &str;

    /// Encode text into token ids.
    fn encode(&self, text: &str) -> Result<Vec<Token>, ChunkError>;

    /// Decode token ids back into text.
    ///
    /// Fails when the span does not form valid text on its own, e.g. when
    /// it starts or ends inside a multi-byte character.
    fn decode(&self, tokens: &[Token]) -> Result<String, ChunkError>;

    /// Number of tokens `text` encodes to.
    fn count(&self, text: &str) -> Result<usize, ChunkError> {
        Ok(self.encode(text)?.len())
    }
}

/// The `cl100k_base` BPE vocabulary.
///
/// Special-token strings such as `<|endoftext|>` are encoded as ordinary
/// text, so encoding never fails. Decoding a span that splits a UTF-8
/// sequence returns [`ChunkError::Tokenizer`].
pub struct Cl100kTokenizer {
    bpe: CoreBPE,
}

impl Cl100kTokenizer {
    pub const NAME: &'static str = "cl100k_base";

    /// Load the bundled vocabulary.
    pub fn new() -> Result<Self, ChunkError> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| ChunkError::Tokenizer(format!("failed to load cl100k_base: {}", e)))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for Cl100kTokenizer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn encode(&self, text: &str) -> Result<Vec<Token>, ChunkError> {
        Ok(self
            .bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|t| t as Token)
            .collect())
    }

    fn decode(&self, tokens: &[Token]) -> Result<String, ChunkError> {
        self.bpe
            .decode(tokens.iter().map(|&t| t as _).collect())
            .map_err(|e| ChunkError::Tokenizer(e.to_string()))
    }
}

/// One token per Unicode scalar value.
///
/// Exactly round-trip faithful and dependency-free, which makes token
/// arithmetic in tests easy to reason about: a string of `n` characters is
/// `n` tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharTokenizer;

impl CharTokenizer {
    pub const NAME: &'static str = "char";
}

impl TokenCounter for CharTokenizer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn encode(&self, text: &str) -> Result<Vec<Token>, ChunkError> {
        Ok(text.chars().map(|c| c as Token).collect())
    }

    fn decode(&self, tokens: &[Token]) -> Result<String, ChunkError> {
        tokens
            .iter()
            .map(|&t| {
                char::from_u32(t)
                    .ok_or_else(|| ChunkError::Tokenizer(format!("token {} is not a valid char", t)))
            })
            .collect()
    }

    fn count(&self, text: &str) -> Result<usize, ChunkError> {
        Ok(text.chars().count())
    }
}

/// Names accepted by [`tokenizer_from_name`].
pub const TOKENIZER_NAMES: [&str; 2] = [Cl100kTokenizer::NAME, CharTokenizer::NAME];

/// Check a configured tokenizer name without loading its vocabulary.
pub fn check_tokenizer_name(name: &str) -> Result<(), ChunkError> {
    if TOKENIZER_NAMES.contains(&name) {
        Ok(())
    } else {
        Err(ChunkError::config(
            "tokenizer",
            format!(
                "must be one of {}, got '{}'",
                TOKENIZER_NAMES.join(", "),
                name
            ),
        ))
    }
}

/// Build a shared tokenizer from its configured name.
///
/// Unknown names are a configuration error.
pub fn tokenizer_from_name(name: &str) -> Result<Arc<dyn TokenCounter>, ChunkError> {
    check_tokenizer_name(name)?;
    match name {
        Cl100kTokenizer::NAME => Ok(Arc::new(Cl100kTokenizer::new()?)),
        _ => Ok(Arc::new(CharTokenizer)),
    }
}
