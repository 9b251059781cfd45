//! Token-bounded, overlapping windows over a single section.
//!
//! Used by the assembler for sections whose token count exceeds
//! `max_tokens`. The section is encoded once and walked with a cursor:
//!
//! 1. Take up to `max_tokens` tokens from the cursor and decode them.
//! 2. If tokens remain after this window, look for the last paragraph
//!    break (`\n\n`) in the decoded text. When it sits at or past the
//!    middle of the window (counted in characters), cut the window there
//!    and re-encode the kept text to learn how many tokens it really covers.
//! 3. Emit the window and move the cursor back `overlap_tokens` from the
//!    window's end, so adjacent windows share context.
//! 4. Stop once a window reaches the last token.
//!
//! The trim keeps paragraphs intact at window tails at the cost of exact
//! window sizes.

use tracing::debug;

use crate::error::ChunkError;
use crate::tokenizer::{Token, TokenCounter};

/// Most tokens dropped from either edge of a window to reach a decodable
/// span. A UTF-8 character is at most 4 bytes, so an incomplete one spans
/// at most 3 byte-level tokens.
const MAX_ALIGN_TOKENS: usize = 3;

/// Validated window bounds.
///
/// `overlap_tokens >= max_tokens` would stop the cursor from advancing and
/// is rejected at construction, before any document is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    max_tokens: usize,
    overlap_tokens: usize,
}

impl ChunkLimits {
    pub const DEFAULT_MAX_TOKENS: usize = 500;
    pub const DEFAULT_OVERLAP_TOKENS: usize = 100;

    pub fn new(max_tokens: usize, overlap_tokens: usize) -> Result<Self, ChunkError> {
        if max_tokens == 0 {
            return Err(ChunkError::config("max_tokens", "must be > 0"));
        }
        if overlap_tokens >= max_tokens {
            return Err(ChunkError::config(
                "overlap_tokens",
                format!(
                    "must be < max_tokens ({}), got {}",
                    max_tokens, overlap_tokens
                ),
            ));
        }
        Ok(Self {
            max_tokens,
            overlap_tokens,
        })
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn overlap_tokens(&self) -> usize {
        self.overlap_tokens
    }
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            overlap_tokens: Self::DEFAULT_OVERLAP_TOKENS,
        }
    }
}

/// Split `text` into overlapping windows of at most `max_tokens` tokens.
///
/// When the whole text fits, exactly one window equal to `text` is
/// returned and no trimming happens.
pub fn split_windows(
    tokenizer: &dyn TokenCounter,
    text: &str,
    limits: &ChunkLimits,
) -> Result<Vec<String>, ChunkError> {
    let tokens = tokenizer.encode(text)?;
    let total = tokens.len();
    if total <= limits.max_tokens {
        return Ok(vec![text.to_string()]);
    }

    let mut windows = Vec::new();
    let mut start = 0;
    // Tokens at the head of the window already covered by the previous one.
    let mut shared = 0;

    while start < total {
        let end = (start + limits.max_tokens).min(total);
        let max_lead = shared.min(MAX_ALIGN_TOKENS);
        let (span_start, span_end, mut window) =
            decode_span(tokenizer, &tokens, start, end, max_lead)?;
        let mut end = span_end;

        if end < total {
            if let Some(cut) = paragraph_cut(&window) {
                window.truncate(cut);
                let kept = tokenizer.count(&window)?;
                end = (span_start + kept).min(span_end);
                debug!(start, end, cut, "trimmed window at paragraph break");
            }
        }

        windows.push(window);

        if end >= total {
            break;
        }
        let next = end.saturating_sub(limits.overlap_tokens);
        if next > start && next < end {
            shared = end - next;
            start = next;
        } else {
            shared = 0;
            start = end;
        }
    }

    debug!(
        tokens = total,
        windows = windows.len(),
        "split oversized section"
    );
    Ok(windows)
}

/// Byte offset of the last paragraph break in `window`, when it lies at or
/// past the window's midpoint. Positions are compared in characters.
fn paragraph_cut(window: &str) -> Option<usize> {
    let pos = window.rfind("\n\n")?;
    let pos_chars = window[..pos].chars().count();
    let len_chars = window.chars().count();
    if pos_chars > 0 && 2 * pos_chars >= len_chars {
        Some(pos)
    } else {
        None
    }
}

/// Decode `tokens[start..end]`, nudging the edges inward when the raw span
/// splits a character.
///
/// The leading edge moves by at most `max_lead` tokens, which must already
/// be covered by the previous window; the trailing edge only moves when
/// tokens remain. Returns the span actually decoded.
fn decode_span(
    tokenizer: &dyn TokenCounter,
    tokens: &[Token],
    start: usize,
    end: usize,
    max_lead: usize,
) -> Result<(usize, usize, String), ChunkError> {
    let err = match tokenizer.decode(&tokens[start..end]) {
        Ok(text) => return Ok((start, end, text)),
        Err(err) => err,
    };

    let max_trail = if end == tokens.len() { 0 } else { MAX_ALIGN_TOKENS };

    for lead in 0..=max_lead {
        for trail in 0..=max_trail {
            if lead == 0 && trail == 0 {
                continue;
            }
            let (s, e) = (start + lead, end.saturating_sub(trail));
            if s >= e {
                continue;
            }
            if let Ok(text) = tokenizer.decode(&tokens[s..e]) {
                debug!(start = s, end = e, "aligned window to character boundary");
                return Ok((s, e, text));
            }
        }
    }

    Err(err)
}
