//! Chunk planning for large documents.
//!
//! Text is wrapped greedily on whitespace into pieces of at most
//! `max_chars_per_chunk` characters, then capped to
//! `max_total_chars / max_chars_per_chunk` pieces. Only that prefix of the
//! document is ever summarized; the cap bounds cost per document regardless of
//! its length. `PlannedChunks` reports how many pieces were dropped so callers
//! can tell a full summary from a partial one.

use crate::errors::SummaryError;
use log::warn;

pub const DEFAULT_MAX_TOTAL_CHARS: usize = 9000;
pub const DEFAULT_MAX_CHARS_PER_CHUNK: usize = 4000;
pub const DEFAULT_SUMMARY_TARGET_CHARS: usize = 1000;

/// Size limits for one summarization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingPlan {
    pub max_total_chars: usize,
    pub max_chars_per_chunk: usize,
    pub summary_target_chars: usize,
}

impl Default for ChunkingPlan {
    fn default() -> Self {
        Self {
            max_total_chars: DEFAULT_MAX_TOTAL_CHARS,
            max_chars_per_chunk: DEFAULT_MAX_CHARS_PER_CHUNK,
            summary_target_chars: DEFAULT_SUMMARY_TARGET_CHARS,
        }
    }
}

impl ChunkingPlan {
    pub fn new(max_total_chars: usize, max_chars_per_chunk: usize, summary_target_chars: usize) -> Self {
        Self {
            max_total_chars,
            max_chars_per_chunk,
            summary_target_chars,
        }
    }

    pub fn with_max_chars_per_chunk(mut self, max_chars_per_chunk: usize) -> Self {
        self.max_chars_per_chunk = max_chars_per_chunk;
        self
    }

    /// Number of chunks that will actually be summarized.
    pub fn chunk_budget(&self) -> Result<usize, SummaryError> {
        if self.max_chars_per_chunk == 0 {
            return Err(SummaryError::ConfigError(
                "max_chars_per_chunk must be greater than zero".to_string(),
            ));
        }
        Ok(self.max_total_chars / self.max_chars_per_chunk)
    }
}

/// Output of a planning pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChunks {
    pub chunks: Vec<String>,
    pub total_pieces: usize,
}

impl PlannedChunks {
    /// Pieces produced by wrapping but dropped by the total-size cap.
    pub fn discarded(&self) -> usize {
        self.total_pieces - self.chunks.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.discarded() > 0
    }
}

pub struct ChunkPlanner;

impl ChunkPlanner {
    /// Wraps `text` and keeps the first `max_total_chars / max_chars_per_chunk` pieces.
    pub fn plan(
        text: &str,
        max_total_chars: usize,
        max_chars_per_chunk: usize,
    ) -> Result<PlannedChunks, SummaryError> {
        let budget = ChunkingPlan::new(max_total_chars, max_chars_per_chunk, 0).chunk_budget()?;

        let mut chunks = Self::wrap(text, max_chars_per_chunk);
        let total_pieces = chunks.len();
        chunks.truncate(budget);

        if chunks.len() < total_pieces {
            warn!(
                "Document wraps into {} chunks of <= {} chars; only the first {} fit within {} chars and will be summarized",
                total_pieces,
                max_chars_per_chunk,
                chunks.len(),
                max_total_chars
            );
        }

        Ok(PlannedChunks {
            chunks,
            total_pieces,
        })
    }

    /// Greedy word wrap. Runs of whitespace collapse to one space and a word
    /// longer than `width` is emitted whole as its own piece.
    pub fn wrap(text: &str, width: usize) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for word in text.split_whitespace() {
            let word_len = word.chars().count();

            if current.is_empty() {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                pieces.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            }
        }

        if !current.is_empty() {
            pieces.push(current);
        }

        pieces
    }
}
