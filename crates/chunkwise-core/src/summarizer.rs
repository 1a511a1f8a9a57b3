//! Chunked summarization with adaptive retry on oversize requests.
//!
//! A run plans the text into chunks, summarizes each chunk with an isolated
//! completion, and appends a `user`/`assistant` pair per chunk to the
//! conversation. When the service rejects a chunk as too large, the run stops,
//! shrinks the chunk size and starts over from the first chunk. Pairs appended
//! before the rejection stay in the conversation; nothing is rolled back.
//!
//! Shrinking is bounded by a floor: once the next chunk size would fall below
//! it, the oversize error is returned instead of trying again. Any other
//! completion error aborts the run immediately.

use crate::chunking::{ChunkPlanner, ChunkingPlan, PlannedChunks};
use crate::conversation::Conversation;
use crate::core_types::Role;
use crate::errors::SummaryError;
use crate::llm::prompts::{summary_prompt, summary_request_record};
use crate::llm::{response_text, LLM};
use crate::progress::{NoopProgress, ProgressSink, DEFAULT_PROGRESS_LABEL};
use log::{debug, error, info, warn};
use std::sync::Arc;

pub const DEFAULT_MIN_CHARS_PER_CHUNK: usize = 1000;
pub const DEFAULT_SHRINK_FACTOR: f64 = 0.8;

/// Outcome of a successful `summarize` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    /// Chunks summarized by the final, successful attempt.
    pub chunks_summarized: usize,
    /// Chunks dropped by the total-size cap in the final attempt.
    pub chunks_discarded: usize,
    /// Chunk size the final attempt ran with.
    pub final_max_chars_per_chunk: usize,
    /// Number of shrink-and-restart cycles.
    pub retries: usize,
    /// Messages appended across all attempts, including aborted ones.
    pub messages_appended: usize,
}

pub struct Summarizer {
    llm: Arc<dyn LLM>,
    progress: Arc<dyn ProgressSink>,
    min_chars_per_chunk: usize,
    shrink_factor: f64,
    progress_label: String,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self {
            llm,
            progress: Arc::new(NoopProgress),
            min_chars_per_chunk: DEFAULT_MIN_CHARS_PER_CHUNK,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            progress_label: DEFAULT_PROGRESS_LABEL.to_string(),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the smallest chunk size a retry may shrink to
    pub fn with_min_chars_per_chunk(mut self, min_chars_per_chunk: usize) -> Self {
        self.min_chars_per_chunk = min_chars_per_chunk.max(1);
        self
    }

    /// Sets the factor applied to the chunk size on each oversize retry
    pub fn with_shrink_factor(mut self, factor: f64) -> Self {
        self.shrink_factor = factor.clamp(0.1, 0.9);
        self
    }

    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = label.into();
        self
    }

    /// Next chunk size after an oversize rejection, truncated to an integer.
    fn shrink(&self, max_chars_per_chunk: usize) -> usize {
        let per_mille = (self.shrink_factor * 1000.0).round() as usize;
        max_chars_per_chunk * per_mille / 1000
    }

    /// Summarizes `text` into `conversation`, shrinking the chunk size on
    /// oversize rejections until it succeeds or hits the floor.
    pub async fn summarize(
        &self,
        conversation: &mut Conversation,
        text: &str,
        plan: &ChunkingPlan,
    ) -> Result<SummaryReport, SummaryError> {
        let mut max_chars_per_chunk = plan.max_chars_per_chunk;
        let mut retries = 0;
        let starting_len = conversation.len();

        loop {
            let attempt = plan.with_max_chars_per_chunk(max_chars_per_chunk);
            debug!(
                "Summarization attempt {} with max_chars_per_chunk={}",
                retries + 1,
                max_chars_per_chunk
            );

            match self.run_attempt(conversation, text, &attempt).await {
                Ok(planned) => {
                    self.progress.finish();
                    if retries > 0 {
                        info!(
                            "Summarized after {} retries with max_chars_per_chunk={}",
                            retries, max_chars_per_chunk
                        );
                    }
                    return Ok(SummaryReport {
                        chunks_summarized: planned.chunks.len(),
                        chunks_discarded: planned.discarded(),
                        final_max_chars_per_chunk: max_chars_per_chunk,
                        retries,
                        messages_appended: conversation.len() - starting_len,
                    });
                }
                Err(err) if err.is_request_too_large() => {
                    let next = self.shrink(max_chars_per_chunk);
                    if next < self.min_chars_per_chunk {
                        error!(
                            "Request still too large at max_chars_per_chunk={}; next size {} is below the floor of {}",
                            max_chars_per_chunk, next, self.min_chars_per_chunk
                        );
                        return Err(err);
                    }

                    warn!(
                        "Chunk rejected as too large at max_chars_per_chunk={}, retrying with {}",
                        max_chars_per_chunk, next
                    );
                    max_chars_per_chunk = next;
                    retries += 1;
                }
                Err(err) => {
                    error!("Summarization aborted: {}", err);
                    return Err(err);
                }
            }
        }
    }

    /// One pass over the planned chunks. Stops at the first failed chunk.
    async fn run_attempt(
        &self,
        conversation: &mut Conversation,
        text: &str,
        plan: &ChunkingPlan,
    ) -> Result<PlannedChunks, SummaryError> {
        let planned = ChunkPlanner::plan(text, plan.max_total_chars, plan.max_chars_per_chunk)?;
        let total = planned.chunks.len();

        for (idx, chunk) in planned.chunks.iter().enumerate() {
            self.progress.update(idx, total, &self.progress_label);
            info!(
                "Summarizing chunk {}/{} ({} chars)",
                idx + 1,
                total,
                chunk.chars().count()
            );

            let response = self
                .llm
                .complete(&summary_prompt(chunk, plan.summary_target_chars))
                .await?;
            let summary = response_text(response)?;

            let (role, record) = summary_request_record(chunk);
            conversation.append(role, record);
            conversation.append(Role::Assistant, summary);
        }

        Ok(planned)
    }

    /// Asks a follow-up question against the whole conversation.
    ///
    /// The question is always appended. The reply is appended and returned on
    /// success; on failure the error is logged and `None` is returned, leaving
    /// no assistant turn for the question.
    pub async fn continue_conversation(
        &self,
        conversation: &mut Conversation,
        question: &str,
    ) -> Option<String> {
        conversation.append(Role::User, question);

        let history = conversation.export_for_transmission();
        let reply = match self.llm.generate(history).await {
            Ok(response) => response_text(response),
            Err(e) => Err(e),
        };

        match reply {
            Ok(answer) => {
                conversation.append(Role::Assistant, answer.clone());
                Some(answer)
            }
            Err(e) => {
                error!("Failed to continue conversation: {}", e);
                None
            }
        }
    }
}
