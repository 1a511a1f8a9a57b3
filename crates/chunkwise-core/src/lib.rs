//! Chunked summarization of large documents over LLM completion endpoints.
//!
//! A document is wrapped into request-sized chunks, each chunk is summarized by
//! an isolated completion, and every (chunk, summary) pair is appended to a
//! running conversation that can then answer follow-up questions.
//!
//! # Architecture Overview
//!
//! - **Conversation**: append-only, role-tagged message log used as model context
//! - **Language model integration**: provider-agnostic `LLM` trait with an
//!   OpenAI-compatible HTTP client
//! - **Chunk planning**: greedy word wrapping capped by a total character budget
//! - **Summarization**: sequential chunk processing with shrink-and-retry on
//!   oversize requests
//! - **Configuration system**: YAML configuration with environment-resolved credentials

pub mod chunking;
pub mod config;
pub mod conversation;
pub mod core_types;
pub mod errors;
pub mod llm;
pub mod progress;
pub mod summarizer;

pub use chunking::{ChunkPlanner, ChunkingPlan, PlannedChunks};
pub use config::*;
pub use conversation::Conversation;
pub use core_types::{Message, Role};
pub use errors::SummaryError;
pub use llm::LLM;
pub use progress::{LogProgress, NoopProgress, ProgressSink};
pub use summarizer::{SummaryReport, Summarizer};

#[cfg(test)]
pub mod test_utils;
