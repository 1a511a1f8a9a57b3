//! Progress reporting for chunk processing.
//!
//! The summarizer reports `(current, total, label)` before each chunk request.
//! Sinks are fire-and-forget and must return quickly; the summarizer never
//! waits on them.

pub const DEFAULT_PROGRESS_LABEL: &str = "Operation in progress. Please wait.";

pub trait ProgressSink: Send + Sync {
    fn update(&self, current: usize, total: usize, label: &str);

    /// Called once all chunks of a run were summarized.
    fn finish(&self) {}
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn update(&self, _current: usize, _total: usize, _label: &str) {}
}

/// Writes progress updates to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn update(&self, current: usize, total: usize, label: &str) {
        log::info!("[{}/{}] {}", current, total, label);
    }

    fn finish(&self) {
        log::info!("Summarization complete");
    }
}
