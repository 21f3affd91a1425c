/// Errors surfaced synchronously by the search engine.
///
/// Only configuration problems reach the caller. Failures while walking the
/// filesystem are contained inside the worker and reported through the
/// consumer's `messaging`/`blocked` channel instead.
use crate::pattern::PatternError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// `search` was called while workers from a previous search still run.
    #[error("Search in progress: {active} worker(s) still running")]
    SearchInProgress { active: usize },

    /// A target's name pattern could not be compiled.
    #[error("Search target #{index} is invalid: {source}")]
    InvalidPattern {
        index: usize,
        #[source]
        source: PatternError,
    },

    /// The OS refused to start a worker thread.
    #[error("Failed to spawn search worker for {}: {source}", root.display())]
    Spawn {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
