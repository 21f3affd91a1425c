/// In-memory consumer — keeps everything it is told.
///
/// Handy for front ends that render results after the search finishes, and
/// for tests.
use crate::consumer::OutputConsumer;
use crate::model::FoundEntry;
use parking_lot::Mutex;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CollectingConsumer {
    matches: Mutex<Vec<FoundEntry>>,
    blocked: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
}

impl CollectingConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every match received so far, in arrival order.
    pub fn matches(&self) -> Vec<FoundEntry> {
        self.matches.lock().clone()
    }

    /// Paths of matches received so far, in arrival order.
    pub fn matched_paths(&self) -> Vec<PathBuf> {
        self.matches.lock().iter().map(|e| e.path.clone()).collect()
    }

    /// Directories reported as unreadable, in arrival order.
    pub fn blocked_paths(&self) -> Vec<String> {
        self.blocked.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn match_count(&self) -> usize {
        self.matches.lock().len()
    }
}

impl OutputConsumer for CollectingConsumer {
    fn messaging(&self, text: &str) {
        self.messages.lock().push(text.to_owned());
    }

    fn blocked(&self, path: &str) {
        self.blocked.lock().push(path.to_owned());
    }

    fn matched(&self, entry: &FoundEntry) {
        self.matches.lock().push(entry.clone());
    }
}
