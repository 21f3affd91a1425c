/// Console consumer — prints matches to stdout, diagnostics to stderr, and
/// keeps running counters for an end-of-search summary.
use crate::consumer::OutputConsumer;
use crate::model::FoundEntry;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct ConsoleConsumer {
    /// Suppress `messaging` output (counters still advance).
    quiet: bool,
    matches: AtomicU64,
    blocked: AtomicU64,
    messages: AtomicU64,
}

impl ConsoleConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    pub fn match_count(&self) -> u64 {
        self.matches.load(Ordering::Relaxed)
    }

    pub fn blocked_count(&self) -> u64 {
        self.blocked.load(Ordering::Relaxed)
    }

    pub fn message_count(&self) -> u64 {
        self.messages.load(Ordering::Relaxed)
    }
}

impl OutputConsumer for ConsoleConsumer {
    fn messaging(&self, text: &str) {
        self.messages.fetch_add(1, Ordering::Relaxed);
        if !self.quiet {
            eprintln!("{text}");
        }
    }

    fn blocked(&self, path: &str) {
        self.blocked.fetch_add(1, Ordering::Relaxed);
        if !self.quiet {
            eprintln!("blocked: {path}");
        }
    }

    fn matched(&self, entry: &FoundEntry) {
        self.matches.fetch_add(1, Ordering::Relaxed);
        // Lock stdout once per line so concurrent workers never interleave
        // within a line. A closed pipe is not worth failing a search over.
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", entry.path.display());
    }
}
