/// Search engine — owns the configuration and the running workers.
///
/// `search()` splits every anchor into single-root anchors and starts one
/// named OS thread per root. There is no pool and no work-stealing: each
/// worker walks its own subtree to completion or cancellation.
///
/// The engine is driven from a single controlling context. Mutating the
/// anchor or target lists while a search runs does not affect that search,
/// because every worker was handed its own copy at start.
pub mod cancel;
pub mod matcher;
mod worker;

pub use cancel::CancelToken;
pub use matcher::evaluate;
pub use worker::WorkerReport;

use crate::consumer::OutputConsumer;
use crate::error::SearchError;
use crate::model::{SearchAnchor, SearchTarget};
use crate::pattern::{GlobCompiler, PatternCompiler};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};
use worker::WorkerContext;

/// A started worker: its thread plus the token that stops it.
struct WorkerHandle {
    root: PathBuf,
    cancel: CancelToken,
    thread: thread::JoinHandle<WorkerReport>,
}

pub struct SearchEngine {
    anchors: Vec<SearchAnchor>,
    targets: Vec<SearchTarget>,
    /// Workers of the current (or last) search.
    workers: Vec<WorkerHandle>,
    /// Serialize `matched` calls across workers.
    sync_results: bool,
    /// One lock for the engine's lifetime, so stragglers from a killed
    /// search still serialize against a new one.
    results_lock: Arc<Mutex<()>>,
    compiler: Arc<dyn PatternCompiler>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// An engine with glob name patterns and synchronized results.
    pub fn new() -> Self {
        Self::with_compiler(Arc::new(GlobCompiler::new()))
    }

    /// An engine using `compiler` to turn name patterns into predicates.
    pub fn with_compiler(compiler: Arc<dyn PatternCompiler>) -> Self {
        Self {
            anchors: Vec::new(),
            targets: Vec::new(),
            workers: Vec::new(),
            sync_results: true,
            results_lock: Arc::new(Mutex::new(())),
            compiler,
        }
    }

    // ── Configuration ────────────────────────────────────────────────────

    pub fn add_anchor(&mut self, anchor: SearchAnchor) {
        self.anchors.push(anchor);
    }

    pub fn add_target(&mut self, target: SearchTarget) {
        self.targets.push(target);
    }

    pub fn clear_anchors(&mut self) {
        self.anchors.clear();
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn anchors(&self) -> &[SearchAnchor] {
        &self.anchors
    }

    pub fn targets(&self) -> &[SearchTarget] {
        &self.targets
    }

    /// Turning synchronization off lets workers call `matched` concurrently;
    /// the consumer must then cope with interleaved calls itself.
    /// Takes effect at the next `search`.
    pub fn set_sync_results(&mut self, sync: bool) {
        self.sync_results = sync;
    }

    pub fn sync_results(&self) -> bool {
        self.sync_results
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Start a search, reporting to `consumer`. Returns immediately with the
    /// number of workers started (one per configured root).
    ///
    /// Fails without starting anything if a previous search still has a
    /// running worker, or if a target's name pattern does not compile.
    pub fn search(&mut self, consumer: Arc<dyn OutputConsumer>) -> Result<usize, SearchError> {
        let active = self.active_worker_count();
        if active > 0 {
            return Err(SearchError::SearchInProgress { active });
        }
        // Every tracked worker has finished; collect them.
        self.join_all();

        // Validate up front so a bad pattern is a synchronous error rather
        // than a message from every worker.
        for (index, target) in self.targets.iter().enumerate() {
            target
                .compile(self.compiler.as_ref())
                .map_err(|source| SearchError::InvalidPattern { index, source })?;
        }

        let splits: Vec<SearchAnchor> = self.anchors.iter().flat_map(SearchAnchor::split).collect();
        if splits.is_empty() {
            warn!("Search started with no roots configured");
        }

        let results_lock = self.sync_results.then(|| Arc::clone(&self.results_lock));

        for (n, anchor) in splits.into_iter().enumerate() {
            let root = anchor.roots[0].clone();
            let cancel = CancelToken::new();
            let ctx = WorkerContext {
                anchor,
                targets: self.targets.clone(),
                compiler: Arc::clone(&self.compiler),
                cancel: cancel.clone(),
                consumer: Arc::clone(&consumer),
                results_lock: results_lock.clone(),
            };

            let spawned = thread::Builder::new()
                .name(format!("rootseek-worker-{n}"))
                .spawn(move || worker::run_worker(ctx));

            match spawned {
                Ok(thread) => self.workers.push(WorkerHandle {
                    root,
                    cancel,
                    thread,
                }),
                Err(source) => {
                    error!("Failed to spawn worker for {}: {source}", root.display());
                    self.kill_search();
                    return Err(SearchError::Spawn { root, source });
                }
            }
        }

        info!(
            "Search started: {} worker(s), {} target(s), results {}",
            self.workers.len(),
            self.targets.len(),
            if self.sync_results { "synchronized" } else { "unsynchronized" }
        );
        Ok(self.workers.len())
    }

    /// Signal every tracked worker to stop and forget them. Does not wait;
    /// workers finish their current directory and exit on their own.
    pub fn kill_search(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        debug!("Cancelling {} worker(s)", self.workers.len());
        for worker in self.workers.drain(..) {
            worker.cancel.cancel();
        }
    }

    /// Block until every tracked worker has stopped, then forget them.
    ///
    /// A worker that panicked is logged, not propagated.
    pub fn join_all(&mut self) {
        for worker in self.workers.drain(..) {
            match worker.thread.join() {
                Ok(report) => debug!(
                    "Joined worker for {}: {} matches, {} blocked",
                    worker.root.display(),
                    report.matches,
                    report.blocked
                ),
                Err(_) => error!("Worker for {} panicked", worker.root.display()),
            }
        }
    }

    /// `true` while any tracked worker is still running. Non-blocking.
    pub fn has_active_workers(&self) -> bool {
        self.workers.iter().any(|w| !w.thread.is_finished())
    }

    /// Number of tracked workers that are still running.
    pub fn active_worker_count(&self) -> usize {
        self.workers.iter().filter(|w| !w.thread.is_finished()).count()
    }

    /// Number of tracked workers, running or finished but not yet joined.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Cancel any running search and clear both anchors and targets.
    pub fn reset(&mut self) {
        self.kill_search();
        self.clear_anchors();
        self.clear_targets();
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.kill_search();
    }
}
