/// Traversal worker — one per split anchor, i.e. per root directory.
///
/// Walks its subtree breadth-first with an explicit queue of pending
/// directories, so depth never grows the stack. For each directory it lists
/// the immediate files and subdirectories, evaluates every target against
/// them, delivers matches, and (when recursing) queues the subdirectories.
///
/// # Failure containment
///
/// A directory that cannot be listed is reported once through the consumer
/// (`messaging` + `blocked`) and pruned; the walk continues with whatever
/// is still queued. Nothing escapes the worker as an error.
///
/// # Cycles
///
/// Symbolic links to directories are listed, and matched, as
/// subdirectories but are never descended into. No other cycle detection
/// is done.
use crate::consumer::OutputConsumer;
use crate::engine::cancel::CancelToken;
use crate::engine::matcher::evaluate;
use crate::model::{CompiledTarget, FileAttributes, FoundEntry, SearchAnchor, SearchTarget};
use crate::pattern::PatternCompiler;
use compact_str::CompactString;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Everything a worker needs, moved into its thread.
pub(crate) struct WorkerContext {
    /// Single-root anchor produced by [`SearchAnchor::split`].
    pub anchor: SearchAnchor,
    /// Full target list, in configured order.
    pub targets: Vec<SearchTarget>,
    pub compiler: Arc<dyn PatternCompiler>,
    pub cancel: CancelToken,
    pub consumer: Arc<dyn OutputConsumer>,
    /// Shared by all workers of an engine; `None` when result
    /// synchronization is disabled.
    pub results_lock: Option<Arc<Mutex<()>>>,
}

/// What a worker did, returned through its join handle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    /// Directories dequeued and listed (or attempted).
    pub directories: u64,
    /// Directories that could not be listed.
    pub blocked: u64,
    /// Matches delivered to the consumer.
    pub matches: u64,
    /// `true` if the worker stopped because of cancellation.
    pub cancelled: bool,
}

/// The immediate contents of one directory.
#[derive(Default)]
struct Listing {
    files: Vec<FoundEntry>,
    folders: Vec<FoundEntry>,
    /// Subdirectories that may be descended into (symlinks excluded).
    descend: Vec<PathBuf>,
}

pub(crate) fn run_worker(ctx: WorkerContext) -> WorkerReport {
    let mut report = WorkerReport::default();
    let start = Instant::now();

    let Some(root) = ctx.anchor.root().map(Path::to_path_buf) else {
        return report;
    };

    // Nothing to look for means nothing to walk.
    if ctx.targets.is_empty() {
        debug!("Worker for {} has no targets; exiting", root.display());
        return report;
    }

    // Each worker compiles its own copy; predicates are never shared.
    let compiled = match compile_targets(&ctx.targets, ctx.compiler.as_ref()) {
        Ok(c) => c,
        Err(message) => {
            ctx.consumer.messaging(&message);
            return report;
        }
    };

    debug!("Worker starting at {}", root.display());

    let mut pending: VecDeque<PathBuf> = VecDeque::new();
    pending.push_back(root.clone());

    while let Some(dir) = pending.pop_front() {
        if ctx.cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        report.directories += 1;

        let listing = match list_directory(&dir) {
            Ok(l) => l,
            Err(err) => {
                report.blocked += 1;
                report_blocked(ctx.consumer.as_ref(), &dir, &err);
                continue;
            }
        };

        for target in &compiled {
            if !target.wants_directories() {
                for file in &listing.files {
                    if evaluate(target, file) {
                        deliver(&ctx, file);
                        report.matches += 1;
                    }
                }
            }
            for folder in &listing.folders {
                if evaluate(target, folder) {
                    deliver(&ctx, folder);
                    report.matches += 1;
                }
            }
        }

        if ctx.anchor.recurse_subfolders {
            pending.extend(listing.descend);
        }
    }

    debug!(
        "Worker for {} finished: {} dirs, {} blocked, {} matches in {:?}{}",
        root.display(),
        report.directories,
        report.blocked,
        report.matches,
        start.elapsed(),
        if report.cancelled { " (cancelled)" } else { "" }
    );
    report
}

fn compile_targets(
    targets: &[SearchTarget],
    compiler: &dyn PatternCompiler,
) -> Result<Vec<CompiledTarget>, String> {
    targets
        .iter()
        .enumerate()
        .map(|(index, target)| {
            target
                .compile(compiler)
                .map_err(|e| format!("Search target #{index} rejected: {e}"))
        })
        .collect()
}

/// Hand one match to the consumer, under the results lock when enabled.
#[inline]
fn deliver(ctx: &WorkerContext, entry: &FoundEntry) {
    match &ctx.results_lock {
        Some(lock) => {
            let _guard = lock.lock();
            ctx.consumer.matched(entry);
        }
        None => ctx.consumer.matched(entry),
    }
}

fn report_blocked(consumer: &dyn OutputConsumer, dir: &Path, err: &io::Error) {
    let reason = if err.kind() == io::ErrorKind::PermissionDenied {
        "Access Denied".to_string()
    } else {
        err.to_string()
    };
    warn!("Cannot list {}: {reason}", dir.display());
    consumer.messaging(&format!(
        "Unable to get file or listing for folder at {} Reason: {reason}",
        dir.display()
    ));
    consumer.blocked(&dir.display().to_string());
}

/// List the immediate files and subdirectories of `dir`.
///
/// Any failure, including one on a single entry, fails the whole listing.
/// Both lists are sorted by name so a walk over an unchanged tree always
/// reports in the same order.
fn list_directory(dir: &Path) -> io::Result<Listing> {
    let mut listing = Listing::default();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Not following symlinks: the entry's own metadata.
        let meta = entry.metadata()?;
        let is_link = meta.file_type().is_symlink();
        let is_dir = if is_link {
            // A dangling link is listed as a file.
            fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            meta.is_dir()
        };

        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        let path = entry.path();
        trace!("Listed {}", path.display());

        let found = FoundEntry {
            name: CompactString::new(name.as_ref()),
            attributes: FileAttributes::from_metadata(&name, &meta, is_dir),
            is_dir,
            size: if is_dir { 0 } else { meta.len() },
            modified: meta.modified().ok(),
            path,
        };

        if is_dir {
            if !is_link {
                listing.descend.push(found.path.clone());
            }
            listing.folders.push(found);
        } else {
            listing.files.push(found);
        }
    }

    listing.files.sort_by(|a, b| a.name.cmp(&b.name));
    listing.folders.sort_by(|a, b| a.name.cmp(&b.name));
    listing.descend.sort();
    Ok(listing)
}
