/// End-to-end search tests.
///
/// These tests drive the real `SearchEngine` against real temporary
/// directory trees: worker threads are spawned, directories are listed
/// through the OS, and results flow through real consumers. No mocking.
use crossbeam_channel::{Receiver, Sender};
use rootseek_core::consumer::{
    ChannelConsumer, CollectingConsumer, CsvConsumer, OutputConsumer, SearchEvent,
};
use rootseek_core::model::{FileAttributes, FoundEntry, MatchStyle, SearchAnchor, SearchTarget};
use rootseek_core::pattern::RegexCompiler;
use rootseek_core::{SearchEngine, SearchError};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// ```text
/// root/
///   a.txt
///   b.log
///   sub/
///     c.txt
/// ```
fn build_test_tree(root: &Path) {
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), b"alpha").unwrap();
    fs::write(root.join("b.log"), b"beta").unwrap();
    fs::write(root.join("sub").join("c.txt"), b"gamma").unwrap();
}

fn txt_target() -> SearchTarget {
    SearchTarget::new()
        .with_pattern("*.txt")
        .with_name_style(MatchStyle::MATCH_ANY)
}

fn run_to_completion(engine: &mut SearchEngine, consumer: Arc<dyn OutputConsumer>) -> usize {
    let started = engine.search(consumer).expect("search must start");
    engine.join_all();
    assert!(!engine.has_active_workers());
    started
}

fn sorted(paths: Vec<PathBuf>) -> BTreeSet<PathBuf> {
    paths.into_iter().collect()
}

/// Consumer whose `matched` blocks until the test releases it, keeping the
/// search observably "in progress".
struct GateConsumer {
    gate: Receiver<()>,
    inner: CollectingConsumer,
}

impl GateConsumer {
    fn new() -> (Arc<Self>, Sender<()>) {
        let (tx, rx) = crossbeam_channel::bounded(0);
        let consumer = Arc::new(Self {
            gate: rx,
            inner: CollectingConsumer::new(),
        });
        (consumer, tx)
    }
}

impl OutputConsumer for GateConsumer {
    fn messaging(&self, text: &str) {
        self.inner.messaging(text);
    }

    fn blocked(&self, path: &str) {
        self.inner.blocked(path);
    }

    fn matched(&self, entry: &FoundEntry) {
        // Returns as soon as the sender is dropped.
        let _ = self.gate.recv();
        self.inner.matched(entry);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Non-recursive: only the top-level `.txt`.
#[test]
fn non_recursive_anchor_reports_top_level_only() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(false).with_root(tmp.path()));
    engine.add_target(txt_target());

    let sink = Arc::new(CollectingConsumer::new());
    let started = run_to_completion(&mut engine, sink.clone());

    assert_eq!(started, 1);
    assert_eq!(sink.matched_paths(), vec![tmp.path().join("a.txt")]);
    assert!(sink.blocked_paths().is_empty());
}

/// Recursive: the top-level `.txt` and the one in `sub`.
#[test]
fn recursive_anchor_reports_nested_matches() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(true).with_root(tmp.path()));
    engine.add_target(txt_target());

    let sink = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, sink.clone());

    assert_eq!(
        sink.matched_paths(),
        vec![tmp.path().join("a.txt"), tmp.path().join("sub").join("c.txt")]
    );
}

/// Matched entries carry name, full path, kind, size and attributes.
#[test]
fn matches_carry_entry_details() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(false).with_root(tmp.path()));
    engine.add_target(SearchTarget::new());

    let sink = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, sink.clone());

    let matches = sink.matches();
    let a = matches.iter().find(|e| e.name.as_str() == "a.txt").unwrap();
    assert_eq!(a.path, tmp.path().join("a.txt"));
    assert!(!a.is_dir);
    assert_eq!(a.size, 5);
    assert!(a.modified.is_some());
    assert!(!a.attributes.contains(FileAttributes::DIRECTORY));

    let sub = matches.iter().find(|e| e.name.as_str() == "sub").unwrap();
    assert!(sub.is_dir);
    assert!(sub.attributes.contains(FileAttributes::DIRECTORY));
}

/// One anchor with several roots fans out into one worker per root.
#[test]
fn multi_root_anchor_starts_one_worker_per_root() {
    let one = TempDir::new().unwrap();
    let two = TempDir::new().unwrap();
    build_test_tree(one.path());
    build_test_tree(two.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(
        SearchAnchor::new(true)
            .with_root(one.path())
            .with_root(two.path()),
    );
    engine.add_target(txt_target());

    let sink = Arc::new(CollectingConsumer::new());
    let started = run_to_completion(&mut engine, sink.clone());

    assert_eq!(started, 2);
    assert_eq!(sink.match_count(), 4);
}

/// An unreadable root yields exactly one `blocked` event and no matches,
/// while the sibling worker completes normally.
#[test]
fn unreadable_root_is_contained() {
    let good = TempDir::new().unwrap();
    build_test_tree(good.path());
    let bad = good.path().join("no-such-root");

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(true).with_root(&bad).with_root(good.path()));
    engine.add_target(txt_target());

    let sink = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, sink.clone());

    assert_eq!(sink.blocked_paths(), vec![bad.display().to_string()]);
    assert!(sink
        .matched_paths()
        .iter()
        .all(|p| !p.starts_with(&bad)));
    assert_eq!(sink.match_count(), 2);
    assert_eq!(sink.messages().len(), 1);
}

/// A permission-denied subdirectory is pruned; the rest of the walk goes on.
///
/// Skipped when the process can read the directory anyway (e.g. root).
#[cfg(unix)]
#[test]
fn permission_denied_directory_is_pruned() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());
    let locked = tmp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("secret.txt"), b"s").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(true).with_root(tmp.path()));
    engine.add_target(txt_target());

    let sink = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, sink.clone());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(sink.blocked_paths(), vec![locked.display().to_string()]);
    assert!(sink.messages()[0].ends_with("Reason: Access Denied"));
    assert_eq!(
        sorted(sink.matched_paths()),
        sorted(vec![tmp.path().join("a.txt"), tmp.path().join("sub").join("c.txt")])
    );
}

/// A second `search` while the first is running is rejected and starts
/// nothing.
#[test]
fn second_search_while_active_is_rejected() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(false).with_root(tmp.path()));
    engine.add_target(txt_target());

    let (gate, release) = GateConsumer::new();
    assert_eq!(engine.search(gate.clone()).unwrap(), 1);

    let err = engine
        .search(Arc::new(CollectingConsumer::new()))
        .unwrap_err();
    assert!(matches!(err, SearchError::SearchInProgress { active: 1 }));
    assert_eq!(engine.worker_count(), 1, "no new workers may be started");

    drop(release);
    engine.join_all();
    assert_eq!(gate.inner.match_count(), 1);
}

/// `kill_search` forgets the workers at once; no join is needed before the
/// engine reports idle.
#[test]
fn kill_search_clears_active_workers() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(true).with_root(tmp.path()));
    engine.add_target(txt_target());

    let (gate, release) = GateConsumer::new();
    engine.search(gate).unwrap();
    assert!(engine.has_active_workers());

    engine.kill_search();
    assert!(!engine.has_active_workers());
    assert_eq!(engine.worker_count(), 0);

    // Let the detached worker observe its cancellation and exit.
    drop(release);

    // A fresh search is accepted immediately.
    let sink = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, sink.clone());
    assert_eq!(sink.match_count(), 2);
}

/// A finished search does not need an explicit join before the next one.
#[test]
fn search_again_after_completion_without_join() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(true).with_root(tmp.path()));
    engine.add_target(txt_target());

    engine.search(Arc::new(CollectingConsumer::new())).unwrap();
    let deadline = Instant::now() + Duration::from_secs(30);
    while engine.has_active_workers() {
        assert!(Instant::now() < deadline, "search did not finish within 30 seconds");
        std::thread::sleep(Duration::from_millis(5));
    }

    let sink = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, sink.clone());
    assert_eq!(sink.match_count(), 2);
}

/// The same configuration over an unchanged tree gives the same matches,
/// and each root's matches come in the same order.
#[test]
fn repeated_search_is_idempotent() {
    let one = TempDir::new().unwrap();
    let two = TempDir::new().unwrap();
    build_test_tree(one.path());
    build_test_tree(two.path());
    fs::create_dir_all(two.path().join("sub/deep/er")).unwrap();
    fs::write(two.path().join("sub/deep/er/z.txt"), b"z").unwrap();

    let mut engine = SearchEngine::new();
    engine.add_anchor(
        SearchAnchor::new(true)
            .with_root(one.path())
            .with_root(two.path()),
    );
    engine.add_target(SearchTarget::new());

    let first = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, first.clone());
    let second = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, second.clone());

    assert_eq!(
        sorted(first.matched_paths()),
        sorted(second.matched_paths())
    );
    for root in [one.path(), two.path()] {
        let of_root = |paths: Vec<PathBuf>| -> Vec<PathBuf> {
            paths.into_iter().filter(|p| p.starts_with(root)).collect()
        };
        assert_eq!(of_root(first.matched_paths()), of_root(second.matched_paths()));
    }
}

/// Directory-attribute targets report folders only.
#[test]
fn directory_target_reports_folders_only() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());
    fs::create_dir(tmp.path().join("sub").join("inner")).unwrap();

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(true).with_root(tmp.path()));
    engine.add_target(
        SearchTarget::new().with_attributes(FileAttributes::DIRECTORY, MatchStyle::MATCH_ANY),
    );

    let sink = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, sink.clone());

    assert_eq!(
        sink.matched_paths(),
        vec![tmp.path().join("sub"), tmp.path().join("sub").join("inner")]
    );
}

/// Results can be consumed from another thread over a channel.
#[test]
fn channel_consumer_streams_events() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(true).with_root(tmp.path()));
    engine.add_target(txt_target());

    let (consumer, rx) = ChannelConsumer::new();
    engine.search(Arc::new(consumer)).unwrap();

    let deadline = Instant::now() + Duration::from_secs(30);
    let mut found = Vec::new();
    while found.len() < 2 {
        assert!(Instant::now() < deadline, "matches did not arrive within 30 seconds");
        match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(SearchEvent::Match(entry)) => found.push(entry.path),
            Ok(other) => panic!("unexpected event: {other:?}"),
            Err(_) => continue,
        }
    }
    engine.join_all();

    assert_eq!(
        found,
        vec![tmp.path().join("a.txt"), tmp.path().join("sub").join("c.txt")]
    );
}

/// With synchronization off every match still arrives.
#[test]
fn unsynchronized_results_are_all_delivered() {
    let roots: Vec<TempDir> = (0..4).map(|_| TempDir::new().unwrap()).collect();
    let mut anchor = SearchAnchor::new(true);
    for root in &roots {
        build_test_tree(root.path());
        anchor.add_root(root.path());
    }

    let mut engine = SearchEngine::new();
    engine.set_sync_results(false);
    engine.add_anchor(anchor);
    engine.add_target(txt_target());

    let sink = Arc::new(CollectingConsumer::new());
    assert_eq!(run_to_completion(&mut engine, sink.clone()), 4);
    assert_eq!(sink.match_count(), 8);
}

/// Regex name patterns plug in through the compiler seam.
#[test]
fn regex_compiler_drives_name_matching() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::with_compiler(Arc::new(RegexCompiler::new()));
    engine.add_anchor(SearchAnchor::new(true).with_root(tmp.path()));
    engine.add_target(SearchTarget::new().with_pattern(r"^[ab]\."));

    let sink = Arc::new(CollectingConsumer::new());
    run_to_completion(&mut engine, sink.clone());

    assert_eq!(
        sink.matched_paths(),
        vec![tmp.path().join("a.txt"), tmp.path().join("b.log")]
    );
}

/// Matches can be exported as CSV.
#[test]
fn csv_consumer_writes_matches() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let mut engine = SearchEngine::new();
    engine.add_anchor(SearchAnchor::new(true).with_root(tmp.path()));
    engine.add_target(txt_target());

    let csv = Arc::new(CsvConsumer::new(Vec::new()));
    run_to_completion(&mut engine, csv.clone());
    drop(engine);

    assert_eq!(csv.row_count(), 2);
    let csv = Arc::try_unwrap(csv).ok().expect("engine released the consumer");
    let text = String::from_utf8(csv.into_inner().unwrap()).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("a.txt"));
    assert!(text.contains("c.txt"));
}
