/// rootseek Core — concurrent local filesystem search.
///
/// This crate contains the whole search engine with zero terminal or UI
/// dependencies. It is designed to sit underneath any front end (CLI, GUI,
/// service) that can supply an [`consumer::OutputConsumer`].
///
/// # Modules
///
/// - [`model`] — Anchors, targets, attribute/match-style flags, found entries.
/// - [`pattern`] — Pluggable filename pattern compilers (glob, regex).
/// - [`engine`] — Search orchestrator, traversal workers, match evaluator.
/// - [`consumer`] — Output consumer protocol plus bundled sinks.
/// - [`profile`] — JSON search profiles.
/// - [`platform`] — Local filesystem root discovery.
pub mod consumer;
pub mod engine;
pub mod error;
pub mod model;
pub mod pattern;
pub mod platform;
pub mod profile;

pub use consumer::OutputConsumer;
pub use engine::SearchEngine;
pub use error::SearchError;
pub use model::{FileAttributes, FoundEntry, MatchStyle, SearchAnchor, SearchTarget};
