/// Data model for the search engine.
///
/// Re-exports the configuration holders (anchors, targets), the flag sets
/// they are built from, and the entry type delivered to consumers.
pub mod anchor;
pub mod attributes;
pub mod entry;
pub mod match_style;
pub mod target;

pub use anchor::SearchAnchor;
pub use attributes::FileAttributes;
pub use entry::FoundEntry;
pub use match_style::MatchStyle;
pub use target::{CompiledTarget, SearchTarget};
