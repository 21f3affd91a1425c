/// Output consumer protocol — the sink a search reports to.
///
/// Every worker of a search holds the same `Arc<dyn OutputConsumer>` and
/// calls it from its own thread, so implementations take `&self` and keep
/// any state behind atomics or locks.
///
/// When the engine's result synchronization is on (the default), `matched`
/// calls are serialized through one engine-wide lock and a consumer never
/// sees two of them at once. `messaging` and `blocked` are never serialized.
/// With synchronization off, `matched` may also run concurrently.
pub mod channel;
pub mod collect;
pub mod console;
pub mod csv_file;

pub use channel::{ChannelConsumer, SearchEvent, EVENT_CHANNEL_CAPACITY};
pub use collect::CollectingConsumer;
pub use console::ConsoleConsumer;
pub use csv_file::CsvConsumer;

use crate::model::FoundEntry;

pub trait OutputConsumer: Send + Sync {
    /// Informational or diagnostic line. Best effort.
    fn messaging(&self, text: &str);

    /// A directory that could not be listed (I/O error or access denied).
    fn blocked(&self, path: &str);

    /// One matched file or directory.
    fn matched(&self, entry: &FoundEntry);
}
