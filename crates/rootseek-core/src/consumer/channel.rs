/// Channel consumer — forwards search events to another thread over a
/// bounded crossbeam channel.
///
/// This is the natural fit for a UI: the search workers push events, and
/// the UI thread drains the receiver once per frame.
use crate::consumer::OutputConsumer;
use crate::model::FoundEntry;
use crossbeam_channel::{Receiver, Sender};

/// Maximum number of events that may queue up in the channel.
///
/// When the receiver falls behind, workers block on `send` rather than
/// buffering unbounded results on the heap.
pub const EVENT_CHANNEL_CAPACITY: usize = 4_096;

/// One consumer call, as a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// Diagnostic text from a worker.
    Message(String),
    /// A directory that could not be listed.
    Blocked(String),
    /// A matched file or directory.
    Match(FoundEntry),
}

#[derive(Debug, Clone)]
pub struct ChannelConsumer {
    tx: Sender<SearchEvent>,
}

impl ChannelConsumer {
    /// Create a consumer and the receiver its events arrive on.
    pub fn new() -> (Self, Receiver<SearchEvent>) {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, Receiver<SearchEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self { tx }, rx)
    }

    fn send(&self, event: SearchEvent) {
        // A dropped receiver means nobody is listening any more; the
        // search itself carries on.
        let _ = self.tx.send(event);
    }
}

impl OutputConsumer for ChannelConsumer {
    fn messaging(&self, text: &str) {
        self.send(SearchEvent::Message(text.to_owned()));
    }

    fn blocked(&self, path: &str) {
        self.send(SearchEvent::Blocked(path.to_owned()));
    }

    fn matched(&self, entry: &FoundEntry) {
        self.send(SearchEvent::Match(entry.clone()));
    }
}
