/// CSV consumer — writes one row per match to any `io::Write`.
///
/// Columns: `name,path,kind,size,attributes,modified`. Timestamps are local
/// RFC 3339. Diagnostics are not written to the file; they are logged and
/// counted.
use crate::consumer::OutputConsumer;
use crate::model::FoundEntry;
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use serde::Serialize;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

#[derive(Serialize)]
struct MatchRow<'a> {
    name: &'a str,
    path: String,
    kind: &'static str,
    size: u64,
    attributes: String,
    modified: Option<String>,
}

impl<'a> From<&'a FoundEntry> for MatchRow<'a> {
    fn from(entry: &'a FoundEntry) -> Self {
        Self {
            name: entry.name.as_str(),
            path: entry.path.to_string_lossy().into_owned(),
            kind: entry.kind(),
            size: entry.size,
            attributes: entry.attributes.describe(),
            modified: entry
                .modified
                .map(|t| DateTime::<Local>::from(t).to_rfc3339()),
        }
    }
}

pub struct CsvConsumer<W: io::Write + Send> {
    writer: Mutex<csv::Writer<W>>,
    rows: AtomicU64,
    blocked: AtomicU64,
    write_errors: AtomicU64,
}

impl<W: io::Write + Send> CsvConsumer<W> {
    /// Wrap `inner`; the header row is written with the first match.
    pub fn new(inner: W) -> Self {
        Self {
            writer: Mutex::new(csv::Writer::from_writer(inner)),
            rows: AtomicU64::new(0),
            blocked: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    pub fn row_count(&self) -> u64 {
        self.rows.load(Ordering::Relaxed)
    }

    pub fn blocked_count(&self) -> u64 {
        self.blocked.load(Ordering::Relaxed)
    }

    /// Rows that could not be written (I/O or encoding failures).
    pub fn write_error_count(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .into_inner()
            .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()))
    }
}

impl<W: io::Write + Send> OutputConsumer for CsvConsumer<W> {
    fn messaging(&self, text: &str) {
        warn!("{text}");
    }

    fn blocked(&self, _path: &str) {
        self.blocked.fetch_add(1, Ordering::Relaxed);
    }

    fn matched(&self, entry: &FoundEntry) {
        let row = MatchRow::from(entry);
        match self.writer.lock().serialize(row) {
            Ok(()) => {
                self.rows.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                self.write_errors.fetch_add(1, Ordering::Relaxed);
                warn!("Failed to write CSV row for {}: {err}", entry.path.display());
            }
        }
    }
}
