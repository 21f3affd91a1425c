/// A single filesystem entry as seen by the evaluator and delivered to
/// consumers on a match.
use crate::model::FileAttributes;
use compact_str::CompactString;
use std::path::PathBuf;
use std::time::SystemTime;

/// A file or directory discovered during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundEntry {
    /// File or directory name only (NOT the full path).
    /// This is what name patterns are evaluated against.
    pub name: CompactString,

    /// Full path of the entry.
    pub path: PathBuf,

    /// Attribute word used by the attribute stage.
    pub attributes: FileAttributes,

    /// `true` if this entry was listed as a subdirectory.
    pub is_dir: bool,

    /// Logical file size in bytes. Always 0 for directories.
    pub size: u64,

    /// Last-modified timestamp, when the platform reports one.
    pub modified: Option<SystemTime>,
}

impl FoundEntry {
    /// Build an entry from a name, path and attributes alone.
    ///
    /// `is_dir` is taken from the `DIRECTORY` attribute bit.
    pub fn new(name: &str, path: impl Into<PathBuf>, attributes: FileAttributes) -> Self {
        Self {
            name: CompactString::new(name),
            path: path.into(),
            attributes,
            is_dir: attributes.contains(FileAttributes::DIRECTORY),
            size: 0,
            modified: None,
        }
    }

    /// Short label used in listings and CSV output.
    pub fn kind(&self) -> &'static str {
        if self.is_dir {
            "dir"
        } else {
            "file"
        }
    }
}
