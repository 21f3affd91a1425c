/// Search anchors — where a search starts.
///
/// An anchor carries one or more root directories. The engine never walks a
/// multi-root anchor directly; it [`split`](SearchAnchor::split)s it so that
/// every root gets its own worker.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One or more root directories plus a recursion flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAnchor {
    /// Root directories, in the order they were added.
    pub roots: Vec<PathBuf>,
    /// Descend into subdirectories of each root.
    #[serde(default)]
    pub recurse_subfolders: bool,
}

impl SearchAnchor {
    /// Create an anchor with no roots.
    pub fn new(recurse_subfolders: bool) -> Self {
        Self {
            roots: Vec::new(),
            recurse_subfolders,
        }
    }

    /// Anchor covering every local filesystem root.
    pub fn local_roots(recurse_subfolders: bool) -> Self {
        Self {
            roots: crate::platform::local_roots(),
            recurse_subfolders,
        }
    }

    /// Builder form of [`add_root`](Self::add_root).
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn add_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// The first configured root. A split anchor has exactly one.
    pub fn root(&self) -> Option<&Path> {
        self.roots.first().map(PathBuf::as_path)
    }

    /// Decompose into single-root anchors, one per configured root, each
    /// inheriting `recurse_subfolders`. An anchor without roots yields none.
    pub fn split(&self) -> Vec<SearchAnchor> {
        self.roots
            .iter()
            .map(|root| SearchAnchor {
                roots: vec![root.clone()],
                recurse_subfolders: self.recurse_subfolders,
            })
            .collect()
    }
}
