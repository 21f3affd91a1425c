/// Search profiles — a whole search configuration as a JSON document.
///
/// ```json
/// {
///   "anchors": [{ "roots": ["/home/me/src"], "recurse_subfolders": true }],
///   "targets": [{ "name_patterns": ["*.rs", "*.toml"], "name_match_style": "MATCH_ANY" }],
///   "sync_results": true
/// }
/// ```
///
/// Missing fields take their defaults: targets match any name and skip the
/// attribute stage, anchors do not recurse, results are synchronized.
use crate::engine::SearchEngine;
use crate::model::{SearchAnchor, SearchTarget};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProfile {
    pub anchors: Vec<SearchAnchor>,
    pub targets: Vec<SearchTarget>,
    pub sync_results: bool,
}

impl Default for SearchProfile {
    fn default() -> Self {
        Self {
            anchors: Vec::new(),
            targets: Vec::new(),
            sync_results: true,
        }
    }
}

impl SearchProfile {
    /// Read and parse a profile file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading search profile {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("parsing search profile {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append this profile's anchors and targets to `engine` and apply its
    /// synchronization setting.
    pub fn apply(&self, engine: &mut SearchEngine) {
        for anchor in &self.anchors {
            engine.add_anchor(anchor.clone());
        }
        for target in &self.targets {
            engine.add_target(target.clone());
        }
        engine.set_sync_results(self.sync_results);
    }
}
