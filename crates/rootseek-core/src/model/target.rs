/// Search targets — what a search looks for.
///
/// A target is plain configuration. Before a worker can evaluate entries it
/// compiles the target's name patterns into predicates; every worker builds
/// its own [`CompiledTarget`] so no predicate state is shared between threads.
use crate::model::{FileAttributes, MatchStyle};
use crate::pattern::{NamePredicate, PatternCompiler, PatternError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filename patterns and an attribute mask, each with its own match style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTarget {
    /// Patterns evaluated against entry names. Empty means "match every name".
    pub name_patterns: Vec<String>,
    pub name_match_style: MatchStyle,
    /// Attributes to test entries against.
    pub attribute_mask: FileAttributes,
    pub attribute_match_style: MatchStyle,
}

impl Default for SearchTarget {
    fn default() -> Self {
        Self {
            name_patterns: Vec::new(),
            name_match_style: MatchStyle::MATCH_ANY,
            attribute_mask: FileAttributes::empty(),
            attribute_match_style: MatchStyle::SKIP,
        }
    }
}

impl SearchTarget {
    /// A target that matches every entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a name pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_patterns.push(pattern.into());
        self
    }

    /// Builder: set the name match style.
    pub fn with_name_style(mut self, style: MatchStyle) -> Self {
        self.name_match_style = style;
        self
    }

    /// Builder: set the attribute mask and its match style.
    pub fn with_attributes(mut self, mask: FileAttributes, style: MatchStyle) -> Self {
        self.attribute_mask = mask;
        self.attribute_match_style = style;
        self
    }

    /// `true` when the mask asks for directories. Such targets are only
    /// evaluated against subdirectories, never against files.
    pub fn wants_directories(&self) -> bool {
        !self.attribute_mask.is_empty() && self.attribute_mask.contains(FileAttributes::DIRECTORY)
    }

    /// Compile every name pattern into a predicate, preserving order.
    pub fn compile(&self, compiler: &dyn PatternCompiler) -> Result<CompiledTarget, PatternError> {
        let predicates = self
            .name_patterns
            .iter()
            .map(|pattern| compiler.compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledTarget {
            target: self.clone(),
            predicates,
        })
    }
}

/// A target together with its compiled name predicates.
///
/// Owned by exactly one worker for the duration of a search.
pub struct CompiledTarget {
    pub target: SearchTarget,
    pub predicates: Vec<Box<dyn NamePredicate>>,
}

impl CompiledTarget {
    /// Pair a target with predicates built elsewhere (e.g. closures in tests
    /// or a front end with its own pattern engine).
    pub fn from_predicates(target: SearchTarget, predicates: Vec<Box<dyn NamePredicate>>) -> Self {
        Self { target, predicates }
    }

    #[inline]
    pub fn wants_directories(&self) -> bool {
        self.target.wants_directories()
    }
}

impl fmt::Debug for CompiledTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTarget")
            .field("target", &self.target)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}
