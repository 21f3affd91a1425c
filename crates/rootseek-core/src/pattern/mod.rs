/// Filename pattern compilation.
///
/// The evaluator never sees pattern syntax. It only needs a
/// [`NamePredicate`] per configured pattern, produced by whatever
/// [`PatternCompiler`] the engine was given. Glob (the default) and regex
/// compilers are bundled; any other engine can be plugged in.
mod error;

pub use error::PatternError;

use glob::{MatchOptions, Pattern as GlobPattern};
use regex::{Regex, RegexBuilder};

/// A compiled, per-name test.
pub trait NamePredicate: Send {
    fn is_match(&self, name: &str) -> bool;
}

impl<F> NamePredicate for F
where
    F: Fn(&str) -> bool + Send,
{
    fn is_match(&self, name: &str) -> bool {
        self(name)
    }
}

/// Turns a pattern string into a reusable [`NamePredicate`].
pub trait PatternCompiler: Send + Sync {
    fn compile(&self, pattern: &str) -> Result<Box<dyn NamePredicate>, PatternError>;
}

// ── Glob ─────────────────────────────────────────────────────────────────────

/// Wildcard patterns (`*`, `?`, `[a-z]`, `[!x]`) via the `glob` crate.
#[derive(Debug, Clone, Copy)]
pub struct GlobCompiler {
    case_sensitive: bool,
}

impl GlobCompiler {
    pub fn new() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    pub fn case_insensitive() -> Self {
        Self {
            case_sensitive: false,
        }
    }
}

impl Default for GlobCompiler {
    fn default() -> Self {
        Self::new()
    }
}

struct GlobPredicate {
    pattern: GlobPattern,
    options: MatchOptions,
}

impl NamePredicate for GlobPredicate {
    fn is_match(&self, name: &str) -> bool {
        self.pattern.matches_with(name, self.options)
    }
}

impl PatternCompiler for GlobCompiler {
    fn compile(&self, pattern: &str) -> Result<Box<dyn NamePredicate>, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::InvalidEmpty);
        }
        let compiled =
            GlobPattern::new(pattern).map_err(|e| PatternError::glob_parse(pattern, &e.to_string()))?;
        Ok(Box::new(GlobPredicate {
            pattern: compiled,
            options: MatchOptions {
                case_sensitive: self.case_sensitive,
                // Names never contain separators, and dot-files are matched
                // like anything else; hiding them is the attribute stage's job.
                require_literal_separator: false,
                require_literal_leading_dot: false,
            },
        }))
    }
}

// ── Regex ────────────────────────────────────────────────────────────────────

/// Regular-expression patterns via the `regex` crate. Unanchored: a name
/// matches if the expression matches anywhere in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexCompiler {
    case_insensitive: bool,
}

impl RegexCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

struct RegexPredicate(Regex);

impl NamePredicate for RegexPredicate {
    fn is_match(&self, name: &str) -> bool {
        self.0.is_match(name)
    }
}

impl PatternCompiler for RegexCompiler {
    fn compile(&self, pattern: &str) -> Result<Box<dyn NamePredicate>, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::InvalidEmpty);
        }
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .build()
            .map(|re| Box::new(RegexPredicate(re)) as Box<dyn NamePredicate>)
            .map_err(|e| PatternError::regex_compile(pattern, &e.to_string()))
    }
}
