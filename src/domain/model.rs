use std::collections::HashSet;
use std::path::PathBuf;

/// The first `[[target|display]]` construct found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef<'a> {
    pub target: &'a str,
    pub display: &'a str,
}

/// Which half of a link is compared against the filter set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchField {
    #[default]
    Target,
    Display,
}

impl MatchField {
    pub const NAMES: [&'static str; 2] = ["target", "display"];

    pub fn select<'a>(&self, link: &LinkRef<'a>) -> &'a str {
        match self {
            MatchField::Target => link.target,
            MatchField::Display => link.display,
        }
    }
}

/// Immutable set of excluded names. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    names: HashSet<String>,
}

impl FilterSet {
    /// The index section that is never listed in the main index.
    pub const DEFAULT_TARGET: &'static str = "read-and-watch-list";

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::new([Self::DEFAULT_TARGET])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineDecision {
    Retain,
    Drop { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedLine {
    /// 1-based, counted the way the line reader splits.
    pub line_number: usize,
    pub key: String,
}

/// Accumulated result of filtering a sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutput {
    pub content: String,
    pub lines_read: usize,
    pub lines_kept: usize,
    pub dropped: Vec<DroppedLine>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite the file in place.
    #[default]
    Overwrite,
    /// Write a sibling `.tmp` file and rename it over the original.
    Atomic,
}

impl WriteMode {
    pub const NAMES: [&'static str; 2] = ["overwrite", "atomic"];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteFailurePolicy {
    /// Print a diagnostic and exit normally.
    #[default]
    Log,
    Fail,
}

impl WriteFailurePolicy {
    pub const NAMES: [&'static str; 2] = ["log", "fail"];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    pub path: PathBuf,
    pub lines_read: usize,
    pub lines_kept: usize,
    pub dropped: Vec<DroppedLine>,
    pub bytes_written: usize,
    pub written: bool,
}

impl FilterReport {
    pub fn lines_dropped(&self) -> usize {
        self.dropped.len()
    }
}
