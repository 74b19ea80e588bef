//! Exclusion patterns read from `.gitignore` files.
//!
//! This is deliberately not gitignore semantics. Each pattern is checked
//! against the path relative to the walk root with four simple rules:
//!
//! 1. A pattern ending in `*` matches any path starting with the text before
//!    the `*`. Such patterns use this rule only.
//! 2. Exact equality.
//! 3. Directory prefix: the pattern names an ancestor directory of the path.
//! 4. A pattern containing `*` is turned into a regular expression by
//!    replacing each `*` with `.*`, anchored at the start of the path only.
//!
//! Other regex metacharacters are not escaped, so `*.log` also matches
//! `app-log` (the `.` matches any character).

use std::borrow::Cow;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::WalkError;

/// A single compiled exclusion pattern.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    raw: String,
    wildcard: Option<Regex>,
}

impl ExclusionPattern {
    /// Compile a raw pattern string.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let wildcard = if !raw.ends_with('*') && raw.contains('*') {
            let source = format!("^(?:{})", raw.replace('*', ".*"));
            match Regex::new(&source) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::warn!(pattern = %raw, "ignoring wildcard rule for pattern: {err}");
                    None
                }
            }
        } else {
            None
        };
        Self { raw, wildcard }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check a `/`-separated path relative to the walk root.
    pub fn matches(&self, rel_path: &str) -> bool {
        if let Some(prefix) = self.raw.strip_suffix('*') {
            return rel_path.starts_with(prefix);
        }
        if rel_path == self.raw {
            return true;
        }
        if format!("{rel_path}/").starts_with(&format!("{}/", self.raw)) {
            return true;
        }
        self.wildcard
            .as_ref()
            .is_some_and(|regex| regex.is_match(rel_path))
    }
}

impl PartialEq for ExclusionPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ExclusionPattern {}

/// An ordered list of exclusion patterns. First match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExclusionPatterns {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionPatterns {
    /// Build from raw pattern strings.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(ExclusionPattern::new).collect(),
        }
    }

    /// Parse the contents of a `.gitignore` file.
    pub fn parse_gitignore(contents: &str) -> Self {
        Self::new(contents.lines().filter_map(normalize_line))
    }

    /// Read a `.gitignore` file. A missing file yields no patterns.
    pub fn from_gitignore(path: impl AsRef<Path>) -> Result<Self, WalkError> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no .gitignore found");
                return Ok(Self::default());
            }
            Err(err) => return Err(WalkError::io(path, err)),
        };
        let patterns = Self::parse_gitignore(&String::from_utf8_lossy(&bytes));
        tracing::debug!(
            path = %path.display(),
            count = patterns.len(),
            "loaded exclusion patterns"
        );
        Ok(patterns)
    }

    /// Check whether `path` (under `root`) is excluded.
    pub fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        self.matches_relative(&relative_path(path, root))
    }

    /// Check an already-relative, `/`-separated path.
    pub fn matches_relative(&self, rel_path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(rel_path))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if there are no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over the patterns in order.
    pub fn iter(&self) -> impl Iterator<Item = &ExclusionPattern> {
        self.patterns.iter()
    }
}

impl From<Vec<String>> for ExclusionPatterns {
    fn from(patterns: Vec<String>) -> Self {
        Self::new(patterns)
    }
}

impl From<ExclusionPatterns> for Vec<String> {
    fn from(patterns: ExclusionPatterns) -> Self {
        patterns.patterns.into_iter().map(|p| p.raw).collect()
    }
}

fn normalize_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix('/').unwrap_or(line);
    let line = line.strip_suffix('/').unwrap_or(line);
    Some(line.to_string())
}

/// Path of `path` relative to `root`, with `\` normalized to `/`.
pub fn relative_path<'a>(path: &'a Path, root: &Path) -> Cow<'a, str> {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    if rel.contains('\\') {
        Cow::Owned(rel.replace('\\', "/"))
    } else {
        rel
    }
}
