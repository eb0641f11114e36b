// src/filter.rs

//! Ignore filter: decides which change events never reach the dispatcher.
//!
//! The filter is a flat table of [`IgnoreRule`]s. Evaluation is pure and
//! order-independent: an event is ignored as soon as any rule matches.
//!
//! Path rules use plain substring containment (not globbing, not exact
//! match), and [`IgnoreRule::Positional`] looks at a fixed window counted
//! from the end of the path.

use std::fmt;

use crate::event::ReasonCode;

/// Reasons ignored by every table, built-in or configured.
pub const IMPLICIT_IGNORE_REASONS: &[ReasonCode] = &[ReasonCode::IsDir, ReasonCode::PlatformSpecific];

/// Version control, helper scripts, runtime logs and app data.
pub const DEFAULT_IGNORE_CONTAINS: &[&str] = &[".git", "scripts/", "logs/", "appdata/"];

/// Frontend package cache and the compiled frontend bundle.
pub const FRONTEND_IGNORE_CONTAINS: &[&str] = &["client/elm-stuff", "static/elm.js"];

/// Directory holding the backend project.
pub const BACKEND_DIR: &str = "ocamlserver";

/// Files the backend build tool writes next to the sources on every build.
pub const BACKEND_BUILD_ARTIFACTS: &[&str] = &[
    "setup.log",
    "setup.data",
    "_build",
    "_tags",
    "myocamlbuild.ml",
    "Makefile",
];

/// Intermediate files of the backend compiler have `/C` ten-to-eight
/// characters from the end of their path.
pub const BACKEND_TEMP_MARKER: &str = "/C";
pub const BACKEND_TEMP_END_OFFSET: usize = 8;

/// Emacs lock files (`.#foo.ml`).
pub const EDITOR_LOCK_MARKER: &str = "/.#";

/// One predicate of the ignore table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreRule {
    /// Matches every event with this reason, whatever the path.
    Reason(ReasonCode),
    /// Matches paths containing this substring anywhere.
    Contains(String),
    /// Matches paths where `marker` ends exactly `end_offset` characters
    /// before the end of the path.
    Positional { marker: String, end_offset: usize },
}

impl IgnoreRule {
    pub fn contains(s: impl Into<String>) -> Self {
        IgnoreRule::Contains(s.into())
    }

    pub fn positional(marker: impl Into<String>, end_offset: usize) -> Self {
        IgnoreRule::Positional {
            marker: marker.into(),
            end_offset,
        }
    }

    pub fn matches(&self, path: &str, reason: &ReasonCode) -> bool {
        match self {
            IgnoreRule::Reason(r) => r == reason,
            IgnoreRule::Contains(needle) => path.contains(needle.as_str()),
            IgnoreRule::Positional { marker, end_offset } => {
                marker_at_end_offset(path, marker, *end_offset)
            }
        }
    }
}

impl fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreRule::Reason(r) => write!(f, "reason == {r}"),
            IgnoreRule::Contains(s) => write!(f, "path contains {s:?}"),
            IgnoreRule::Positional { marker, end_offset } => {
                write!(f, "path has {marker:?} ending {end_offset} chars before the end")
            }
        }
    }
}

/// Character-based window check: `path[n - end_offset - len(marker) .. n - end_offset] == marker`.
/// Paths too short to hold the window never match.
fn marker_at_end_offset(path: &str, marker: &str, end_offset: usize) -> bool {
    let chars: Vec<char> = path.chars().collect();
    let marker_len = marker.chars().count();

    let Some(end) = chars.len().checked_sub(end_offset) else {
        return false;
    };
    let Some(start) = end.checked_sub(marker_len) else {
        return false;
    };

    chars[start..end].iter().copied().eq(marker.chars())
}

/// The full ignore table.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    rules: Vec<IgnoreRule>,
}

impl IgnoreFilter {
    pub fn new(rules: Vec<IgnoreRule>) -> Self {
        Self { rules }
    }

    /// Built-in table for the elm client + ocaml server project layout.
    pub fn defaults() -> Self {
        let mut rules: Vec<IgnoreRule> = IMPLICIT_IGNORE_REASONS
            .iter()
            .cloned()
            .map(IgnoreRule::Reason)
            .collect();

        rules.extend(
            DEFAULT_IGNORE_CONTAINS
                .iter()
                .chain(FRONTEND_IGNORE_CONTAINS)
                .map(|s| IgnoreRule::contains(*s)),
        );
        rules.extend(scoped_rules(BACKEND_DIR, BACKEND_BUILD_ARTIFACTS));
        rules.push(IgnoreRule::positional(
            BACKEND_TEMP_MARKER,
            BACKEND_TEMP_END_OFFSET,
        ));
        rules.push(IgnoreRule::contains(EDITOR_LOCK_MARKER));

        Self { rules }
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// True if any rule matches this path + reason.
    pub fn should_ignore(&self, path: &str, reason: &ReasonCode) -> bool {
        self.rules.iter().any(|rule| rule.matches(path, reason))
    }

    /// The first rule that matches, if any. Used for debug logging.
    pub fn matching_rule(&self, path: &str, reason: &ReasonCode) -> Option<&IgnoreRule> {
        self.rules.iter().find(|rule| rule.matches(path, reason))
    }
}

impl Default for IgnoreFilter {
    fn default() -> Self {
        Self::defaults()
    }
}

/// `Contains("<dir>/<entry>")` for every entry.
pub fn scoped_rules<S: AsRef<str>>(dir: &str, entries: &[S]) -> Vec<IgnoreRule> {
    entries
        .iter()
        .map(|entry| IgnoreRule::contains(format!("{dir}/{}", entry.as_ref())))
        .collect()
}
