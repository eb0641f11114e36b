// src/event.rs

//! Change events as produced by the upstream watcher.
//!
//! Each input line is `<path> <reason>`, e.g. `client/src/Main.elm Updated`.
//! The reason tokens are the event flags of `fswatch`-style watchers; the
//! ones this tool cares about get their own variant, everything else is kept
//! verbatim in [`ReasonCode::Other`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::{RebuildwatchError, Result};

/// Why a path showed up in the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ReasonCode {
    Modified,
    Created,
    Updated,
    Removed,
    Renamed,
    /// The event refers to a directory rather than a file.
    IsDir,
    /// Backend-specific noise the watcher could not map to a portable flag.
    PlatformSpecific,
    /// Any other raw watcher token.
    Other(String),
}

impl ReasonCode {
    pub fn as_str(&self) -> &str {
        match self {
            ReasonCode::Modified => "Modified",
            ReasonCode::Created => "Created",
            ReasonCode::Updated => "Updated",
            ReasonCode::Removed => "Removed",
            ReasonCode::Renamed => "Renamed",
            ReasonCode::IsDir => "IsDir",
            ReasonCode::PlatformSpecific => "PlatformSpecific",
            ReasonCode::Other(raw) => raw,
        }
    }
}

impl FromStr for ReasonCode {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "Modified" => ReasonCode::Modified,
            "Created" => ReasonCode::Created,
            "Updated" => ReasonCode::Updated,
            "Removed" => ReasonCode::Removed,
            "Renamed" => ReasonCode::Renamed,
            "IsDir" => ReasonCode::IsDir,
            "PlatformSpecific" => ReasonCode::PlatformSpecific,
            other => ReasonCode::Other(other.to_string()),
        })
    }
}

impl From<String> for ReasonCode {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(reason) => reason,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for ReasonCode {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filesystem change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: String,
    pub reason: ReasonCode,
}

impl ChangeEvent {
    pub fn new(path: impl Into<String>, reason: impl Into<ReasonCode>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Parse one input line. `line_no` is 1-based and only used for errors.
    ///
    /// The line must hold exactly two whitespace-separated tokens; anything
    /// else (including a blank line) is a [`RebuildwatchError::MalformedEvent`].
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(path), Some(reason), None) => Ok(ChangeEvent::new(path, reason)),
            _ => Err(RebuildwatchError::MalformedEvent {
                line_no,
                line: line.trim_end_matches(['\r', '\n']).to_string(),
            }),
        }
    }
}
