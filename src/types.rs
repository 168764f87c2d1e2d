//! Core data types for the errmark engine
//!
//! This module defines the fundamental data structures shared across the
//! parse and resolution pipeline: parsed error records, buffer spans, and
//! the path normalization used to key records against open buffers.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// A contiguous half-open character-offset range within a target buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start offset, inclusive
    pub start: usize,
    /// End offset, exclusive
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no characters
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One parsed build-output occurrence
///
/// Position fields are 1-based and optional: a record without a line number
/// cannot be anchored in a buffer but is still kept in the store. A record
/// without a message is never constructed - extraction drops those matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Normalized (absolute, case-folded) path of the file the record points at
    pub file: PathBuf,

    /// 1-based line number, absent when extraction could not parse one
    pub line: Option<u32>,

    /// 1-based column number, absent unless the pattern captured one
    pub column: Option<u32>,

    /// Message text from the last capture group
    pub message: String,

    /// Index into the ordered classification rule list; equals the rule
    /// count when no rule matched
    pub class_index: usize,
}

impl std::fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
            if let Some(column) = self.column {
                write!(f, ":{}", column)?;
            }
        }
        write!(f, ": {}", self.message)
    }
}

/// Normalize a file path for store keying
///
/// Produces an absolute, case-folded path with `.` and `..` components
/// resolved lexically. Records and buffer paths are both normalized through
/// here, so comparisons are case-insensitive on every platform.
pub fn normalize_path(raw: impl AsRef<Path>) -> PathBuf {
    let path = raw.as_ref();
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }

    PathBuf::from(cleaned.to_string_lossy().to_lowercase())
}
