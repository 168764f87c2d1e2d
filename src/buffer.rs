//! Target buffer abstraction and a rope-backed implementation
//!
//! The resolver only needs a small view of a text surface: map a
//! (line, column) position to a character offset, classify the character at
//! an offset against word boundaries, and hand back line and word spans.
//! Host editors implement [`TargetBuffer`] over their own document model;
//! [`TextBuffer`] is the in-process implementation used by the CLI and the
//! test suite, backed by a ropey rope.

use crate::error::Result;
use crate::types::{normalize_path, Span};
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};

/// Word-boundary classification of a buffer position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharClass {
    /// A word begins at this offset
    pub word_start: bool,
    /// A word ends at this offset
    pub word_end: bool,
}

impl CharClass {
    /// Whether the position touches a word on either side
    pub fn is_word_boundary(&self) -> bool {
        self.word_start || self.word_end
    }
}

/// The view of a text surface the span resolver consumes
///
/// All offsets are character offsets. Implementations clamp out-of-range
/// positions to the buffer end instead of panicking; compiler output
/// routinely points one past a token or beyond a shortened file.
pub trait TargetBuffer {
    /// Path identifying this buffer (not necessarily normalized)
    fn path(&self) -> &Path;

    /// Character offset of a zero-based (line, column) position, clamped
    /// into the buffer
    fn offset_of(&self, line: usize, column: usize) -> usize;

    /// Word-boundary classification at an offset
    fn classify_char_at(&self, offset: usize) -> CharClass;

    /// Span of the physical line containing an offset, trailing newline
    /// excluded
    fn line_span_at(&self, offset: usize) -> Span;

    /// Bounding span of the word touching an offset; empty span when no
    /// word is adjacent
    fn word_span_at(&self, offset: usize) -> Span;
}

/// In-memory text buffer over a ropey rope
pub struct TextBuffer {
    path: PathBuf,
    content: Rope,
}

impl TextBuffer {
    /// Create a buffer from in-memory text
    pub fn new(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            content: Rope::from_str(text),
        }
    }

    /// Load a buffer from disk
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        Ok(Self {
            content: Rope::from_str(&text),
            path,
        })
    }

    /// Normalized form of this buffer's path, for store queries
    pub fn normalized_path(&self) -> PathBuf {
        normalize_path(&self.path)
    }

    /// Byte offset for a character offset, for renderers that index bytes
    pub fn char_to_byte(&self, offset: usize) -> usize {
        self.content.char_to_byte(offset.min(self.content.len_chars()))
    }

    /// Buffer contents as a string
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.content.len_chars() {
            Some(self.content.char(offset))
        } else {
            None
        }
    }
}

impl TargetBuffer for TextBuffer {
    fn path(&self) -> &Path {
        &self.path
    }

    fn offset_of(&self, line: usize, column: usize) -> usize {
        let last_line = self.content.len_lines().saturating_sub(1);
        let line = line.min(last_line);
        let line_start = self.content.line_to_char(line);

        // Clamp the column inside the line's text, excluding the terminator
        let slice = self.content.line(line);
        let mut line_len = slice.len_chars();
        while line_len > 0 {
            let c = slice.char(line_len - 1);
            if c == '\n' || c == '\r' {
                line_len -= 1;
            } else {
                break;
            }
        }

        (line_start + column.min(line_len)).min(self.content.len_chars())
    }

    fn classify_char_at(&self, offset: usize) -> CharClass {
        let before = offset
            .checked_sub(1)
            .and_then(|prev| self.char_at(prev))
            .is_some_and(Self::is_word_char);
        let after = self.char_at(offset).is_some_and(Self::is_word_char);

        CharClass {
            word_start: after && !before,
            word_end: before && !after,
        }
    }

    fn line_span_at(&self, offset: usize) -> Span {
        let offset = offset.min(self.content.len_chars());
        let line = self.content.char_to_line(offset);
        let start = self.content.line_to_char(line);

        // Rope lines carry their terminator; the span excludes it
        let mut end = start + self.content.line(line).len_chars();
        while end > start {
            let c = self.content.char(end - 1);
            if c == '\n' || c == '\r' {
                end -= 1;
            } else {
                break;
            }
        }

        Span::new(start, end)
    }

    fn word_span_at(&self, offset: usize) -> Span {
        // Anchor on the word character at the offset, or the one just
        // before it when the offset sits at a word end.
        let anchor = if self.char_at(offset).is_some_and(Self::is_word_char) {
            Some(offset)
        } else if offset > 0 && self.char_at(offset - 1).is_some_and(Self::is_word_char) {
            Some(offset - 1)
        } else {
            None
        };

        let Some(anchor) = anchor else {
            return Span::new(offset, offset);
        };

        let mut start = anchor;
        while start > 0 && self.char_at(start - 1).is_some_and(Self::is_word_char) {
            start -= 1;
        }

        let mut end = anchor + 1;
        while self.char_at(end).is_some_and(Self::is_word_char) {
            end += 1;
        }

        Span::new(start, end)
    }
}
