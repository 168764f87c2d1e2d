//! Errmark - build-output error extraction and buffer-span resolution
//!
//! Errmark parses the textual output of a finished build into structured
//! error records and resolves each record into a concrete highlight span
//! inside a source buffer, so host editors can annotate the matching code.
//!
//! # Architecture
//!
//! The pipeline is composed of small, separately testable pieces:
//! - **Pattern**: validates the configured extraction regex (it must
//!   capture filename, line, \[column,\] message, in that order)
//! - **Extract**: runs the pattern over the build log, producing records
//!   with optional positional fields
//! - **Classify**: assigns each record the index of the first matching
//!   rule from an ordered, configuration-driven list
//! - **Resolve**: anchors a record inside a [`buffer::TargetBuffer`],
//!   preferring the word at the reported column and falling back to the
//!   full line
//! - **Store**: holds the active batch behind an atomic swap, plus the
//!   process-wide visibility flag
//!
//! # Example
//!
//! ```
//! use errmark_core::{Highlighter, HighlightConfig, TextBuffer};
//!
//! let engine = Highlighter::new(HighlightConfig::default());
//! engine.rebuild("/tmp/main.c:2:12: error: use of undeclared identifier 'foo'");
//!
//! let buffer = TextBuffer::new("/tmp/main.c", "int main() {\n    return foo;\n}\n");
//! let annotations = engine.annotations_for(&buffer);
//! assert_eq!(annotations.len(), 1);
//! ```

pub mod buffer;
pub mod classify;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod pattern;
pub mod resolve;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use buffer::{CharClass, TargetBuffer, TextBuffer};
pub use classify::{ClassificationRule, DisplayStyle, RuleConfig, RuleSet};
pub use commands::{HideErrors, ShowErrors, ViewCommand};
pub use config::HighlightConfig;
pub use engine::{Annotation, Highlighter};
pub use error::{ErrmarkError, Result};
pub use pattern::{ErrorPattern, PatternError};
pub use resolve::resolve;
pub use store::ErrorStore;
pub use types::{normalize_path, ErrorRecord, Span};
