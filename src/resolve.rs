//! Span resolution: anchoring a record inside a target buffer
//!
//! Compiler messages commonly point the column just past a token or at
//! whitespace. Anchoring the word at the reported column gives the most
//! precise highlight; the full physical line is the universal fallback used
//! when no column was captured or the column does not touch a word.

use crate::buffer::TargetBuffer;
use crate::types::{ErrorRecord, Span};

/// Resolve a record to a concrete span in `buffer`
///
/// Returns `None` when the record carries no line number - such a record
/// simply cannot be anchored and is excluded from the buffer's annotation
/// set. This is a resolution miss, not an error.
pub fn resolve(record: &ErrorRecord, buffer: &dyn TargetBuffer) -> Option<Span> {
    let line = record.line? as usize;
    let line_idx = line.saturating_sub(1);

    let Some(column) = record.column else {
        let offset = buffer.offset_of(line_idx, 0);
        return Some(buffer.line_span_at(offset));
    };

    let offset = buffer.offset_of(line_idx, (column as usize).saturating_sub(1));
    let class = buffer.classify_char_at(offset);
    if class.is_word_boundary() {
        Some(buffer.word_span_at(offset))
    } else {
        Some(buffer.line_span_at(offset))
    }
}
