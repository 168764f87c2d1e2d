//! Record extraction from raw build output
//!
//! Runs a validated pattern over the complete output of a build run and
//! produces records in source-text order. Individual malformed matches
//! degrade rather than fail: an unparseable line or column number becomes
//! `None`, and only a match with no message text is dropped outright.

use crate::pattern::ErrorPattern;
use crate::types::{normalize_path, ErrorRecord};
use tracing::{debug, trace};

/// Extract all records matched by `pattern` in `text`, in match order
///
/// Records come out unclassified (`class_index` 0); the engine assigns
/// classifications afterwards.
pub fn extract(pattern: &ErrorPattern, text: &str) -> Vec<ErrorRecord> {
    let message_group = pattern.group_count();
    let mut records = Vec::new();

    for caps in pattern.regex().captures_iter(text) {
        // The last group is always the message; a match without one is
        // useless and is discarded rather than kept partially.
        let Some(message) = caps.get(message_group) else {
            trace!("dropping match without message text");
            continue;
        };

        // A record is keyed by file path; an unmatched filename group
        // leaves nothing to anchor the record to.
        let Some(filename) = caps.get(1) else {
            trace!("dropping match without filename text");
            continue;
        };

        // Over-capturing patterns sometimes swallow preceding lines into
        // the filename group; only the final line is the path.
        let filename = filename.as_str().lines().last().unwrap_or("");

        let line = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
        let column = if pattern.has_column() {
            caps.get(3).and_then(|m| m.as_str().parse::<u32>().ok())
        } else {
            None
        };

        records.push(ErrorRecord {
            file: normalize_path(filename),
            line,
            column,
            message: message.as_str().to_string(),
            class_index: 0,
        });
    }

    debug!(count = records.len(), "extracted records from build output");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::ErrorPattern;

    fn compiled(pattern: &str) -> ErrorPattern {
        ErrorPattern::compile(pattern).unwrap()
    }

    #[test]
    fn test_four_group_extraction() {
        let pattern = compiled(r"^(\S+):(\d+):(\d+): (.+)$");
        let records = extract(&pattern, "a.c:10:5: error: bad");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, normalize_path("a.c"));
        assert_eq!(records[0].line, Some(10));
        assert_eq!(records[0].column, Some(5));
        assert_eq!(records[0].message, "error: bad");
    }

    #[test]
    fn test_three_group_extraction_has_no_column() {
        let pattern = compiled(r"^(\S+):(\d+): (.+)$");
        let records = extract(&pattern, "a.c:10: warning");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, Some(10));
        assert_eq!(records[0].column, None);
        assert_eq!(records[0].message, "warning");
    }

    #[test]
    fn test_records_in_source_order() {
        let pattern = compiled(r"^(\S+):(\d+): (.+)$");
        let text = "b.c:2: second\na.c:1: first\nc.c:3: third";
        let records = extract(&pattern, text);

        let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["second", "first", "third"]);
    }

    #[test]
    fn test_optional_column_group_unmatched() {
        let pattern = compiled(r"^([^:\n]+):(\d+)(?::(\d+))?: (.+)$");
        let records = extract(&pattern, "a.c:10: no column here\nb.c:20:7: with column");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].column, None);
        assert_eq!(records[1].column, Some(7));
    }

    #[test]
    fn test_unparseable_line_degrades_to_none() {
        let pattern = compiled(r"^(\S+):(\w+): (.+)$");
        let records = extract(&pattern, "a.c:ten: still a record");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, None);
        assert_eq!(records[0].message, "still a record");
    }

    #[test]
    fn test_line_number_overflow_degrades_to_none() {
        let pattern = compiled(r"^(\S+):(\d+): (.+)$");
        let records = extract(&pattern, "a.c:99999999999999999999: huge");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, None);
    }

    #[test]
    fn test_missing_message_drops_record() {
        // Message group only matches lines saying "error"; the other line
        // matches the outer alternation without a message and is dropped.
        let pattern = compiled(r"(?:^(\S+):(\d+): (error.+)$|^ignored\b.*$)");
        let records = extract(&pattern, "ignored completely\na.c:3: error: kept");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "error: kept");
    }

    #[test]
    fn test_multiline_filename_keeps_last_line() {
        // An over-capturing pattern that swallows the previous line into
        // the filename group; only the final captured line is the path.
        let pattern = compiled(r"((?s).+?):(\d+): (.+)");
        let records = extract(&pattern, "noise line\nsrc/a.c:4: boom");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, normalize_path("src/a.c"));
    }

    #[test]
    fn test_paths_are_normalized() {
        let pattern = compiled(r"^(\S+):(\d+): (.+)$");
        let records = extract(&pattern, "/TMP/A.C:1: x");

        assert_eq!(records[0].file, normalize_path("/tmp/a.c"));
    }

    #[test]
    fn test_empty_text_yields_empty_batch() {
        let pattern = compiled(r"^(\S+):(\d+): (.+)$");
        assert!(extract(&pattern, "").is_empty());
    }
}
