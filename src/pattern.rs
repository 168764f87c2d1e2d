//! Extraction pattern validation and compilation
//!
//! A pattern is a single regular expression capturing, in fixed order:
//! filename, line, [column,] message. The message is always the last group
//! and the column group is optional, so a usable pattern has exactly three
//! or four capture groups. Patterns outside that shape are rejected here and
//! never reach extraction.

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::warn;

/// Minimum capture groups: filename, line, message
pub const MIN_GROUPS: usize = 3;
/// Maximum capture groups: filename, line, column, message
pub const MAX_GROUPS: usize = 4;

/// Why a configured pattern was rejected
#[derive(Error, Debug)]
pub enum PatternError {
    /// The pattern is not a valid regular expression
    #[error("regex syntax error: {0}")]
    Syntax(#[from] regex::Error),

    /// The pattern compiled but captures the wrong number of groups
    #[error(
        "pattern must capture filename, line, [column,] message \
         (3 or 4 groups), found {0}"
    )]
    GroupCount(usize),
}

/// A validated extraction pattern
///
/// Compiled with multiline mode so `^`/`$` anchor on each line of the
/// captured build output.
#[derive(Debug, Clone)]
pub struct ErrorPattern {
    regex: Regex,
    group_count: usize,
}

impl ErrorPattern {
    /// Compile and validate a pattern string
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(pattern).multi_line(true).build()?;

        // captures_len includes the implicit whole-match group 0
        let group_count = regex.captures_len() - 1;
        if !(MIN_GROUPS..=MAX_GROUPS).contains(&group_count) {
            return Err(PatternError::GroupCount(group_count));
        }

        Ok(Self { regex, group_count })
    }

    /// Number of capture groups (3 or 4)
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Whether the pattern carries the optional column group
    pub fn has_column(&self) -> bool {
        self.group_count == MAX_GROUPS
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Validate a configured pattern, logging a single diagnostic on rejection
///
/// Returns `None` for an unusable pattern. The warning fires once per
/// validation attempt, not per extraction call; callers treat `None` as
/// "this parse yields an empty batch" rather than an error.
pub fn validate(pattern: &str) -> Option<ErrorPattern> {
    match ErrorPattern::compile(pattern) {
        Ok(compiled) => Some(compiled),
        Err(err) => {
            warn!(
                pattern,
                %err,
                "invalid extraction pattern; the regex must capture \
                 filename, line, [column,] message - no records will be \
                 extracted until the configuration is fixed"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_three_group_pattern_is_valid() {
        let pattern = ErrorPattern::compile(r"^(\S+):(\d+): (.+)$").unwrap();
        assert_eq!(pattern.group_count(), 3);
        assert!(!pattern.has_column());
    }

    #[test]
    fn test_four_group_pattern_is_valid() {
        let pattern = ErrorPattern::compile(r"^(\S+):(\d+):(\d+): (.+)$").unwrap();
        assert_eq!(pattern.group_count(), 4);
        assert!(pattern.has_column());
    }

    #[test]
    fn test_too_few_groups_rejected() {
        let err = ErrorPattern::compile(r"^(\S+): (.+)$").unwrap_err();
        assert!(matches!(err, PatternError::GroupCount(2)));
    }

    #[test]
    fn test_too_many_groups_rejected() {
        let err = ErrorPattern::compile(r"^(\S+):(\d+):(\d+):(\d+): (.+)$").unwrap_err();
        assert!(matches!(err, PatternError::GroupCount(5)));
    }

    #[test]
    fn test_syntax_error_rejected() {
        let err = ErrorPattern::compile(r"^(\S+):(\d+): (.+$").unwrap_err();
        assert!(matches!(err, PatternError::Syntax(_)));
    }

    #[test]
    fn test_non_capturing_groups_do_not_count() {
        // (?:...) must not count as a capture group
        let pattern = ErrorPattern::compile(r"^([^:\n]+):(\d+)(?::(\d+))?:\s*(.+)$").unwrap();
        assert_eq!(pattern.group_count(), 4);
    }

    #[test]
    fn test_validate_absorbs_bad_pattern() {
        assert!(validate(r"^(\S+): (.+)$").is_none());
        assert!(validate(r"^(\S+):(\d+): (.+)$").is_some());
    }

    #[test]
    fn test_multiline_mode_enabled() {
        let pattern = ErrorPattern::compile(r"^(\S+):(\d+): (.+)$").unwrap();
        let text = "first line\na.c:3: boom\nlast line";
        assert!(pattern.regex().is_match(text));
    }

    proptest! {
        /// The group-count contract holds for any number of literal groups.
        #[test]
        fn prop_group_count_contract(n in 0usize..8) {
            let body = (0..n).map(|_| "(x)").collect::<Vec<_>>().join(":");
            let result = ErrorPattern::compile(&body);
            if (MIN_GROUPS..=MAX_GROUPS).contains(&n) {
                prop_assert!(result.is_ok());
                prop_assert_eq!(result.unwrap().group_count(), n);
            } else {
                prop_assert!(matches!(result, Err(PatternError::GroupCount(m)) if m == n));
            }
        }
    }
}
