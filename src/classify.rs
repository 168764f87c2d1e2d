//! Ordered first-match-wins classification of record messages
//!
//! Each rule in the configured list optionally carries a sub-pattern that is
//! searched (not fully matched) against a record's message. The first rule
//! whose pattern finds a match wins and its index becomes the record's
//! classification. A rule without a sub-pattern matches unconditionally the
//! moment the scan reaches it, wherever it sits in the list - hosts use this
//! as a catch-all bucket. When no rule matches at all, the classification is
//! the rule count itself ("uncategorized").

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Visual treatment of an annotated span, as understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// Record the span but draw nothing
    None,
    /// Filled background
    Fill,
    /// Outline only
    Outline,
    SolidUnderline,
    StippledUnderline,
    SquigglyUnderline,
}

/// One classification rule as written in configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Color scope name the host resolves to a style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Gutter icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Display style; defaults to `fill` when a scope is set, `none` otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayStyle>,

    /// Sub-pattern searched against the message; omit for a catch-all rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

/// How a compiled rule decides whether it applies to a message
#[derive(Debug, Clone)]
enum Matcher {
    /// No sub-pattern configured: matches unconditionally when reached
    Always,
    /// Sub-pattern searched against the message
    Pattern(Regex),
    /// Sub-pattern failed to compile: never matches, index preserved
    Never,
}

/// A compiled classification rule
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    /// Color scope name for the host
    pub scope: Option<String>,
    /// Gutter icon name for the host
    pub icon: Option<String>,
    /// Resolved display style
    pub display: DisplayStyle,
    matcher: Matcher,
}

impl ClassificationRule {
    fn compile(config: &RuleConfig) -> Self {
        let matcher = match &config.regex {
            None => Matcher::Always,
            Some(raw) => match Regex::new(raw) {
                Ok(regex) => Matcher::Pattern(regex),
                Err(err) => {
                    warn!(
                        rule_regex = raw.as_str(),
                        %err,
                        "classification rule sub-pattern does not compile; \
                         the rule keeps its position but will never match"
                    );
                    Matcher::Never
                }
            },
        };

        // The original defaults: filled when colored, invisible otherwise
        let display = config.display.unwrap_or(if config.scope.is_some() {
            DisplayStyle::Fill
        } else {
            DisplayStyle::None
        });

        Self {
            scope: config.scope.clone(),
            icon: config.icon.clone(),
            display,
            matcher,
        }
    }

    /// Whether this rule is an unconditional catch-all
    pub fn is_catch_all(&self) -> bool {
        matches!(self.matcher, Matcher::Always)
    }
}

/// The ordered, shared rule list compiled from configuration
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ClassificationRule>,
}

impl RuleSet {
    /// Compile an ordered rule list from configuration entries
    pub fn from_configs(configs: &[RuleConfig]) -> Self {
        Self {
            rules: configs.iter().map(ClassificationRule::compile).collect(),
        }
    }

    /// A built-in rule set for hosts that configure no rules: errors, then
    /// warnings, then a catch-all bucket
    pub fn builtin() -> &'static RuleSet {
        static BUILTIN: Lazy<RuleSet> = Lazy::new(|| {
            RuleSet::from_configs(&[
                RuleConfig {
                    scope: Some("region.redish".to_string()),
                    regex: Some(r"(?i)\berror\b".to_string()),
                    ..Default::default()
                },
                RuleConfig {
                    scope: Some("region.yellowish".to_string()),
                    regex: Some(r"(?i)\bwarning\b".to_string()),
                    ..Default::default()
                },
                RuleConfig {
                    scope: Some("invalid".to_string()),
                    ..Default::default()
                },
            ])
        });
        &BUILTIN
    }

    /// Classify a message: index of the first matching rule, or `len()`
    /// when nothing matches
    pub fn classify(&self, message: &str) -> usize {
        for (index, rule) in self.rules.iter().enumerate() {
            match &rule.matcher {
                Matcher::Always => return index,
                Matcher::Pattern(regex) if regex.is_match(message) => return index,
                _ => {}
            }
        }
        self.rules.len()
    }

    /// Rule at the given index, if configured
    pub fn get(&self, index: usize) -> Option<&ClassificationRule> {
        self.rules.get(index)
    }

    /// Number of configured rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the list has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
