//! The highlighter engine facade
//!
//! [`Highlighter`] is the context object a host owns instead of process
//! globals: it holds the active configuration (pattern string + compiled
//! rule list) and the record store, and composes the parse pipeline of
//! pattern validation, extraction, and classification. Annotation
//! computation for a visible buffer happens on demand and is a pure read.

use crate::buffer::TargetBuffer;
use crate::classify::RuleSet;
use crate::config::HighlightConfig;
use crate::extract;
use crate::pattern;
use crate::resolve::resolve;
use crate::store::ErrorStore;
use crate::types::{normalize_path, ErrorRecord, Span};
use std::sync::RwLock;
use tracing::{debug, info};

/// A resolved annotation for one record in one buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    /// Span to decorate
    pub span: Span,
    /// Classification index of the originating record
    pub class_index: usize,
}

struct ActiveConfig {
    pattern: String,
    rules: RuleSet,
}

/// Engine facade owning configuration and the record store
pub struct Highlighter {
    config: RwLock<ActiveConfig>,
    store: ErrorStore,
}

impl Highlighter {
    /// Build an engine from loaded configuration
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            config: RwLock::new(Self::activate(&config)),
            store: ErrorStore::new(),
        }
    }

    /// Swap in new configuration; rules are recompiled once here and shared
    /// read-only by every following parse
    pub fn reload(&self, config: HighlightConfig) {
        info!("reloading highlighter configuration");
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = Self::activate(&config);
    }

    fn activate(config: &HighlightConfig) -> ActiveConfig {
        ActiveConfig {
            pattern: config.pattern_str().to_string(),
            rules: config.rule_set(),
        }
    }

    /// The record store, for host queries and the visibility toggle
    pub fn store(&self) -> &ErrorStore {
        &self.store
    }

    /// Parse one build run's output into a classified record batch
    ///
    /// An invalid configured pattern yields an empty batch after a single
    /// logged diagnostic; it never raises.
    pub fn parse(&self, text: &str) -> Vec<ErrorRecord> {
        let config = self.config.read().unwrap_or_else(|e| e.into_inner());
        Self::run_pipeline(&config.pattern, &config.rules, text)
    }

    /// Parse with a one-off pattern override, e.g. a per-build setting
    pub fn parse_with(&self, pattern: &str, text: &str) -> Vec<ErrorRecord> {
        let config = self.config.read().unwrap_or_else(|e| e.into_inner());
        Self::run_pipeline(pattern, &config.rules, text)
    }

    fn run_pipeline(pattern_str: &str, rules: &RuleSet, text: &str) -> Vec<ErrorRecord> {
        let Some(compiled) = pattern::validate(pattern_str) else {
            return Vec::new();
        };

        let mut records = extract::extract(&compiled, text);
        for record in &mut records {
            record.class_index = rules.classify(&record.message);
        }
        records
    }

    /// Parse a build run and install the batch as the active one
    pub fn rebuild(&self, text: &str) -> usize {
        let records = self.parse(text);
        let count = records.len();
        self.store.replace_all(records);
        count
    }

    /// Resolve annotations for a buffer from the active batch
    ///
    /// Returns nothing while annotations are hidden. Records without a line
    /// number are silently excluded.
    pub fn annotations_for(&self, buffer: &dyn TargetBuffer) -> Vec<Annotation> {
        if !self.store.is_visible() {
            return Vec::new();
        }

        let path = normalize_path(buffer.path());
        let records = self.store.records_for(&path);
        let annotations: Vec<Annotation> = records
            .iter()
            .filter_map(|record| {
                resolve(record, buffer).map(|span| Annotation {
                    span,
                    class_index: record.class_index,
                })
            })
            .collect();

        debug!(
            buffer = %path.display(),
            count = annotations.len(),
            "resolved annotations"
        );
        annotations
    }

    /// Number of configured classification rules
    pub fn rule_count(&self) -> usize {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .rules
            .len()
    }
}
