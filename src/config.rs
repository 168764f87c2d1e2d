//! Configuration loading for the errmark engine
//!
//! Configuration is a TOML document carrying the extraction pattern and the
//! ordered classification rule list. Lookup is layered: an explicitly given
//! file wins, then a project-local `.errmark.toml` in the working directory,
//! then the global config under the platform config directory. With no file
//! at all the built-in defaults apply.

use crate::classify::{RuleConfig, RuleSet};
use crate::error::{ErrmarkError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = ".errmark.toml";

/// Default extraction pattern: `file:line[:column]: message`, the shape
/// emitted by gcc, clang, rustc one-liners and most unix tools
pub const DEFAULT_PATTERN: &str = r"^([^:\n]+):(\d+)(?::(\d+))?:\s*(.+)$";

/// Root configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Extraction pattern; falls back to [`DEFAULT_PATTERN`] when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Ordered classification rules, first match wins
    #[serde(default, rename = "colors")]
    pub rules: Vec<RuleConfig>,
}

impl HighlightConfig {
    /// Load configuration from an explicit file, the project override, or
    /// the global default, in that order of precedence
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!(path = %path.display(), "loading configuration");
            return Self::from_file(path);
        }

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            debug!(path = %project.display(), "using project configuration");
            return Self::from_file(&project);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                debug!(path = %global.display(), "using global configuration");
                return Self::from_file(&global);
            }
        }

        debug!("no configuration file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Read and parse a single configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            ErrmarkError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Location of the global configuration file, when the platform has a
    /// config directory
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("errmark").join("config.toml"))
    }

    /// The active extraction pattern string
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_deref().unwrap_or(DEFAULT_PATTERN)
    }

    /// Compile the configured rule list; the built-in set stands in when no
    /// rules are configured
    pub fn rule_set(&self) -> RuleSet {
        if self.rules.is_empty() {
            RuleSet::builtin().clone()
        } else {
            RuleSet::from_configs(&self.rules)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DisplayStyle;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
pattern = '^(\S+):(\d+):(\d+): (.+)$'

[[colors]]
scope = "region.redish"
icon = "circle"
regex = "error"

[[colors]]
scope = "region.yellowish"
display = "outline"
regex = "warning"

[[colors]]
scope = "invalid"
"#;

    #[test]
    fn test_parse_sample_config() {
        let config: HighlightConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.pattern_str(), r"^(\S+):(\d+):(\d+): (.+)$");
        assert_eq!(config.rules.len(), 3);
        assert_eq!(config.rules[0].icon.as_deref(), Some("circle"));
        assert_eq!(config.rules[1].display, Some(DisplayStyle::Outline));
        assert!(config.rules[2].regex.is_none());
    }

    #[test]
    fn test_rule_set_order_preserved() {
        let config: HighlightConfig = toml::from_str(SAMPLE).unwrap();
        let rules = config.rule_set();
        assert_eq!(rules.classify("error: x"), 0);
        assert_eq!(rules.classify("warning: y"), 1);
        assert_eq!(rules.classify("note: z"), 2);
    }

    #[test]
    fn test_default_pattern_used_when_absent() {
        let config = HighlightConfig::default();
        assert_eq!(config.pattern_str(), DEFAULT_PATTERN);
        // The default pattern itself must satisfy the group contract
        assert!(crate::pattern::ErrorPattern::compile(DEFAULT_PATTERN).is_ok());
    }

    #[test]
    fn test_builtin_rules_when_none_configured() {
        let config = HighlightConfig::default();
        let rules = config.rule_set();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.classify("error: x"), 0);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = HighlightConfig::load(Some(&path)).unwrap();
        assert_eq!(config.rules.len(), 3);
    }

    #[test]
    fn test_load_missing_explicit_file_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(HighlightConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_malformed_toml_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "pattern = [not toml").unwrap();

        let err = HighlightConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ErrmarkError::ConfigParse(_)));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config: HighlightConfig = toml::from_str(SAMPLE).unwrap();
        let text = toml::to_string(&config).unwrap();
        let reparsed: HighlightConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, reparsed);
    }
}
