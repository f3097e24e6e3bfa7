use crate::domain::prerelease::validate_tag;
use crate::domain::{default_rules, PrereleasePolicy, Rule, Severity};
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Configuration file name looked up in the project root
pub const CONFIG_FILE: &str = "monorelease.toml";

/// Represents the complete configuration for mono-release.
///
/// Contains workspace globs, commit rules, versioning policy and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    /// Workspace glob patterns relative to the project root. Empty means
    /// "use the `workspaces` field of the root manifest".
    #[serde(default)]
    pub workspaces: Vec<String>,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// One `[[rules]]` entry.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RuleConfig {
    pub pattern: String,
    pub release: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl RuleConfig {
    /// Compile into a [Rule], validating pattern, release kind and tag
    pub fn compile(&self) -> Result<Rule> {
        if let Some(tag) = &self.tag {
            validate_tag(tag)?;
        }
        let severity = Severity::from_kind(&self.release, self.tag.as_deref())?;
        Rule::new(&self.pattern, severity)
    }
}

/// Configuration for severity ordering.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct VersioningConfig {
    #[serde(default)]
    pub prerelease_policy: PrereleasePolicy,
}

fn default_confirm_writes() -> bool {
    true
}

/// Configuration for behavior customization.
///
/// Controls runtime behavior of mono-release without affecting analysis.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Ask before rewriting manifests
    #[serde(default = "default_confirm_writes")]
    pub confirm_writes: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            confirm_writes: default_confirm_writes(),
        }
    }
}

impl Config {
    /// Compile the configured rules, or the default rule table when none are
    /// configured.
    ///
    /// Every invalid entry is reported, one per line.
    pub fn compiled_rules(&self) -> Result<Vec<Rule>> {
        if self.rules.is_empty() {
            return Ok(default_rules());
        }

        let mut rules = Vec::new();
        let mut errors = Vec::new();
        for entry in &self.rules {
            match entry.compile() {
                Ok(rule) => rules.push(rule),
                Err(e) => errors.push(e),
            }
        }

        ReleaseError::aggregate(errors)?;
        Ok(rules)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `monorelease.toml` in the project root
/// 3. `monorelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `root` - Project root directory
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, root: &Path) -> Result<Config> {
    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if root.join(CONFIG_FILE).exists() {
        root.join(CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir().filter(|d| d.join(CONFIG_FILE).exists()) {
        config_dir.join(CONFIG_FILE)
    } else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::configuration(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&config_str).map_err(|e| {
        ReleaseError::configuration(format!("Cannot parse {}: {}", path.display(), e))
    })?;

    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.workspaces.is_empty());
        assert!(config.rules.is_empty());
        assert_eq!(config.versioning.prerelease_policy, PrereleasePolicy::BelowStable);
        assert!(config.behavior.confirm_writes);
    }

    #[test]
    fn test_empty_rules_fall_back_to_defaults() {
        let rules = Config::default().compiled_rules().unwrap();
        assert_eq!(rules.len(), default_rules().len());
    }

    #[test]
    fn test_parse_rules() {
        let config: Config = toml::from_str(
            r#"
[[rules]]
pattern = "^feat"
release = "minor"

[[rules]]
pattern = "^exp"
release = "prerelease"
tag = "alpha"
"#,
        )
        .unwrap();

        let rules = config.compiled_rules().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].severity, Severity::Prerelease("alpha".to_string()));
    }

    #[test]
    fn test_invalid_rules_all_reported() {
        let config = Config {
            rules: vec![
                RuleConfig {
                    pattern: "fix(".to_string(),
                    release: "patch".to_string(),
                    tag: None,
                },
                RuleConfig {
                    pattern: "^exp".to_string(),
                    release: "prepatch".to_string(),
                    tag: Some("al pha".to_string()),
                },
            ],
            ..Config::default()
        };

        let err = config.compiled_rules().unwrap_err();
        assert!(matches!(err, ReleaseError::Aggregate(ref errors) if errors.len() == 2));
    }

    #[test]
    fn test_unknown_release_kind() {
        let rule = RuleConfig {
            pattern: "^x".to_string(),
            release: "huge".to_string(),
            tag: None,
        };
        assert!(matches!(rule.compile(), Err(ReleaseError::Configuration(_))));
    }
}
