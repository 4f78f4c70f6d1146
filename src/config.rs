use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GateError, Result};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "conventional-gate.toml";

/// Represents the complete configuration for conventional-gate.
///
/// Contains the commit classification settings and the PR title rules.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub commits: CommitsConfig,

    #[serde(default)]
    pub title: TitleConfig,
}

/// Returns the full conventional commit type set.
fn default_commit_types() -> Vec<String> {
    [
        "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore",
        "revert",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

/// Returns the types counted as features.
fn default_feature_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the types counted as fixes.
fn default_fix_types() -> Vec<String> {
    vec!["fix".to_string()]
}

/// Hosts stop listing pull request commits after this many.
fn default_commit_limit() -> usize {
    250
}

fn default_strict() -> bool {
    true
}

/// Configuration for commit classification.
///
/// An empty `types` list accepts any type.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitsConfig {
    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,

    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,

    #[serde(default = "default_fix_types")]
    pub fix_types: Vec<String>,

    #[serde(default = "default_commit_limit")]
    pub commit_limit: usize,

    /// Fail when no commit is compliant; `false` only warns
    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        CommitsConfig {
            types: default_commit_types(),
            feature_types: default_feature_types(),
            fix_types: default_fix_types(),
            commit_limit: default_commit_limit(),
            strict: default_strict(),
        }
    }
}

/// Rules applied to the pull request title.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TitleConfig {
    /// Allowed scopes; `None` leaves scopes unrestricted
    #[serde(default)]
    pub scopes: Option<Vec<String>>,

    #[serde(default)]
    pub require_scope: bool,

    #[serde(default)]
    pub subject_pattern: Option<String>,

    /// Replaces the default pattern error; supports `{subject}` and `{title}`
    #[serde(default)]
    pub subject_pattern_error: Option<String>,
}

/// Run configuration resolved once from [`Config`] and never modified afterwards
#[derive(Debug, Clone)]
pub struct ClassificationConfig {
    pub recognized_types: Vec<String>,
    pub feature_types: Vec<String>,
    pub fix_types: Vec<String>,
    pub recognized_scopes: Option<Vec<String>>,
    pub require_scope: bool,
    pub subject_pattern: Option<Regex>,
    pub subject_pattern_error: Option<String>,
    pub commit_limit: usize,
    pub strict: bool,
}

impl ClassificationConfig {
    /// Resolve the file configuration, compiling the subject pattern
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.commits.commit_limit == 0 {
            return Err(GateError::config("commit_limit must be greater than zero"));
        }

        let subject_pattern = config
            .title
            .subject_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    GateError::config(format!("Invalid subject_pattern '{}': {}", pattern, e))
                })
            })
            .transpose()?;

        Ok(ClassificationConfig {
            recognized_types: config.commits.types.clone(),
            feature_types: config.commits.feature_types.clone(),
            fix_types: config.commits.fix_types.clone(),
            recognized_scopes: config.title.scopes.clone(),
            require_scope: config.title.require_scope,
            subject_pattern,
            subject_pattern_error: config.title.subject_pattern_error.clone(),
            commit_limit: config.commits.commit_limit,
            strict: config.commits.strict,
        })
    }

    /// Whether `commit_type` may count towards the version
    pub fn is_recognized_type(&self, commit_type: &str) -> bool {
        self.recognized_types.is_empty() || self.recognized_types.iter().any(|t| t == commit_type)
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        let defaults = Config::default();
        ClassificationConfig {
            recognized_types: defaults.commits.types,
            feature_types: defaults.commits.feature_types,
            fix_types: defaults.commits.fix_types,
            recognized_scopes: None,
            require_scope: false,
            subject_pattern: None,
            subject_pattern_error: None,
            commit_limit: defaults.commits.commit_limit,
            strict: defaults.commits.strict,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `conventional-gate.toml` in current directory
/// 3. `.conventional-gate.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| GateError::config(e.to_string()))
}
