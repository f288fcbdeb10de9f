//! Configuration file loading and parsing.

use crate::types::LongechoConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Directory holding the project configuration.
pub const CONFIG_DIR: &str = ".longecho";
/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is valid")
    })
}

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Create a loader for `.longecho/config.yaml` under the given directory.
    ///
    /// A missing file yields the defaults.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            config_path: project_dir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE),
            required: false,
        }
    }

    /// Create a loader for an explicit file, which must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the configuration.
    pub fn load(&self) -> Result<LongechoConfig, ConfigError> {
        if !self.config_path.exists() {
            if self.required {
                return Err(ConfigError::NotFound {
                    path: self.config_path.clone(),
                });
            }
            return Ok(LongechoConfig::default());
        }

        let contents = std::fs::read_to_string(&self.config_path)?;
        let expanded = self.expand_env_vars(&contents)?;

        // An empty file is a valid, all-defaults config
        if expanded.trim().is_empty() {
            return Ok(LongechoConfig::default());
        }

        let config: LongechoConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in env_var_pattern().captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &LongechoConfig) -> Result<(), ConfigError> {
        if config.policy.summary_max_length == Some(0) {
            return Err(ConfigError::ValidationError {
                message: "policy.summary_max_length must be greater than 0".to_string(),
            });
        }

        if let Some(ext) = config
            .policy
            .extra_durable_extensions
            .iter()
            .find(|e| e.trim_start_matches('.').trim().is_empty())
        {
            return Err(ConfigError::ValidationError {
                message: format!("policy.extra_durable_extensions contains an empty entry: {ext:?}"),
            });
        }

        if let Some(name) = config
            .policy
            .extra_skip_directories
            .iter()
            .find(|n| n.trim().is_empty() || n.contains('/'))
        {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "policy.extra_skip_directories entries must be plain directory names: {name:?}"
                ),
            });
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
