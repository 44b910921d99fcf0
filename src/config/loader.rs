//! Configuration loading and merging logic
//!
//! Handles loading configuration from its sources and applying them
//! according to precedence rules.

use std::path::Path;

use anyhow::{Context, Result};

use super::{defaults, paths, schema::Config};

const ENV_NAMESPACE: &str = "KUBECTL_IMAGE_NAMESPACE";
const ENV_WAIT: &str = "KUBECTL_IMAGE_WAIT";
const ENV_ROLLOUT_TIMEOUT: &str = "KUBECTL_IMAGE_ROLLOUT_TIMEOUT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = if path.exists() {
            Self::load_file(&path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Load configuration from a file
    ///
    /// Keys missing from the file take their built-in defaults.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Check a loaded configuration for values the monitor cannot run with
    pub fn validate(config: &Config) -> Result<()> {
        let rollout = &config.rollout;
        if rollout.poll_interval_seconds == 0 {
            return Err(anyhow::anyhow!("rollout.pollIntervalSeconds must be greater than 0"));
        }
        if rollout.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("rollout.timeoutSeconds must be greater than 0"));
        }
        if rollout.poll_interval_seconds >= rollout.timeout_seconds {
            return Err(anyhow::anyhow!(
                "rollout.pollIntervalSeconds ({}) must be less than rollout.timeoutSeconds ({})",
                rollout.poll_interval_seconds,
                rollout.timeout_seconds
            ));
        }
        if config.default_namespace.is_empty() {
            return Err(anyhow::anyhow!("defaultNamespace must not be empty"));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable values are ignored.
    fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        if let Some(namespace) = lookup(ENV_NAMESPACE).filter(|ns| !ns.is_empty()) {
            config.default_namespace = namespace;
        }

        if let Some(wait) = lookup(ENV_WAIT) {
            match wait.parse::<bool>() {
                Ok(val) => config.wait = val,
                Err(_) => tracing::warn!("Ignoring {}={}: not a boolean", ENV_WAIT, wait),
            }
        }

        if let Some(timeout) = lookup(ENV_ROLLOUT_TIMEOUT) {
            match timeout.parse::<u64>() {
                Ok(val) => config.rollout.timeout_seconds = val,
                Err(_) => tracing::warn!(
                    "Ignoring {}={}: not a number of seconds",
                    ENV_ROLLOUT_TIMEOUT,
                    timeout
                ),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
