//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::rollout::RolloutSettings;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace used when the kubeconfig context has none
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Wait for the rollout after every set
    #[serde(default)]
    pub wait: bool,

    /// Rollout monitor timing
    #[serde(default)]
    pub rollout: RolloutConfig,
}

/// Rollout monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RolloutConfig {
    /// Seconds between polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,

    /// Overall deadline in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Seconds to wait for old pods once new pods are ready
    #[serde(default = "default_cleanup_grace")]
    pub cleanup_grace_seconds: u64,
}

// Default value functions
fn default_namespace() -> String {
    "default".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_timeout() -> u64 {
    600
}

fn default_cleanup_grace() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            wait: false,
            rollout: RolloutConfig::default(),
        }
    }
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            timeout_seconds: default_timeout(),
            cleanup_grace_seconds: default_cleanup_grace(),
        }
    }
}

impl RolloutConfig {
    pub fn settings(&self) -> RolloutSettings {
        RolloutSettings {
            poll_interval: Duration::from_secs(self.poll_interval_seconds),
            timeout: Duration::from_secs(self.timeout_seconds),
            cleanup_grace: Duration::from_secs(self.cleanup_grace_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.default_namespace, "default");
        assert_eq!(config.rollout.settings(), RolloutSettings::default());
    }

    #[test]
    fn test_config_serialization() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("defaultNamespace"));
        assert!(yaml.contains("pollIntervalSeconds"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
defaultNamespace: payments
rollout:
  timeoutSeconds: 120
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_namespace, "payments");
        assert!(!config.wait);
        assert_eq!(config.rollout.timeout_seconds, 120);
        assert_eq!(config.rollout.poll_interval_seconds, 5);
    }
}
