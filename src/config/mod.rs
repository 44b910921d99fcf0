//! Configuration system for kubectl-image
//!
//! Layers built-in defaults, an optional YAML file and environment
//! overrides. Command-line flags are applied on top by the CLI layer.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, RolloutConfig};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "wait" => Ok(config.wait.to_string()),
        "rollout.pollIntervalSeconds" => Ok(config.rollout.poll_interval_seconds.to_string()),
        "rollout.timeoutSeconds" => Ok(config.rollout.timeout_seconds.to_string()),
        "rollout.cleanupGraceSeconds" => Ok(config.rollout.cleanup_grace_seconds.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "defaultNamespace" => {
            config.default_namespace = value.to_string();
        }
        "wait" => {
            config.wait = value.parse().context("wait must be 'true' or 'false'")?;
        }
        "rollout.pollIntervalSeconds" => {
            config.rollout.poll_interval_seconds = value
                .parse()
                .context("rollout.pollIntervalSeconds must be a number")?;
        }
        "rollout.timeoutSeconds" => {
            config.rollout.timeout_seconds = value
                .parse()
                .context("rollout.timeoutSeconds must be a number")?;
        }
        "rollout.cleanupGraceSeconds" => {
            config.rollout.cleanup_grace_seconds = value
                .parse()
                .context("rollout.cleanupGraceSeconds must be a number")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_trip() {
        let mut config = Config::default();
        set_config_value(&mut config, "rollout.timeoutSeconds", "120").unwrap();
        set_config_value(&mut config, "wait", "true").unwrap();
        assert_eq!(get_config_value(&config, "rollout.timeoutSeconds").unwrap(), "120");
        assert_eq!(get_config_value(&config, "wait").unwrap(), "true");
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "wait", "maybe").is_err());
        assert!(set_config_value(&mut config, "rollout.timeoutSeconds", "-1").is_err());
        assert!(set_config_value(&mut config, "ui.skin", "dracula").is_err());
        assert!(get_config_value(&config, "ui.skin").is_err());
    }
}
