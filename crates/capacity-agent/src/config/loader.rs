use std::path::{Path, PathBuf};

use crate::config::schema::AgentConfig;
use crate::error::ConfigError;

const SUPPORTED_VERSION: &str = "1.0";
const MAX_THRESHOLD: f64 = 1000.0;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AgentConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<AgentConfig, ConfigError> {
    let config: AgentConfig = serde_json::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// `<platform config dir>/capacity-agent/config.json`, if a config dir exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("capacity-agent").join("config.json"))
}

pub fn validate_config(config: &AgentConfig) -> Result<(), ConfigError> {
    if config.version != SUPPORTED_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if !config.threshold.is_finite() || config.threshold <= 0.0 || config.threshold > MAX_THRESHOLD
    {
        return Err(ConfigError::Validation {
            message: format!(
                "Threshold must be within (0, {}], got {}",
                MAX_THRESHOLD, config.threshold
            ),
        });
    }

    if config.insight_sample_size == 0 {
        return Err(ConfigError::Validation {
            message: "insight_sample_size must be at least 1".to_string(),
        });
    }

    let timeouts = &config.timeouts;
    for (name, secs) in [
        ("data_secs", timeouts.data_secs),
        ("insight_secs", timeouts.insight_secs),
        ("render_secs", timeouts.render_secs),
        ("dispatch_secs", timeouts.dispatch_secs),
    ] {
        if secs == 0 {
            return Err(ConfigError::Validation {
                message: format!("Timeout '{}' must be greater than zero", name),
            });
        }
    }

    Ok(())
}
