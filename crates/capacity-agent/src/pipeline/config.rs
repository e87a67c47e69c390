use std::time::Duration;

use crate::analysis::PlanningMode;
use crate::config::{loader::validate_config, AgentConfig, BrandingConfig, FailureMode};
use crate::error::ConfigError;

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub threshold: f64,
    pub notifications_enabled: bool,
    pub insights_enabled: bool,
    pub planning_mode: PlanningMode,
    pub failure_mode: FailureMode,
    pub insight_sample_size: usize,
    pub data_timeout: Duration,
    pub insight_timeout: Duration,
    pub render_timeout: Duration,
    pub dispatch_timeout: Duration,
    pub branding: BrandingConfig,
}

impl PipelineConfig {
    pub fn from_config(config: &AgentConfig) -> Result<Self, ConfigError> {
        validate_config(config)?;
        Ok(Self {
            threshold: config.threshold,
            notifications_enabled: config.notifications_enabled,
            insights_enabled: config.insights_enabled,
            planning_mode: config.planning_mode,
            failure_mode: config.failure_mode,
            insight_sample_size: config.insight_sample_size,
            data_timeout: config.timeouts.data(),
            insight_timeout: config.timeouts.insight(),
            render_timeout: config.timeouts.render(),
            dispatch_timeout: config.timeouts.dispatch(),
            branding: config.branding.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let config = PipelineConfig::from_config(&AgentConfig::default()).unwrap();
        assert_eq!(config.threshold, 85.0);
        assert_eq!(config.dispatch_timeout, Duration::from_secs(30));
        assert_eq!(config.render_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let agent = AgentConfig {
            threshold: f64::NAN,
            ..AgentConfig::default()
        };
        assert!(PipelineConfig::from_config(&agent).is_err());
    }
}
