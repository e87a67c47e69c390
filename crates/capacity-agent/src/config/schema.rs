use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::PlanningMode;

pub const DEFAULT_THRESHOLD: f64 = 85.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Utilization percentage separating over- from under-utilized facilities.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default = "default_true")]
    pub insights_enabled: bool,
    #[serde(default)]
    pub planning_mode: PlanningMode,
    #[serde(default)]
    pub failure_mode: FailureMode,
    /// Number of leading recommendations handed to the insight generator.
    #[serde(default = "default_insight_sample_size")]
    pub insight_sample_size: usize,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub branding: BrandingConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_true() -> bool {
    true
}

fn default_insight_sample_size() -> usize {
    3
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            threshold: DEFAULT_THRESHOLD,
            notifications_enabled: true,
            insights_enabled: true,
            planning_mode: PlanningMode::default(),
            failure_mode: FailureMode::default(),
            insight_sample_size: default_insight_sample_size(),
            timeouts: TimeoutConfig::default(),
            branding: BrandingConfig::default(),
        }
    }
}

/// What the orchestrator does after a stage captures an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Keep running every remaining stage on whatever state is available.
    #[default]
    Continue,
    /// Skip every remaining stage.
    FailFast,
}

/// Per-call budgets for external collaborators, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_data_secs")]
    pub data_secs: u64,
    #[serde(default = "default_insight_secs")]
    pub insight_secs: u64,
    #[serde(default = "default_render_secs")]
    pub render_secs: u64,
    #[serde(default = "default_dispatch_secs")]
    pub dispatch_secs: u64,
}

fn default_data_secs() -> u64 {
    30
}

fn default_insight_secs() -> u64 {
    30
}

fn default_render_secs() -> u64 {
    10
}

fn default_dispatch_secs() -> u64 {
    30
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            data_secs: default_data_secs(),
            insight_secs: default_insight_secs(),
            render_secs: default_render_secs(),
            dispatch_secs: default_dispatch_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn data(&self) -> Duration {
        Duration::from_secs(self.data_secs)
    }

    pub fn insight(&self) -> Duration {
        Duration::from_secs(self.insight_secs)
    }

    pub fn render(&self) -> Duration {
        Duration::from_secs(self.render_secs)
    }

    pub fn dispatch(&self) -> Duration {
        Duration::from_secs(self.dispatch_secs)
    }
}

/// Names printed in notification bodies and subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "default_agent_name")]
    pub agent_name: String,
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

fn default_agent_name() -> String {
    "Network Utilization Agent".to_string()
}

fn default_company_name() -> String {
    "Supply Chain AI Solutions".to_string()
}

fn default_subject_prefix() -> String {
    "Warehouse Utilization Report".to_string()
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            company_name: default_company_name(),
            subject_prefix: default_subject_prefix(),
        }
    }
}

impl BrandingConfig {
    pub fn subject_for(&self, region: &str) -> String {
        format!("{} - {} Region", self.subject_prefix, region)
    }
}
