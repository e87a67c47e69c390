//! Builders for facility snapshots and run configurations.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use capacity_agent::analysis::PlanningMode;
use capacity_agent::config::{AgentConfig, FailureMode};
use capacity_agent::model::FacilityRecord;
use capacity_agent::pipeline::PipelineConfig;

/// Builder for `FacilityRecord` with a 100-pallet default capacity.
pub struct FacilityBuilder {
    record: FacilityRecord,
}

impl FacilityBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: FacilityRecord {
                id: id.to_string(),
                name: format!("{} Depot", id),
                region: "North".to_string(),
                total_capacity: 100,
                current_load: 0,
                manager_name: format!("Manager {}", id),
                manager_email: format!("{}@example.com", id.to_lowercase()),
                utilization_percentage: None,
            },
        }
    }

    pub fn region(mut self, region: &str) -> Self {
        self.record.region = region.to_string();
        self
    }

    pub fn capacity(mut self, capacity: i64) -> Self {
        self.record.total_capacity = capacity;
        self
    }

    pub fn load(mut self, load: i64) -> Self {
        self.record.current_load = load;
        self
    }

    pub fn manager(mut self, name: &str, email: &str) -> Self {
        self.record.manager_name = name.to_string();
        self.record.manager_email = email.to_string();
        self
    }

    pub fn utilization(mut self, value: f64) -> Self {
        self.record.utilization_percentage = Some(value);
        self
    }

    pub fn build(self) -> FacilityRecord {
        self.record
    }
}

/// Shorthand for a facility in `region` with the given capacity and load.
pub fn facility(id: &str, region: &str, capacity: i64, load: i64) -> FacilityRecord {
    FacilityBuilder::new(id)
        .region(region)
        .capacity(capacity)
        .load(load)
        .build()
}

/// Builder for `PipelineConfig`, starting from the validated defaults.
pub struct ConfigBuilder {
    config: AgentConfig,
    data_timeout: Option<Duration>,
    insight_timeout: Option<Duration>,
    render_timeout: Option<Duration>,
    dispatch_timeout: Option<Duration>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AgentConfig::default(),
            data_timeout: None,
            insight_timeout: None,
            render_timeout: None,
            dispatch_timeout: None,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn planning_mode(mut self, mode: PlanningMode) -> Self {
        self.config.planning_mode = mode;
        self
    }

    pub fn fail_fast(mut self) -> Self {
        self.config.failure_mode = FailureMode::FailFast;
        self
    }

    pub fn notifications(mut self, enabled: bool) -> Self {
        self.config.notifications_enabled = enabled;
        self
    }

    pub fn insights(mut self, enabled: bool) -> Self {
        self.config.insights_enabled = enabled;
        self
    }

    pub fn data_timeout(mut self, budget: Duration) -> Self {
        self.data_timeout = Some(budget);
        self
    }

    pub fn insight_timeout(mut self, budget: Duration) -> Self {
        self.insight_timeout = Some(budget);
        self
    }

    pub fn render_timeout(mut self, budget: Duration) -> Self {
        self.render_timeout = Some(budget);
        self
    }

    pub fn dispatch_timeout(mut self, budget: Duration) -> Self {
        self.dispatch_timeout = Some(budget);
        self
    }

    pub fn agent_config(&self) -> AgentConfig {
        self.config.clone()
    }

    pub fn build(self) -> Arc<PipelineConfig> {
        let mut config =
            PipelineConfig::from_config(&self.config).expect("test config should be valid");
        if let Some(budget) = self.data_timeout {
            config.data_timeout = budget;
        }
        if let Some(budget) = self.insight_timeout {
            config.insight_timeout = budget;
        }
        if let Some(budget) = self.render_timeout {
            config.render_timeout = budget;
        }
        if let Some(budget) = self.dispatch_timeout {
            config.dispatch_timeout = budget;
        }
        Arc::new(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
