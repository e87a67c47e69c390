use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ErrorKind;
use crate::model::{
    DispatchResult, FacilityRecord, NotificationPayload, Recommendation, RegionGroups,
};

use super::error::PipelineError;
use super::stage::Stage;

/// Structured record of a failure captured by a stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageError {
    pub stage: Stage,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    Completed,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
    pub status: String,
}

/// Everything a run accumulates, owned by the orchestrator and handed from
/// stage to stage. Collections only ever grow during a run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub stage: Stage,

    // Monitor
    pub facilities: Vec<FacilityRecord>,

    // Detect
    pub overutilized: Vec<FacilityRecord>,
    pub underutilized: Vec<FacilityRecord>,
    pub regions: RegionGroups,

    // Analyze
    pub recommendations: Vec<Recommendation>,
    pub insight: Option<String>,

    // GenerateNotifications
    pub notifications: Vec<NotificationPayload>,

    // DispatchNotifications
    pub dispatch_results: Vec<DispatchResult>,

    pub status: String,
    /// First failure of the run.
    pub error: Option<StageError>,
    /// Every failure of the run, in order.
    pub errors: Vec<StageError>,
    pub stage_reports: Vec<StageReport>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            stage: Stage::Monitor,
            facilities: Vec::new(),
            overutilized: Vec::new(),
            underutilized: Vec::new(),
            regions: RegionGroups::new(),
            recommendations: Vec::new(),
            insight: None,
            notifications: Vec::new(),
            dispatch_results: Vec::new(),
            status: "Starting".to_string(),
            error: None,
            errors: Vec::new(),
            stage_reports: Vec::new(),
        }
    }

    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Number of dispatch results that reported a delivery.
    pub fn delivered_count(&self) -> usize {
        self.dispatch_results.iter().filter(|r| r.success).count()
    }

    pub(crate) fn record_completed(&mut self, stage: Stage, status: String) {
        // Once a stage has failed, the status keeps describing that failure.
        if self.error.is_none() {
            self.status = status.clone();
        }
        self.stage_reports.push(StageReport {
            stage,
            outcome: StageOutcome::Completed,
            status,
        });
    }

    pub(crate) fn record_failed(&mut self, stage: Stage, err: &PipelineError) {
        let descriptor = StageError {
            stage,
            kind: err.kind(),
            message: err.to_string(),
        };
        let status = format!("Error in {}: {}", stage.activity(), descriptor.message);

        if self.error.is_none() {
            self.status = status.clone();
            self.error = Some(descriptor.clone());
        }
        self.errors.push(descriptor);
        self.stage_reports.push(StageReport {
            stage,
            outcome: StageOutcome::Failed,
            status,
        });
    }

    pub(crate) fn record_skipped(&mut self, stage: Stage) {
        self.stage_reports.push(StageReport {
            stage,
            outcome: StageOutcome::Skipped,
            status: format!("Skipped {} after earlier failure", stage.activity()),
        });
    }

    pub(crate) fn finish(&mut self) {
        self.stage = Stage::Done;
        self.finished_at = Some(Utc::now());
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
