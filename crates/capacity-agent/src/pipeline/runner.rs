use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::analysis::{group_by_region, ReallocationPlanner, UtilizationClassifier};
use crate::config::{AgentConfig, FailureMode};
use crate::error::{ConfigError, ErrorKind};
use crate::insight::{SummaryInsight, TextInsightGenerator};
use crate::model::{DispatchResult, NotificationPayload, Recommendation};
use crate::notify::{
    DryRunDispatcher, NotificationDispatcher, NotificationRenderer, TextReportRenderer,
};
use crate::sanitize;
use crate::source::{open_source, DataSource};

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::progress::{NoopProgress, ProgressEvent, ProgressReporter};
use super::stage::Stage;
use super::state::{PipelineState, StageOutcome};
use super::timeout::call_with_timeout;

pub struct Pipeline {
    config: Arc<PipelineConfig>,
    source: Arc<dyn DataSource>,
    insight: Option<Arc<dyn TextInsightGenerator>>,
    renderer: Arc<dyn NotificationRenderer>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl Pipeline {
    /// Default collaborators: template insight, plain-text renderer, dry-run delivery.
    pub fn from_config(config: Arc<PipelineConfig>, source: Arc<dyn DataSource>) -> Self {
        let renderer = TextReportRenderer::new(config.threshold, config.branding.clone());
        Self {
            config,
            source,
            insight: Some(Arc::new(SummaryInsight::new())),
            renderer: Arc::new(renderer),
            dispatcher: Arc::new(DryRunDispatcher),
        }
    }

    pub fn with_insight(mut self, insight: Arc<dyn TextInsightGenerator>) -> Self {
        self.insight = Some(insight);
        self
    }

    pub fn without_insight(mut self) -> Self {
        self.insight = None;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn NotificationRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs all five stages once and returns the final state.
    ///
    /// Stage failures never abort the run; they are captured on the state.
    /// In fail-fast mode the stages after the first failure are skipped.
    pub fn run(&self, progress: &dyn ProgressReporter) -> PipelineState {
        let mut state = PipelineState::new();
        let _pipeline_span = info_span!("pipeline",
            run_id = %state.run_id,
            source = %self.source.describe(),
            threshold = self.config.threshold,
        )
        .entered();

        let mut stage = Stage::Monitor;
        while stage != Stage::Done {
            if self.config.failure_mode == FailureMode::FailFast && state.has_failed() {
                state.record_skipped(stage);
                let status = state
                    .stage_reports
                    .last()
                    .map(|r| r.status.clone())
                    .unwrap_or_default();
                progress.report(ProgressEvent::StageFinished {
                    stage,
                    outcome: StageOutcome::Skipped,
                    status,
                });
            } else {
                state = self.run_stage(stage, state, progress);
            }
            stage = stage.next();
        }

        state.finish();
        info!(
            status = %state.status,
            recommendations = state.recommendations.len(),
            delivered = state.delivered_count(),
            "Pipeline finished"
        );
        state
    }

    fn run_stage(
        &self,
        stage: Stage,
        mut state: PipelineState,
        progress: &dyn ProgressReporter,
    ) -> PipelineState {
        let _step = info_span!("stage", %stage).entered();
        progress.report(ProgressEvent::StageStarted { stage });
        state.stage = stage;

        let outcome = match stage {
            Stage::Monitor => self.step_monitor(&mut state),
            Stage::Detect => self.step_detect(&mut state),
            Stage::Analyze => self.step_analyze(&mut state),
            Stage::GenerateNotifications => self.step_generate_notifications(&mut state),
            Stage::DispatchNotifications => self.step_dispatch_notifications(&mut state),
            Stage::Done => Ok(String::new()),
        };

        let (outcome, status) = match outcome {
            Ok(status) => {
                debug!(%status, "Stage complete");
                state.record_completed(stage, status.clone());
                (StageOutcome::Completed, status)
            }
            Err(e) => {
                warn!(kind = %e.kind(), "Stage failed: {}", e);
                state.record_failed(stage, &e);
                let status = state
                    .stage_reports
                    .last()
                    .map(|r| r.status.clone())
                    .unwrap_or_default();
                (StageOutcome::Failed, status)
            }
        };

        progress.report(ProgressEvent::StageFinished {
            stage,
            outcome,
            status,
        });
        state
    }

    fn step_monitor(&self, state: &mut PipelineState) -> Result<String, PipelineError> {
        let source = Arc::clone(&self.source);
        let facilities = call_with_timeout(
            "load facilities",
            ErrorKind::Data,
            self.config.data_timeout,
            move || source.load(),
        )?;

        state.facilities.extend(facilities);
        Ok(format!(
            "Monitoring complete: {} facilities loaded",
            state.facilities.len()
        ))
    }

    fn step_detect(&self, state: &mut PipelineState) -> Result<String, PipelineError> {
        let classified = UtilizationClassifier::new(self.config.threshold)
            .map_err(PipelineError::from)
            .and_then(|c| c.classify(&state.facilities).map_err(PipelineError::from));

        match classified {
            Ok(classification) => {
                state.regions = group_by_region(&classification.facilities);
                state.overutilized.extend(classification.overutilized);
                state.underutilized.extend(classification.underutilized);
                Ok(format!(
                    "Detection complete: {} over-utilized, {} under-utilized",
                    state.overutilized.len(),
                    state.underutilized.len()
                ))
            }
            Err(e) => {
                // The region map still reflects the snapshot, unresolved.
                state.regions = group_by_region(&state.facilities);
                Err(e)
            }
        }
    }

    fn step_analyze(&self, state: &mut PipelineState) -> Result<String, PipelineError> {
        let planner = ReallocationPlanner::new(self.config.threshold, self.config.planning_mode)?;
        let recommendations = planner.plan(&state.overutilized, &state.underutilized)?;
        let planned = recommendations.len();
        state.recommendations.extend(recommendations);

        if planned > 0 && self.config.insights_enabled {
            if let Some(insight) = &self.insight {
                let generator = Arc::clone(insight);
                let sample: Vec<Recommendation> = state
                    .recommendations
                    .iter()
                    .take(self.config.insight_sample_size)
                    .cloned()
                    .collect();
                let text = call_with_timeout(
                    "summarize recommendations",
                    ErrorKind::Insight,
                    self.config.insight_timeout,
                    move || generator.summarize(&sample),
                )?;
                state.insight = Some(text);
            }
        }

        Ok(format!(
            "Analysis complete: {} recommendations generated",
            planned
        ))
    }

    fn step_generate_notifications(
        &self,
        state: &mut PipelineState,
    ) -> Result<String, PipelineError> {
        if !self.config.notifications_enabled {
            return Ok("Notification generation skipped - notifications disabled".to_string());
        }

        let mut by_region: Vec<(&str, Vec<Recommendation>)> = Vec::new();
        for rec in &state.recommendations {
            match by_region.iter_mut().find(|(region, _)| *region == rec.region) {
                Some((_, recs)) => recs.push(rec.clone()),
                None => by_region.push((rec.region.as_str(), vec![rec.clone()])),
            }
        }

        let mut payloads = Vec::with_capacity(by_region.len());
        let mut first_error: Option<PipelineError> = None;

        for (region, recs) in by_region {
            // The first recommendation of a region decides who is addressed.
            let manager_name = recs[0].manager_name.clone();
            let manager_email = recs[0].manager_email.clone();
            let facilities = state.regions.get(region).unwrap_or_default().to_vec();
            let recommendation_count = recs.len();

            let renderer = Arc::clone(&self.renderer);
            let region_name = region.to_string();
            let addressee = manager_name.clone();
            let rendered = call_with_timeout(
                "render notification",
                ErrorKind::Rendering,
                self.config.render_timeout,
                move || renderer.render(&region_name, &facilities, &recs, &addressee),
            );

            match rendered {
                Ok(content) => payloads.push(NotificationPayload {
                    region: region.to_string(),
                    subject: self.config.branding.subject_for(region),
                    manager_name,
                    manager_email,
                    rendered_content: content,
                    recommendation_count,
                }),
                Err(e) => {
                    warn!(region, "Failed to render notification: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        let prepared = payloads.len();
        state.notifications.extend(payloads);

        match first_error {
            Some(e) => Err(e),
            None => Ok(format!(
                "Notification generation complete: {} notifications prepared",
                prepared
            )),
        }
    }

    fn step_dispatch_notifications(
        &self,
        state: &mut PipelineState,
    ) -> Result<String, PipelineError> {
        if !self.config.notifications_enabled {
            return Ok("Dispatch skipped - notifications disabled".to_string());
        }

        let mut results = Vec::with_capacity(state.notifications.len());
        for payload in &state.notifications {
            let dispatcher = Arc::clone(&self.dispatcher);
            let recipient = payload.manager_email.clone();
            let subject = payload.subject.clone();
            let content = payload.rendered_content.clone();

            let outcome = call_with_timeout(
                "send notification",
                ErrorKind::Dispatch,
                self.config.dispatch_timeout,
                move || dispatcher.send(&recipient, &subject, &content),
            );

            let result = match outcome {
                Ok(true) => {
                    info!(
                        region = %payload.region,
                        recipient = %sanitize::redact_email(&payload.manager_email),
                        "Notification sent"
                    );
                    DispatchResult::delivered(payload)
                }
                Ok(false) => {
                    warn!(region = %payload.region, "Dispatcher declined notification");
                    DispatchResult::failed(payload, "delivery rejected by dispatcher")
                }
                // An expired worker is detached, not cancelled; it may still deliver.
                Err(e @ PipelineError::Timeout(_)) => {
                    warn!(
                        region = %payload.region,
                        recipient = %sanitize::redact_email(&payload.manager_email),
                        "Notification send timed out: {}",
                        e
                    );
                    DispatchResult::failed(payload, format!("{}; delivery may still complete", e))
                }
                Err(e) => {
                    warn!(
                        region = %payload.region,
                        recipient = %sanitize::redact_email(&payload.manager_email),
                        "Failed to send notification: {}",
                        e
                    );
                    DispatchResult::failed(payload, e.to_string())
                }
            };
            results.push(result);
        }

        let attempted = results.len();
        let delivered = results.iter().filter(|r| r.success).count();
        state.dispatch_results.extend(results);

        Ok(format!(
            "Dispatch complete: {}/{} notifications sent successfully",
            delivered, attempted
        ))
    }
}

/// Builds a pipeline with the default collaborators and runs it once.
///
/// The only error is an invalid configuration; everything that goes wrong
/// during the run is reported on the returned state.
pub fn run(
    source: Arc<dyn DataSource>,
    config: &AgentConfig,
) -> Result<PipelineState, ConfigError> {
    let config = Arc::new(PipelineConfig::from_config(config)?);
    Ok(Pipeline::from_config(config, source).run(&NoopProgress))
}

/// Opens a CSV or JSON snapshot and runs the pipeline over it.
pub fn run_path(path: &Path, config: &AgentConfig) -> crate::Result<PipelineState> {
    let source = open_source(path)?;
    Ok(run(Arc::from(source), config)?)
}
