pub mod analysis;
pub mod config;
pub mod error;
pub mod insight;
pub mod logging;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod sanitize;
pub mod source;

pub use analysis::{group_by_region, PlanningMode, ReallocationPlanner, UtilizationClassifier};
pub use config::{load_config, AgentConfig, FailureMode};
pub use error::{AgentError, ConfigError, DataError, ErrorKind, Result};
pub use model::{DispatchResult, FacilityRecord, NotificationPayload, Recommendation};
pub use pipeline::{run, run_path, Pipeline, PipelineConfig, PipelineState, Stage};
pub use source::{open_source, DataSource};
