//! Utilization analysis: classification, regional grouping and reallocation planning.

pub mod classifier;
pub mod grouper;
pub mod planner;

pub use classifier::{Classification, ClassifyError, UtilizationClassifier};
pub use grouper::group_by_region;
pub use planner::{PlanningMode, ReallocationPlanner};
