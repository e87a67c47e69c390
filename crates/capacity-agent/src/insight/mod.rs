//! Narrative summaries of a reallocation plan.
//!
//! The pipeline hands a generator a small sample of recommendations and
//! attaches whatever text comes back to the run. `SummaryInsight` is a
//! deterministic, template-based generator that needs no external service.

pub mod summary;

use crate::error::InsightError;
use crate::model::Recommendation;

pub use summary::SummaryInsight;

pub trait TextInsightGenerator: Send + Sync {
    fn summarize(&self, sample: &[Recommendation]) -> Result<String, InsightError>;
}
