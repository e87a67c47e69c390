use std::fmt::Write;

use super::TextInsightGenerator;
use crate::error::InsightError;
use crate::model::Recommendation;

/// Utilization above which a source facility is called out as urgent.
const CRITICAL_UTILIZATION: f64 = 100.0;

/// Builds a two to three sentence summary from the recommendation sample.
#[derive(Debug, Clone, Default)]
pub struct SummaryInsight;

impl SummaryInsight {
    pub fn new() -> Self {
        Self
    }
}

impl TextInsightGenerator for SummaryInsight {
    fn summarize(&self, sample: &[Recommendation]) -> Result<String, InsightError> {
        if sample.is_empty() {
            return Err(InsightError::Empty);
        }

        let total_pallets: u64 = sample.iter().map(|r| r.pallets_to_move).sum();
        let mut regions: Vec<&str> = Vec::new();
        for rec in sample {
            if !regions.contains(&rec.region.as_str()) {
                regions.push(rec.region.as_str());
            }
        }

        // Non-empty sample, so a largest move always exists.
        let Some(largest) = sample.iter().max_by_key(|r| r.pallets_to_move) else {
            return Err(InsightError::Empty);
        };
        let peak_util = sample
            .iter()
            .map(|r| r.from_current_util)
            .fold(f64::MIN, f64::max);

        let mut text = String::new();
        let _ = write!(
            text,
            "Network health: {} sampled move{} totalling {} pallets across {} region{} ({}).",
            sample.len(),
            plural(sample.len()),
            total_pallets,
            regions.len(),
            plural(regions.len()),
            regions.join(", ")
        );
        let _ = write!(
            text,
            " Operational impact: the largest transfer moves {} pallets from {} ({:.2}%) to {} ({:.2}%).",
            largest.pallets_to_move,
            largest.from_facility.name,
            largest.from_current_util,
            largest.to_facility.name,
            largest.to_current_util
        );
        if peak_util > CRITICAL_UTILIZATION {
            let _ = write!(
                text,
                " Priority: immediate, at least one source is above capacity ({:.2}%).",
                peak_util
            );
        } else {
            let _ = write!(
                text,
                " Priority: schedule within the next planning cycle (peak source utilization {:.2}%).",
                peak_util
            );
        }

        Ok(text)
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
