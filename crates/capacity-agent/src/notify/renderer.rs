use std::fmt::Write;

use crate::config::BrandingConfig;
use crate::error::RenderError;
use crate::model::{FacilityRecord, Recommendation};

pub trait NotificationRenderer: Send + Sync {
    /// Renders the message body for one region.
    ///
    /// `facilities` is the whole region, not only the facilities involved in
    /// a move.
    fn render(
        &self,
        region: &str,
        facilities: &[FacilityRecord],
        recommendations: &[Recommendation],
        manager_name: &str,
    ) -> Result<String, RenderError>;
}

/// Plain-text regional report.
pub struct TextReportRenderer {
    threshold: f64,
    branding: BrandingConfig,
}

impl TextReportRenderer {
    pub fn new(threshold: f64, branding: BrandingConfig) -> Self {
        Self {
            threshold,
            branding,
        }
    }

    fn status_label(&self, utilization: f64) -> &'static str {
        if utilization > self.threshold {
            "OVER"
        } else if utilization < self.threshold {
            "UNDER"
        } else {
            "AT TARGET"
        }
    }
}

impl NotificationRenderer for TextReportRenderer {
    fn render(
        &self,
        region: &str,
        facilities: &[FacilityRecord],
        recommendations: &[Recommendation],
        manager_name: &str,
    ) -> Result<String, RenderError> {
        if recommendations.is_empty() {
            return Err(RenderError::Template {
                region: region.to_string(),
                reason: "no recommendations to report".to_string(),
            });
        }

        let mut out = String::new();
        let _ = writeln!(out, "Hello {},", manager_name);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} has reviewed utilization for the {} region against a {:.1}% target.",
            self.branding.agent_name, region, self.threshold
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<10} {:<24} {:>9} {:>9} {:>8}  STATUS",
            "ID", "FACILITY", "CAPACITY", "LOAD", "UTIL%"
        );
        for facility in facilities {
            let utilization = facility.utilization().unwrap_or_default();
            let _ = writeln!(
                out,
                "{:<10} {:<24} {:>9} {:>9} {:>8.2}  {}",
                facility.id,
                facility.name,
                facility.total_capacity,
                facility.current_load,
                utilization,
                self.status_label(utilization)
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Recommended pallet movements:");
        for rec in recommendations {
            let _ = writeln!(
                out,
                "  - Move {} pallets from {} ({}) at {:.2}% to {} ({}) at {:.2}%",
                rec.pallets_to_move,
                rec.from_facility.id,
                rec.from_facility.name,
                rec.from_current_util,
                rec.to_facility.id,
                rec.to_facility.name,
                rec.to_current_util
            );
        }
        let total: u64 = recommendations.iter().map(|r| r.pallets_to_move).sum();
        let _ = writeln!(out, "  Total: {} pallets", total);

        let _ = writeln!(out);
        let _ = writeln!(out, "-- ");
        let _ = writeln!(out, "{}", self.branding.agent_name);
        let _ = write!(out, "{}", self.branding.company_name);

        Ok(out)
    }
}
