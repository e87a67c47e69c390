use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanningError;
use crate::model::{FacilityRecord, Recommendation};

/// How receiving capacity is accounted for while planning one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningMode {
    /// Every source facility sees each receiver's full headroom, so several
    /// sources may together oversubscribe one receiver.
    #[default]
    Legacy,
    /// Headroom is drawn down as moves are committed within a region.
    CapacityAware,
}

/// Greedy, region-scoped pallet reallocation.
pub struct ReallocationPlanner {
    threshold: f64,
    mode: PlanningMode,
}

impl ReallocationPlanner {
    pub fn new(threshold: f64, mode: PlanningMode) -> Result<Self, PlanningError> {
        if !threshold.is_finite() {
            return Err(PlanningError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold, mode })
    }

    pub fn mode(&self) -> PlanningMode {
        self.mode
    }

    /// Pallet count a facility should hold at the threshold, truncated.
    fn target_load(&self, total_capacity: i64) -> i64 {
        (total_capacity as f64 * (self.threshold / 100.0)).floor() as i64
    }

    fn excess(&self, facility: &FacilityRecord) -> Result<i64, PlanningError> {
        facility
            .current_load
            .checked_sub(self.target_load(facility.total_capacity))
            .ok_or_else(|| PlanningError::Overflow {
                id: facility.id.clone(),
            })
    }

    fn headroom(&self, facility: &FacilityRecord) -> Result<i64, PlanningError> {
        self.target_load(facility.total_capacity)
            .checked_sub(facility.current_load)
            .ok_or_else(|| PlanningError::Overflow {
                id: facility.id.clone(),
            })
    }

    /// Produces move recommendations, region by region.
    ///
    /// Regions are visited in the order they first appear among `overutilized`.
    /// A region without any under-utilized facility is skipped; moves never
    /// cross regions. Output is region-major, then source order, then
    /// receiver order.
    pub fn plan(
        &self,
        overutilized: &[FacilityRecord],
        underutilized: &[FacilityRecord],
    ) -> Result<Vec<Recommendation>, PlanningError> {
        let mut recommendations = Vec::new();

        let mut regions: Vec<&str> = Vec::new();
        for facility in overutilized {
            if !regions.contains(&facility.region.as_str()) {
                regions.push(facility.region.as_str());
            }
        }

        for region in regions {
            let sources: Vec<&FacilityRecord> = overutilized
                .iter()
                .filter(|f| f.region == region)
                .collect();
            let receivers: Vec<&FacilityRecord> = underutilized
                .iter()
                .filter(|f| f.region == region)
                .collect();

            if receivers.is_empty() {
                debug!(region, "No under-utilized facility in region, skipping");
                continue;
            }

            // Remaining headroom per receiver, only consulted in capacity-aware mode.
            let mut ledger: Vec<Option<i64>> = vec![None; receivers.len()];

            for source in sources {
                let excess = self.excess(source)?;
                if excess <= 0 {
                    continue;
                }
                let from_util = utilization_of(source)?;

                let mut remaining = excess;
                for (slot, receiver) in receivers.iter().enumerate() {
                    if remaining <= 0 {
                        break;
                    }

                    let fresh = self.headroom(receiver)?;
                    let available = match self.mode {
                        PlanningMode::Legacy => fresh,
                        PlanningMode::CapacityAware => *ledger[slot].get_or_insert(fresh),
                    };
                    if available <= 0 {
                        continue;
                    }

                    let pallets = remaining.min(available);
                    if self.mode == PlanningMode::CapacityAware {
                        ledger[slot] = Some(available - pallets);
                    }

                    debug!(
                        region,
                        from = %source.id,
                        to = %receiver.id,
                        pallets,
                        "Planned move"
                    );

                    recommendations.push(Recommendation {
                        region: region.to_string(),
                        from_facility: source.to_ref(),
                        to_facility: receiver.to_ref(),
                        pallets_to_move: pallets as u64,
                        from_current_util: from_util,
                        to_current_util: utilization_of(receiver)?,
                        manager_name: source.manager_name.clone(),
                        manager_email: source.manager_email.clone(),
                    });

                    remaining -= pallets;
                }
            }
        }

        Ok(recommendations)
    }
}

fn utilization_of(facility: &FacilityRecord) -> Result<f64, PlanningError> {
    facility
        .utilization()
        .ok_or_else(|| PlanningError::Unclassified {
            id: facility.id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::UtilizationClassifier;

    fn facility(id: &str, region: &str, capacity: i64, load: i64) -> FacilityRecord {
        FacilityRecord {
            id: id.to_string(),
            name: format!("{} Depot", id),
            region: region.to_string(),
            total_capacity: capacity,
            current_load: load,
            manager_name: format!("Manager {}", id),
            manager_email: format!("{}@example.com", id.to_lowercase()),
            utilization_percentage: None,
        }
    }

    fn plan(
        records: &[FacilityRecord],
        threshold: f64,
        mode: PlanningMode,
    ) -> Vec<Recommendation> {
        let classification = UtilizationClassifier::new(threshold)
            .unwrap()
            .classify(records)
            .unwrap();
        ReallocationPlanner::new(threshold, mode)
            .unwrap()
            .plan(&classification.overutilized, &classification.underutilized)
            .unwrap()
    }

    #[test]
    fn test_single_move_within_region() {
        let recs = plan(
            &[facility("A", "X", 100, 95), facility("B", "X", 100, 50)],
            85.0,
            PlanningMode::Legacy,
        );

        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.from_facility.id, "A");
        assert_eq!(rec.to_facility.id, "B");
        assert_eq!(rec.pallets_to_move, 10);
        assert_eq!(rec.from_current_util, 95.0);
        assert_eq!(rec.to_current_util, 50.0);
        assert_eq!(rec.manager_name, "Manager A");
        assert_eq!(rec.manager_email, "a@example.com");
    }

    #[test]
    fn test_no_cross_region_moves() {
        let recs = plan(
            &[
                facility("A", "X", 100, 99),
                facility("B", "Y", 1000, 10),
                facility("C", "Y", 1000, 20),
            ],
            85.0,
            PlanningMode::Legacy,
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_excess_spills_over_receivers_in_order() {
        // A: target 85, excess 15. B has 5 headroom, C sits on the threshold, D has 45.
        let recs = plan(
            &[
                facility("A", "X", 100, 100),
                facility("B", "X", 100, 80),
                facility("C", "X", 100, 85),
                facility("D", "X", 100, 40),
            ],
            85.0,
            PlanningMode::Legacy,
        );

        let moves: Vec<(&str, u64)> = recs
            .iter()
            .map(|r| (r.to_facility.id.as_str(), r.pallets_to_move))
            .collect();
        assert_eq!(moves, vec![("B", 5), ("D", 10)]);
    }

    #[test]
    fn test_receiver_without_headroom_does_not_stop_scan() {
        // Threshold 50: B sits just under 50% but floor(99 * 0.5) = 49 leaves no room.
        let recs = plan(
            &[
                facility("A", "X", 100, 60),
                facility("B", "X", 99, 49),
                facility("C", "X", 100, 10),
            ],
            50.0,
            PlanningMode::Legacy,
        );

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].to_facility.id, "C");
        assert_eq!(recs[0].pallets_to_move, 10);
    }

    #[test]
    fn test_source_without_positive_excess_is_skipped() {
        // Supplied 85.5% puts A over the threshold, yet its load already equals
        // floor(200 * 0.854) = 170.
        let mut over = facility("A", "X", 200, 170);
        over.utilization_percentage = Some(85.5);
        let recs = plan(
            &[over, facility("B", "X", 100, 10)],
            85.4,
            PlanningMode::Legacy,
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_moves_are_capped_by_regional_headroom() {
        // Excess 40, receivers offer 5 + 10.
        let recs = plan(
            &[
                facility("A", "X", 100, 125),
                facility("B", "X", 100, 80),
                facility("C", "X", 100, 75),
            ],
            85.0,
            PlanningMode::Legacy,
        );
        let total: u64 = recs.iter().map(|r| r.pallets_to_move).sum();
        assert_eq!(total, 15);
    }

    fn oversubscribed_region() -> Vec<FacilityRecord> {
        // A1 and A2 each carry 8 pallets of excess; B has 10 pallets of headroom.
        vec![
            facility("A1", "X", 100, 93),
            facility("A2", "X", 100, 93),
            facility("B", "X", 100, 75),
        ]
    }

    #[test]
    fn test_legacy_mode_oversubscribes_receiver() {
        let recs = plan(&oversubscribed_region(), 85.0, PlanningMode::Legacy);

        let moves: Vec<(&str, &str, u64)> = recs
            .iter()
            .map(|r| {
                (
                    r.from_facility.id.as_str(),
                    r.to_facility.id.as_str(),
                    r.pallets_to_move,
                )
            })
            .collect();
        assert_eq!(moves, vec![("A1", "B", 8), ("A2", "B", 8)]);
    }

    #[test]
    fn test_capacity_aware_mode_respects_receiver_headroom() {
        let recs = plan(&oversubscribed_region(), 85.0, PlanningMode::CapacityAware);

        let moves: Vec<(&str, &str, u64)> = recs
            .iter()
            .map(|r| {
                (
                    r.from_facility.id.as_str(),
                    r.to_facility.id.as_str(),
                    r.pallets_to_move,
                )
            })
            .collect();
        assert_eq!(moves, vec![("A1", "B", 8), ("A2", "B", 2)]);
    }

    #[test]
    fn test_output_is_region_major_in_first_seen_order() {
        let recs = plan(
            &[
                facility("Y1", "Y", 100, 95),
                facility("X1", "X", 100, 95),
                facility("X2", "X", 100, 10),
                facility("Y2", "Y", 100, 10),
            ],
            85.0,
            PlanningMode::Legacy,
        );

        let regions: Vec<&str> = recs.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["Y", "X"]);
    }

    #[test]
    fn test_unclassified_receiver_is_planning_error() {
        let planner = ReallocationPlanner::new(85.0, PlanningMode::Legacy).unwrap();
        let mut over = facility("A", "X", 100, 95);
        over.utilization_percentage = Some(95.0);
        let broken = facility("B", "X", 0, 0);

        // Zero capacity yields a target of 0, so no headroom and no move.
        assert!(planner.plan(&[over.clone()], &[broken]).unwrap().is_empty());

        let mut receiver = facility("C", "X", 100, 10);
        receiver.total_capacity = 0;
        receiver.current_load = -50;
        assert!(matches!(
            planner.plan(&[over], &[receiver]),
            Err(PlanningError::Unclassified { .. })
        ));
    }
}
