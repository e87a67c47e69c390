use serde::{Deserialize, Serialize};

use super::facility::FacilityRef;

/// A proposed pallet transfer between two facilities of the same region.
///
/// Manager fields are attributed from the source (`from`) facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub region: String,
    pub from_facility: FacilityRef,
    pub to_facility: FacilityRef,
    pub pallets_to_move: u64,
    pub from_current_util: f64,
    pub to_current_util: f64,
    pub manager_name: String,
    pub manager_email: String,
}
