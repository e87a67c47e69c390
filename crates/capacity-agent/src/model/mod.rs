//! Data model shared by the analysis, notification and pipeline modules.

pub mod facility;
pub mod notification;
pub mod recommendation;
pub mod region;

pub use facility::{utilization_percentage, FacilityRecord, FacilityRef};
pub use notification::{DispatchResult, NotificationPayload};
pub use recommendation::Recommendation;
pub use region::RegionGroups;
