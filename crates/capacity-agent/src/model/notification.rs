use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rendered notification for one region, addressed to a single manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub region: String,
    pub manager_name: String,
    pub manager_email: String,
    pub subject: String,
    pub rendered_content: String,
    pub recommendation_count: usize,
}

/// Outcome of one delivery attempt. Exactly one exists per payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub region: String,
    pub manager_name: String,
    pub manager_email: String,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn delivered(payload: &NotificationPayload) -> Self {
        Self {
            region: payload.region.clone(),
            manager_name: payload.manager_name.clone(),
            manager_email: payload.manager_email.clone(),
            success: true,
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn failed(payload: &NotificationPayload, error: impl Into<String>) -> Self {
        Self {
            region: payload.region.clone(),
            manager_name: payload.manager_name.clone(),
            manager_email: payload.manager_email.clone(),
            success: false,
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }
}
