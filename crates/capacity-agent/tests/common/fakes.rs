//! Scripted collaborators for driving failure paths.

#![allow(dead_code)]

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use capacity_agent::error::{DataError, DispatchError, InsightError, RenderError};
use capacity_agent::insight::TextInsightGenerator;
use capacity_agent::model::{FacilityRecord, Recommendation};
use capacity_agent::notify::{NotificationDispatcher, NotificationRenderer};
use capacity_agent::source::DataSource;

/// Source that always fails to load.
pub struct BrokenSource;

impl DataSource for BrokenSource {
    fn load(&self) -> Result<Vec<FacilityRecord>, DataError> {
        Err(DataError::Read {
            path: "/data/missing.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }

    fn describe(&self) -> String {
        "broken".to_string()
    }
}

/// Source that answers only after `delay`.
pub struct SlowSource {
    pub delay: Duration,
    pub facilities: Vec<FacilityRecord>,
}

impl DataSource for SlowSource {
    fn load(&self) -> Result<Vec<FacilityRecord>, DataError> {
        thread::sleep(self.delay);
        Ok(self.facilities.clone())
    }

    fn describe(&self) -> String {
        "slow".to_string()
    }
}

/// Insight generator that never answers within a short budget.
pub struct StalledInsight(pub Duration);

impl TextInsightGenerator for StalledInsight {
    fn summarize(&self, _sample: &[Recommendation]) -> Result<String, InsightError> {
        thread::sleep(self.0);
        Ok("late".to_string())
    }
}

/// Captures the sample it was given.
#[derive(Default)]
pub struct RecordingInsight {
    pub samples: Mutex<Vec<usize>>,
}

impl TextInsightGenerator for RecordingInsight {
    fn summarize(&self, sample: &[Recommendation]) -> Result<String, InsightError> {
        self.samples.lock().unwrap().push(sample.len());
        Ok(format!("{} moves sampled", sample.len()))
    }
}

/// Renderer that fails for one region and echoes the rest.
pub struct FailingRegionRenderer {
    pub region: String,
}

impl NotificationRenderer for FailingRegionRenderer {
    fn render(
        &self,
        region: &str,
        facilities: &[FacilityRecord],
        recommendations: &[Recommendation],
        manager_name: &str,
    ) -> Result<String, RenderError> {
        if region == self.region {
            return Err(RenderError::Template {
                region: region.to_string(),
                reason: "template missing".to_string(),
            });
        }
        Ok(format!(
            "{}: {} facilities, {} moves for {}",
            region,
            facilities.len(),
            recommendations.len(),
            manager_name
        ))
    }
}

/// One scripted answer per delivery attempt.
pub enum Reply {
    Deliver,
    Decline,
    Fail,
    Stall(Duration),
}

/// Dispatcher that answers each call with the next scripted reply and
/// records every recipient it was asked to reach.
pub struct ScriptedDispatcher {
    replies: Mutex<Vec<Reply>>,
    pub recipients: Mutex<Vec<String>>,
}

impl ScriptedDispatcher {
    pub fn new(mut replies: Vec<Reply>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            recipients: Mutex::new(Vec::new()),
        }
    }

    pub fn recipients(&self) -> Vec<String> {
        self.recipients.lock().unwrap().clone()
    }
}

impl NotificationDispatcher for ScriptedDispatcher {
    fn send(&self, recipient: &str, _subject: &str, _content: &str) -> Result<bool, DispatchError> {
        self.recipients.lock().unwrap().push(recipient.to_string());
        let reply = self.replies.lock().unwrap().pop().unwrap_or(Reply::Deliver);
        match reply {
            Reply::Deliver => Ok(true),
            Reply::Decline => Ok(false),
            Reply::Fail => Err(DispatchError::Network("connection reset by peer".to_string())),
            Reply::Stall(delay) => {
                thread::sleep(delay);
                Ok(true)
            }
        }
    }
}
