use serde::{Deserialize, Serialize};

/// Steps of a run, in execution order. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Monitor,
    Detect,
    Analyze,
    GenerateNotifications,
    DispatchNotifications,
    Done,
}

impl Stage {
    /// The five working stages, excluding `Done`.
    pub const SEQUENCE: [Stage; 5] = [
        Stage::Monitor,
        Stage::Detect,
        Stage::Analyze,
        Stage::GenerateNotifications,
        Stage::DispatchNotifications,
    ];

    pub fn next(self) -> Stage {
        match self {
            Stage::Monitor => Stage::Detect,
            Stage::Detect => Stage::Analyze,
            Stage::Analyze => Stage::GenerateNotifications,
            Stage::GenerateNotifications => Stage::DispatchNotifications,
            Stage::DispatchNotifications | Stage::Done => Stage::Done,
        }
    }

    /// Noun used in status strings, e.g. "Error in monitoring".
    pub fn activity(self) -> &'static str {
        match self {
            Stage::Monitor => "monitoring",
            Stage::Detect => "detection",
            Stage::Analyze => "analysis",
            Stage::GenerateNotifications => "notification generation",
            Stage::DispatchNotifications => "notification dispatch",
            Stage::Done => "completion",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Monitor => "monitor",
            Stage::Detect => "detect",
            Stage::Analyze => "analyze",
            Stage::GenerateNotifications => "generate_notifications",
            Stage::DispatchNotifications => "dispatch_notifications",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}
