use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse error taxonomy recorded on a run when a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Data,
    Classification,
    Planning,
    Insight,
    Rendering,
    Dispatch,
    Timeout,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Data => "DataError",
            ErrorKind::Classification => "ClassificationError",
            ErrorKind::Planning => "PlanningError",
            ErrorKind::Insight => "InsightError",
            ErrorKind::Rendering => "RenderingError",
            ErrorKind::Dispatch => "DispatchError",
            ErrorKind::Timeout => "TimeoutError",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Record {record}: required field '{field}' is missing or empty")]
    MissingField { record: String, field: &'static str },

    #[error("Facility '{id}': total capacity must be positive, got {capacity}")]
    NonPositiveCapacity { id: String, capacity: i64 },

    #[error("Facility '{id}': current load must be non-negative, got {load}")]
    NegativeLoad { id: String, load: i64 },

    #[error("Duplicate facility id '{0}'")]
    DuplicateId(String),

    #[error("Failed to read facility data '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported facility data format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("Utilization threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),

    #[error("Facility '{id}': supplied utilization {value} is not a finite number")]
    InvalidUtilization { id: String, value: f64 },
}

#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("Utilization threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),

    #[error("Facility '{id}' has no utilization; it was not classified")]
    Unclassified { id: String },

    #[error("Pallet arithmetic overflowed for facility '{id}'")]
    Overflow { id: String },
}

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Insight generation failed: {0}")]
    Generation(String),

    #[error("Insight generator returned an empty summary")]
    Empty,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render notification for region '{region}': {reason}")]
    Template { region: String, reason: String },
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network failure: {0}")]
    Network(String),

    #[error("Recipient '{recipient}' rejected: {reason}")]
    Rejected { recipient: String, reason: String },

    #[error("Failed to write outbox message '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An external call that did not answer within its budget.
#[derive(Error, Debug)]
#[error("{operation} timed out after {after:?}")]
pub struct TimeoutError {
    pub operation: String,
    pub after: Duration,
}

pub type Result<T> = std::result::Result<T, AgentError>;
