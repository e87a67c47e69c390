use thiserror::Error;

use crate::analysis::ClassifyError;
use crate::error::{
    ClassificationError, DataError, DispatchError, ErrorKind, InsightError, PlanningError,
    RenderError, TimeoutError,
};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Planning error: {0}")]
    Planning(#[from] PlanningError),

    #[error("Insight error: {0}")]
    Insight(#[from] InsightError),

    #[error("Rendering error: {0}")]
    Rendering(#[from] RenderError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Timeout: {0}")]
    Timeout(#[from] TimeoutError),

    /// The worker running an external call could not be started or died.
    #[error("{operation} failed: {message}")]
    Collaborator {
        operation: String,
        kind: ErrorKind,
        message: String,
    },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Data(_) => ErrorKind::Data,
            PipelineError::Classification(_) => ErrorKind::Classification,
            PipelineError::Planning(_) => ErrorKind::Planning,
            PipelineError::Insight(_) => ErrorKind::Insight,
            PipelineError::Rendering(_) => ErrorKind::Rendering,
            PipelineError::Dispatch(_) => ErrorKind::Dispatch,
            PipelineError::Timeout(_) => ErrorKind::Timeout,
            PipelineError::Collaborator { kind, .. } => *kind,
        }
    }
}

impl From<ClassifyError> for PipelineError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::Data(e) => PipelineError::Data(e),
            ClassifyError::Classification(e) => PipelineError::Classification(e),
        }
    }
}
