use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use tracing::warn;

use crate::error::{ErrorKind, TimeoutError};

use super::error::PipelineError;

/// Runs an external call on its own thread and waits at most `budget`.
///
/// On expiry the worker thread is left to finish in the background and its
/// result is discarded. The call is not cancelled, so its side effects (a
/// delivery, a file write) may still happen after the timeout is reported. `kind` classifies failures of the worker itself.
pub fn call_with_timeout<T, E, F>(
    operation: &str,
    kind: ErrorKind,
    budget: Duration,
    call: F,
) -> Result<T, PipelineError>
where
    T: Send + 'static,
    E: Into<PipelineError> + Send + 'static,
    F: FnOnce() -> Result<T, E> + Send + 'static,
{
    let (sender, receiver) = bounded(1);

    let handle = thread::Builder::new()
        .name(format!("external-{}", operation))
        .spawn(move || {
            // The receiver may be gone after a timeout; nothing to do then.
            let _ = sender.send(call());
        })
        .map_err(|e| PipelineError::Collaborator {
            operation: operation.to_string(),
            kind,
            message: format!("failed to spawn worker: {}", e),
        })?;

    match receiver.recv_timeout(budget) {
        Ok(result) => {
            let _ = handle.join();
            result.map_err(Into::into)
        }
        Err(RecvTimeoutError::Timeout) => {
            warn!(operation, ?budget, "External call timed out");
            Err(TimeoutError {
                operation: operation.to_string(),
                after: budget,
            }
            .into())
        }
        Err(RecvTimeoutError::Disconnected) => Err(PipelineError::Collaborator {
            operation: operation.to_string(),
            kind,
            message: "worker panicked before answering".to_string(),
        }),
    }
}
