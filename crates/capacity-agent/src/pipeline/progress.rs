use crossbeam_channel::{unbounded, Receiver, Sender};

use super::stage::Stage;
use super::state::StageOutcome;

/// Events emitted by the orchestrator as it moves through the stages.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    StageStarted {
        stage: Stage,
    },
    StageFinished {
        stage: Stage,
        outcome: StageOutcome,
        status: String,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Forwards events to a channel, e.g. for a UI thread.
pub struct ChannelProgress {
    sender: Sender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new() -> (Self, Receiver<ProgressEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl ProgressReporter for ChannelProgress {
    fn report(&self, event: ProgressEvent) {
        // Nobody listening once the receiver is dropped.
        let _ = self.sender.send(event);
    }
}
