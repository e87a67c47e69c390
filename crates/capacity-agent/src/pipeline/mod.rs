pub mod config;
pub mod error;
pub mod progress;
pub mod runner;
pub mod stage;
pub mod state;
pub mod timeout;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use progress::{ChannelProgress, NoopProgress, ProgressEvent, ProgressReporter};
pub use runner::{run, run_path, Pipeline};
pub use stage::Stage;
pub use state::{PipelineState, StageError, StageOutcome, StageReport};
pub use timeout::call_with_timeout;
