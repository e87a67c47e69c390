//! Shared test utilities for capacity-agent integration tests.
//!
//! - Builders for facility records and configurations
//! - Scripted collaborators (sources, renderers, dispatchers) that fail or
//!   stall on demand

pub mod builders;
pub mod fakes;

pub use builders::*;
pub use fakes::*;
