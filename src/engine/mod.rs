//! The progression engine service boundary.

pub mod service;
pub mod snapshot;

pub use service::{CompletionSummary, DailyCheckSummary, EngineError, ProgressionEngine};
pub use snapshot::EngineSnapshot;
