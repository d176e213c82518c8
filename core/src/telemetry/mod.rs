pub mod log;
pub mod metrics;

pub use log::LogManager;
pub use metrics::{CalculationCounts, MetricsRecorder};
