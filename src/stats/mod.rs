//! Per-frame statistics written by benchmark runs.

pub mod errors;
pub mod metrics;
pub mod summary;

pub use errors::StatsError;
pub use metrics::{PerformanceMetrics, load_metrics, parse_metrics};
pub use summary::{GpuTimeStats, Summary, WindowStats};
