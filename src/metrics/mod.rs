//! Per-host aggregation of result records.
mod histogram;
mod summary;


pub use histogram::LatencyHistogram;
pub use summary::{HostSummary, LatencyStats};
