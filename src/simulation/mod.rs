//! Simulation module - headless engine runs for stability testing
//!
//! Runs seeded engines without rendering, collecting containment, overlap,
//! and settling metrics.

pub mod config;
pub mod metrics;
pub mod parallel;
pub mod runner;

pub use config::{SimConfig, SimMode};
pub use metrics::{RunMetrics, SimSummary};
pub use runner::{run_batch, run_once, run_simulation};
