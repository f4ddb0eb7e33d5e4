//! Workload drivers for exercising `tsmap` from many threads.

pub mod config;
pub mod workload;

pub use config::StressConfig;
pub use workload::{run_cycles, run_stress, DashMapAdapter, StressReport};
