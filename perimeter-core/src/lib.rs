pub mod audit;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod rules;
pub mod targets;
pub mod tls;
pub mod triage;

pub use config::ScanConfig;
pub use error::{ProbeError, SetupError};
pub use orchestrator::Orchestrator;
pub use report::{ProbeOutcome, TargetOutcome, TargetReport};
