use crate::config::ConfigError;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single sub-probe. Always captured into the probe's slot of a
/// report, never propagated across targets.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Connection failed: {0}")]
    Connect(#[from] std::io::Error),

    #[error("TLS handshake failed: {0}")]
    Handshake(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] openssl::error::ErrorStack),

    #[error("Unparseable peer certificate: {0}")]
    Certificate(String),

    #[error("Could not launch {program}: {reason}")]
    ToolLaunch { program: String, reason: String },

    #[error("Transport audit tool disabled")]
    ToolDisabled,

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Probe task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Probe pool closed")]
    PoolClosed,
}

/// Failure to construct an orchestrator.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not build HTTP client: {0}")]
    Http(#[from] perimeter_scanner::ScanError),
}
