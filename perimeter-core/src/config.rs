//! Scan configuration.
//!
//! Passed explicitly into the [`crate::Orchestrator`]; each orchestrator owns
//! its own concurrency pools, so independent instances never contend.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be at least 1")]
    ZeroValue(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Concurrent TLS detail probes across all targets.
    pub tls_concurrency: usize,
    /// Concurrent external audit tool processes across all targets.
    pub tool_concurrency: usize,
    /// Concurrent crawls across all targets.
    pub crawl_concurrency: usize,
    pub max_pages: usize,
    pub max_depth: usize,
    pub fetch_timeout_secs: u64,
    pub crawl_fetch_timeout_secs: u64,
    pub tls_timeout_secs: u64,
    pub tool_timeout_secs: u64,
    pub render_enabled: bool,
    pub body_snippet_chars: usize,
    pub user_agent: String,
    /// External transport audit program; `None` disables the tool probe.
    pub audit_tool: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tls_concurrency: 8,
            tool_concurrency: 3,
            crawl_concurrency: 4,
            max_pages: 30,
            max_depth: 2,
            fetch_timeout_secs: 10,
            crawl_fetch_timeout_secs: 8,
            tls_timeout_secs: 10,
            tool_timeout_secs: 60,
            render_enabled: true,
            body_snippet_chars: 500,
            user_agent: format!("perimeter/{}", env!("CARGO_PKG_VERSION")),
            audit_tool: Some("sslyze".to_string()),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_zero = [
            ("tls_concurrency", self.tls_concurrency),
            ("tool_concurrency", self.tool_concurrency),
            ("crawl_concurrency", self.crawl_concurrency),
            ("max_pages", self.max_pages),
            ("fetch_timeout_secs", self.fetch_timeout_secs as usize),
            ("crawl_fetch_timeout_secs", self.crawl_fetch_timeout_secs as usize),
            ("tls_timeout_secs", self.tls_timeout_secs as usize),
            ("tool_timeout_secs", self.tool_timeout_secs as usize),
        ];
        for (name, value) in non_zero {
            if value == 0 {
                return Err(ConfigError::ZeroValue(name));
            }
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn crawl_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.crawl_fetch_timeout_secs)
    }

    /// Upper bound on a whole crawl: every page budgeted one fetch and one
    /// render, each capped at the crawl fetch timeout.
    pub fn crawl_timeout(&self) -> Duration {
        let calls = u32::try_from(self.max_pages.saturating_mul(2)).unwrap_or(u32::MAX);
        self.crawl_fetch_timeout().saturating_mul(calls)
    }

    pub fn tls_timeout(&self) -> Duration {
        Duration::from_secs(self.tls_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}
