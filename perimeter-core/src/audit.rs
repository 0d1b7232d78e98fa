// External transport-audit tool probe (sslyze by default)

use crate::error::ProbeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;
use url::Url;

pub const NO_OUTPUT_MESSAGE: &str = "audit tool completed without output";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// `host:port` for the audit tool. Without an explicit port, `http` targets
/// map to 80 and everything else to 443.
pub fn extract_hostport(url: &str) -> Result<String, ProbeError> {
    let parsed = Url::parse(url).map_err(|e| ProbeError::InvalidTarget(format!("{url}: {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ProbeError::InvalidTarget(format!("{url}: no hostname")))?;
    let port = parsed
        .port()
        .unwrap_or(if parsed.scheme() == "http" { 80 } else { 443 });
    Ok(format!("{}:{}", host, port))
}

#[async_trait]
pub trait TransportAuditTool: Send + Sync {
    async fn run(&self, hostport: &str, timeout: Duration) -> Result<ToolOutput, ProbeError>;
}

/// Runs `<program> [args..] <hostport>` and captures its output.
#[derive(Debug, Clone)]
pub struct CommandAuditTool {
    program: String,
    args: Vec<String>,
}

impl CommandAuditTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for CommandAuditTool {
    fn default() -> Self {
        Self::new("sslyze")
    }
}

#[async_trait]
impl TransportAuditTool for CommandAuditTool {
    async fn run(&self, hostport: &str, timeout: Duration) -> Result<ToolOutput, ProbeError> {
        debug!("Running {} against {}", self.program, hostport);

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(hostport)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProbeError::ToolLaunch {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::Timeout(timeout))??;

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if stdout.trim().is_empty() && stderr.trim().is_empty() {
            stdout = NO_OUTPUT_MESSAGE.to_string();
        }

        Ok(ToolOutput {
            stdout,
            stderr,
            exit_code: output.status.code(),
        })
    }
}

/// Stand-in used when no audit program is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAuditTool;

#[async_trait]
impl TransportAuditTool for DisabledAuditTool {
    async fn run(&self, _hostport: &str, _timeout: Duration) -> Result<ToolOutput, ProbeError> {
        Err(ProbeError::ToolDisabled)
    }
}
