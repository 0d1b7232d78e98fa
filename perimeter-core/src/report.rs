// Per-target report model and report rendering

use crate::audit::ToolOutput;
use crate::rules::{HeaderFinding, RiskClass};
use crate::tls::TlsDetails;
use crate::triage::TriageSummary;
use chrono::{DateTime, Utc};
use perimeter_scanner::SiteMap;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const BANNER: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";
const RULE: &str =
    "────────────────────────────────────────────────────────────────────────────────\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Result slot of one sub-probe: a payload or the reason it failed, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome<T> {
    Completed(T),
    Failed { reason: String },
}

impl<T> ProbeOutcome<T> {
    pub fn failed(reason: impl Into<String>) -> Self {
        ProbeOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => ProbeOutcome::Completed(value),
            Err(e) => ProbeOutcome::failed(e.to_string()),
        }
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            ProbeOutcome::Completed(value) => Some(value),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Completed(_) => None,
            ProbeOutcome::Failed { reason } => Some(reason),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ProbeOutcome::Completed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineObservation {
    pub final_url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body_snippet: String,
}

/// Everything learned about a target whose baseline fetch succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub baseline: BaselineObservation,
    pub findings: Vec<HeaderFinding>,
    pub score: u32,
    pub risk: RiskClass,
    pub suggestions: Vec<String>,
    pub tls: ProbeOutcome<TlsDetails>,
    pub transport_audit: ProbeOutcome<ToolOutput>,
    pub crawl: ProbeOutcome<SiteMap>,
    pub log_triage: ProbeOutcome<TriageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// The baseline fetch failed; nothing else was attempted.
    Unreachable { error: String },
    Assessed(Box<Assessment>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    pub target: String,
    pub scanned_at: DateTime<Utc>,
    pub outcome: TargetOutcome,
}

impl TargetReport {
    pub fn unreachable(target: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            scanned_at: Utc::now(),
            outcome: TargetOutcome::Unreachable {
                error: error.into(),
            },
        }
    }

    pub fn assessed(target: impl Into<String>, assessment: Assessment) -> Self {
        Self {
            target: target.into(),
            scanned_at: Utc::now(),
            outcome: TargetOutcome::Assessed(Box::new(assessment)),
        }
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.outcome {
            TargetOutcome::Assessed(assessment) => Some(assessment),
            TargetOutcome::Unreachable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            TargetOutcome::Unreachable { error } => Some(error),
            TargetOutcome::Assessed(_) => None,
        }
    }
}

/// First `max_chars` characters of `body`, never splitting a character.
pub fn body_snippet(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

pub fn render_text_summary(reports: &[TargetReport]) -> String {
    let mut report = String::new();

    report.push_str(BANNER);
    report.push_str("                      PERIMETER EXPOSURE ASSESSMENT\n");
    report.push_str(BANNER);
    report.push('\n');
    report.push_str(&format!("Targets:      {}\n", reports.len()));
    let unreachable = reports.iter().filter(|r| r.error().is_some()).count();
    if unreachable > 0 {
        report.push_str(&format!("Unreachable:  {}\n", unreachable));
    }
    report.push('\n');

    for target_report in reports {
        report.push_str(BANNER);
        report.push_str(&format!("{}\n", target_report.target));
        report.push_str(BANNER);
        report.push_str(&format!(
            "Scanned:      {}\n",
            target_report.scanned_at.to_rfc3339()
        ));

        match &target_report.outcome {
            TargetOutcome::Unreachable { error } => {
                report.push_str(&format!("Error:        {}\n\n", error));
            }
            TargetOutcome::Assessed(assessment) => {
                push_assessment(&mut report, assessment);
            }
        }
    }

    report.push_str(BANNER);
    report.push_str("Generated by Perimeter - passive web exposure assessment\n");
    report.push_str("For authorized security testing only.\n\n");

    report
}

fn push_assessment(report: &mut String, assessment: &Assessment) {
    report.push_str(&format!("HTTP Status:  {}\n", assessment.baseline.status));
    report.push_str(&format!(
        "Risk:         {} (score {})\n\n",
        assessment.risk, assessment.score
    ));

    if !assessment.findings.is_empty() {
        report.push_str("Findings:\n");
        for finding in &assessment.findings {
            report.push_str(&format!(
                "  [{}] {} - {}\n",
                finding.severity, finding.rule, finding.detail
            ));
        }
        report.push('\n');
    }

    if !assessment.suggestions.is_empty() {
        report.push_str("Suggestions:\n");
        for suggestion in &assessment.suggestions {
            report.push_str(&format!("  - {}\n", suggestion));
        }
        report.push('\n');
    }

    match &assessment.tls {
        ProbeOutcome::Completed(tls) => {
            let cipher = tls
                .cipher
                .as_ref()
                .map(|c| format!("{} ({} bits)", c.name, c.bits))
                .unwrap_or_else(|| "unknown cipher".to_string());
            report.push_str(&format!("TLS:          {} / {}\n", tls.protocol, cipher));
            if let Some(cert) = &tls.certificate {
                report.push_str(&format!("Certificate:  {}\n", cert.subject));
                report.push_str(&format!("Valid until:  {}\n", cert.not_after));
            }
        }
        ProbeOutcome::Failed { reason } => {
            report.push_str(&format!("TLS:          error: {}\n", reason));
        }
    }

    match &assessment.transport_audit {
        ProbeOutcome::Completed(output) => {
            let code = output
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            report.push_str(&format!("Audit tool:   exit {}\n", code));
        }
        ProbeOutcome::Failed { reason } => {
            report.push_str(&format!("Audit tool:   error: {}\n", reason));
        }
    }

    match &assessment.crawl {
        ProbeOutcome::Completed(sitemap) => {
            report.push_str(&format!(
                "Crawl:        {} visited, {} pages, {} forms, {} endpoints, {} rendered\n",
                sitemap.visited_count(),
                sitemap.pages.len(),
                sitemap.forms.len(),
                sitemap.api_endpoints.len(),
                sitemap.rendered_pages
            ));
            let assets = &sitemap.static_assets;
            if !assets.is_empty() {
                report.push_str(&format!(
                    "Assets:       {} ({} scripts, {} stylesheets, {} images)\n",
                    assets.len(),
                    assets.scripts.len(),
                    assets.stylesheets.len(),
                    assets.images.len()
                ));
            }
            if let Some(render_error) = &sitemap.render_error {
                report.push_str(&format!("Render:       disabled ({})\n", render_error));
            }
        }
        ProbeOutcome::Failed { reason } => {
            report.push_str(&format!("Crawl:        error: {}\n", reason));
        }
    }

    match &assessment.log_triage {
        ProbeOutcome::Completed(triage) => {
            report.push_str(&format!("Log triage:   {}\n", triage.status.as_str()));
            for finding in &triage.findings {
                report.push_str(&format!(
                    "  [{}] {}: {}\n",
                    finding.severity, finding.category, finding.summary
                ));
            }
        }
        ProbeOutcome::Failed { reason } => {
            report.push_str(&format!("Log triage:   error: {}\n", reason));
        }
    }

    report.push('\n');
    report.push_str(RULE);
    report.push('\n');
}

pub fn generate_json_report(reports: &[TargetReport]) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "metadata": {
            "generator": "Perimeter",
            "version": env!("CARGO_PKG_VERSION"),
            "generated_at": Utc::now().to_rfc3339(),
            "disclaimer": "For authorized security testing only"
        },
        "targets": reports,
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
