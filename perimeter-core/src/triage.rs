//! Log-based attack-signal triage.
//!
//! Threshold counting over access-log lines. Stateless: the same bytes always
//! produce the same summary, whichever target they are triaged for.

use crate::rules::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const PROBING_KEYWORDS: [&str; 10] = [
    "wp-admin",
    "phpmyadmin",
    "config.php",
    "backup",
    "secret",
    "private",
    "internal",
    "uploads",
    "files",
    "download",
];

const INJECTION_PATTERNS: [&str; 5] = ["union select", "or 1=1", "drop table", "exec(", "script>"];

const NOT_FOUND_HIGH: usize = 30;
const NOT_FOUND_LOW: usize = 5;
const PROBE_HITS_CEILING: usize = 20;
const SERVER_ERROR_THRESHOLD: usize = 5;
const TOTAL_REQUEST_THRESHOLD: usize = 1000;
const PER_CLIENT_THRESHOLD: usize = 100;
const PER_CLIENT_HIGH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageStatus {
    NoData,
    AnalyzedClean,
    ThreatsDetected,
}

impl TriageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageStatus::NoData => "no_data",
            TriageStatus::AnalyzedClean => "analyzed_clean",
            TriageStatus::ThreatsDetected => "threats_detected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatFinding {
    pub category: String,
    pub severity: Severity,
    pub summary: String,
    pub indicators: Vec<String>,
}

impl ThreatFinding {
    fn new<I, S>(category: &str, severity: Severity, summary: String, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.to_string(),
            severity,
            summary,
            indicators: indicators.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSummary {
    pub status: TriageStatus,
    pub findings: Vec<ThreatFinding>,
    pub notes: Vec<String>,
}

impl TriageSummary {
    pub fn no_data() -> Self {
        Self {
            status: TriageStatus::NoData,
            findings: Vec::new(),
            notes: vec![
                "No traffic log or IDS alerts were supplied for this target.".to_string(),
                "Provide access logs, WAF/IDS exports or NetFlow data to enable triage."
                    .to_string(),
            ],
        }
    }
}

fn has_status_token(line: &str, status: &str) -> bool {
    line.split_whitespace().any(|token| token == status)
}

pub fn triage_log(target: &str, log_bytes: Option<&[u8]>) -> TriageSummary {
    let Some(bytes) = log_bytes.filter(|b| !b.is_empty()) else {
        return TriageSummary::no_data();
    };

    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let mut findings = Vec::new();

    let not_found = lines.iter().filter(|l| has_status_token(l, "404")).count();
    if not_found > NOT_FOUND_HIGH {
        findings.push(ThreatFinding::new(
            "Path Scanning",
            Severity::Medium,
            format!("{} HTTP 404 responses - likely directory scanning", not_found),
            ["HTTP 404", "Directory scanning"],
        ));
    } else if not_found >= NOT_FOUND_LOW {
        findings.push(ThreatFinding::new(
            "Path Scanning",
            Severity::Low,
            format!("{} unusual HTTP 404 responses - keep monitoring", not_found),
            ["HTTP 404"],
        ));
    }

    let probe_hits = lines
        .iter()
        .filter(|line| PROBING_KEYWORDS.iter().any(|k| line.contains(k)))
        .count();
    if probe_hits > 0 && probe_hits < PROBE_HITS_CEILING {
        findings.push(ThreatFinding::new(
            "Reconnaissance",
            Severity::Low,
            format!("{} requests touched sensitive resources", probe_hits),
            PROBING_KEYWORDS,
        ));
    }

    let server_errors = lines.iter().filter(|l| has_status_token(l, "500")).count();
    if server_errors > SERVER_ERROR_THRESHOLD {
        findings.push(ThreatFinding::new(
            "Application Error",
            Severity::High,
            format!("{} HTTP 500 responses - possible exploitation attempts", server_errors),
            ["HTTP 500", "Server errors"],
        ));
    }

    let lowered = text.to_lowercase();
    let injection_hits: usize = INJECTION_PATTERNS
        .iter()
        .map(|pattern| lowered.matches(pattern).count())
        .sum();
    if injection_hits > 0 {
        findings.push(ThreatFinding::new(
            "SQL Injection",
            Severity::High,
            format!("{} injection patterns found in the log", injection_hits),
            INJECTION_PATTERNS,
        ));
    }

    if lines.len() > TOTAL_REQUEST_THRESHOLD {
        findings.push(ThreatFinding::new(
            "DDoS Suspicion",
            Severity::High,
            format!("{} requests in total - above the normal threshold", lines.len()),
            [format!("Total requests: {}", lines.len())],
        ));
    }

    let mut per_client: HashMap<&str, usize> = HashMap::new();
    for line in &lines {
        if let Some(client) = line.split_whitespace().next() {
            *per_client.entry(client).or_insert(0) += 1;
        }
    }
    let mut heavy_clients: Vec<(&str, usize)> = per_client
        .into_iter()
        .filter(|(_, count)| *count > PER_CLIENT_THRESHOLD)
        .collect();
    heavy_clients.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (client, count) in heavy_clients {
        let severity = if count >= PER_CLIENT_HIGH {
            Severity::High
        } else {
            Severity::Medium
        };
        findings.push(ThreatFinding::new(
            "Rate Limiting",
            severity,
            format!("{} sent {} requests - possible flood", client, count),
            [format!("IP: {}", client), format!("Requests: {}", count)],
        ));
    }

    if findings.is_empty() {
        TriageSummary {
            status: TriageStatus::AnalyzedClean,
            findings,
            notes: vec![format!(
                "Analyzed {} log lines ({} bytes) for {}; no suspicious activity found.",
                lines.len(),
                bytes.len(),
                target
            )],
        }
    } else {
        TriageSummary {
            status: TriageStatus::ThreatsDetected,
            findings,
            notes: Vec::new(),
        }
    }
}
