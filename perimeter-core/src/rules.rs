// Passive header-hygiene rules, scoring and risk classification

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }

    pub fn weight(&self) -> u32 {
        match self {
            Severity::High => 10,
            Severity::Medium => 5,
            Severity::Low => 1,
            Severity::Info => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall risk bucket; shares the severity scale.
pub type RiskClass = Severity;

pub const HSTS_MISSING: &str = "HSTS_MISSING";
pub const HSTS_PRESENT: &str = "HSTS_PRESENT";
pub const COOKIE_HTTPONLY_MISSING: &str = "COOKIE_HTTPONLY_MISSING";
pub const COOKIE_SECURE_MISSING: &str = "COOKIE_SECURE_MISSING";
pub const COOKIE_SAMESITE_MISSING: &str = "COOKIE_SAMESITE_MISSING";
pub const NO_SET_COOKIE: &str = "NO_SET_COOKIE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFinding {
    pub rule: String,
    pub severity: Severity,
    pub detail: String,
}

impl HeaderFinding {
    pub fn new(rule: &str, severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            severity,
            detail: detail.into(),
        }
    }
}

fn header_values<'a>(
    headers: &'a [(String, String)],
    name: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    headers
        .iter()
        .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

pub fn check_hsts(headers: &[(String, String)]) -> Vec<HeaderFinding> {
    match header_values(headers, "strict-transport-security")
        .find(|value| !value.trim().is_empty())
    {
        Some(value) => vec![HeaderFinding::new(HSTS_PRESENT, Severity::Info, value)],
        None => vec![HeaderFinding::new(
            HSTS_MISSING,
            Severity::High,
            "Strict-Transport-Security header missing.",
        )],
    }
}

fn cookie_has_attribute(cookie: &str, attribute: &str) -> bool {
    cookie
        .split(';')
        .skip(1)
        .map(|part| part.split('=').next().unwrap_or("").trim())
        .any(|name| name.eq_ignore_ascii_case(attribute))
}

pub fn check_cookies(headers: &[(String, String)]) -> Vec<HeaderFinding> {
    let cookies: Vec<&str> = header_values(headers, "set-cookie").collect();
    if cookies.is_empty() {
        return vec![HeaderFinding::new(
            NO_SET_COOKIE,
            Severity::Info,
            "No Set-Cookie header returned.",
        )];
    }

    let checks = [
        ("HttpOnly", COOKIE_HTTPONLY_MISSING, Severity::Medium),
        ("Secure", COOKIE_SECURE_MISSING, Severity::Medium),
        ("SameSite", COOKIE_SAMESITE_MISSING, Severity::Low),
    ];

    let mut findings = Vec::new();
    for (attribute, rule, severity) in checks {
        if let Some(cookie) = cookies
            .iter()
            .find(|cookie| !cookie_has_attribute(cookie, attribute))
        {
            findings.push(HeaderFinding::new(rule, severity, *cookie));
        }
    }
    findings
}

/// Runs every header rule, in a fixed order.
pub fn evaluate_header_hygiene(headers: &[(String, String)]) -> Vec<HeaderFinding> {
    let mut findings = Vec::new();
    findings.extend(check_hsts(headers));
    findings.extend(check_cookies(headers));
    findings
}

pub fn score_findings(findings: &[HeaderFinding]) -> u32 {
    findings.iter().map(|f| f.severity.weight()).sum()
}

pub fn classify_risk(score: u32) -> RiskClass {
    match score {
        15.. => Severity::High,
        6..=14 => Severity::Medium,
        1..=5 => Severity::Low,
        0 => Severity::Info,
    }
}

pub fn suggest(findings: &[HeaderFinding]) -> Vec<String> {
    findings
        .iter()
        .filter_map(|finding| match finding.rule.as_str() {
            HSTS_MISSING => Some("Enable Strict-Transport-Security to enforce HTTPS."),
            COOKIE_HTTPONLY_MISSING => Some("Add the HttpOnly attribute to sensitive cookies."),
            COOKIE_SECURE_MISSING => Some("Set the Secure flag on cookies served over HTTPS."),
            COOKIE_SAMESITE_MISSING => Some("Set SameSite on cookies to reduce CSRF exposure."),
            NO_SET_COOKIE => Some("No cookies set; confirm this is the intended behaviour."),
            _ => None,
        })
        .map(str::to_string)
        .collect()
}
