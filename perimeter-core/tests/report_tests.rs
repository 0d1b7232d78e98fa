// Tests for report model and rendering

use perimeter_core::audit::ToolOutput;
use perimeter_core::report::{
    Assessment, BaselineObservation, ProbeOutcome, ReportFormat, TargetReport, body_snippet,
    generate_json_report, render_text_summary,
};
use perimeter_core::rules::{HSTS_MISSING, HeaderFinding, Severity};
use perimeter_core::triage::TriageSummary;
use perimeter_scanner::SiteMap;

fn sample_assessment() -> Assessment {
    Assessment {
        baseline: BaselineObservation {
            final_url: "https://example.com/".to_string(),
            status: 200,
            headers: vec![("content-type".to_string(), "text/html".to_string())],
            body_snippet: "<html>".to_string(),
        },
        findings: vec![HeaderFinding::new(
            HSTS_MISSING,
            Severity::High,
            "Strict-Transport-Security header missing.",
        )],
        score: 10,
        risk: Severity::Medium,
        suggestions: vec!["Enable Strict-Transport-Security to enforce HTTPS.".to_string()],
        tls: ProbeOutcome::failed("TLS handshake failed: wrong version number"),
        transport_audit: ProbeOutcome::Completed(ToolOutput {
            stdout: "ok".to_string(),
            stderr: String::new(),
            exit_code: Some(0),
        }),
        crawl: ProbeOutcome::Completed(SiteMap::default()),
        log_triage: ProbeOutcome::Completed(TriageSummary::no_data()),
    }
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("csv"), None);
}

// ============================================================================
// Probe Outcome Tests
// ============================================================================

#[test]
fn test_probe_outcome_from_result() {
    let ok: ProbeOutcome<u32> = ProbeOutcome::from_result(Ok::<u32, String>(7));
    assert_eq!(ok.completed(), Some(&7));
    assert_eq!(ok.failure(), None);

    let failed: ProbeOutcome<u32> = ProbeOutcome::from_result(Err::<u32, _>("boom"));
    assert_eq!(failed.failure(), Some("boom"));
    assert!(!failed.is_completed());
}

#[test]
fn test_body_snippet_respects_char_boundaries() {
    assert_eq!(body_snippet("héllo wörld", 5), "héllo");
    assert_eq!(body_snippet("short", 500), "short");
}

// ============================================================================
// Text Summary Tests
// ============================================================================

#[test]
fn test_text_summary_for_unreachable_target() {
    let reports = vec![TargetReport::unreachable(
        "https://down.example/",
        "error sending request",
    )];
    let text = render_text_summary(&reports);
    assert!(text.contains("https://down.example/"));
    assert!(text.contains("Error:        error sending request"));
    assert!(text.contains("Unreachable:  1"));
}

#[test]
fn test_text_summary_for_assessed_target() {
    let reports = vec![TargetReport::assessed(
        "https://example.com/",
        sample_assessment(),
    )];
    let text = render_text_summary(&reports);
    assert!(text.contains("HTTP Status:  200"));
    assert!(text.contains("Risk:         MEDIUM (score 10)"));
    assert!(text.contains("[HIGH] HSTS_MISSING"));
    assert!(text.contains("TLS:          error: TLS handshake failed"));
    assert!(text.contains("Audit tool:   exit 0"));
    assert!(text.contains("Crawl:        0 visited"));
    assert!(text.contains("Log triage:   no_data"));
    assert!(!text.contains("Assets:"));
}

#[test]
fn test_text_summary_counts_static_assets() {
    let mut site_map = SiteMap::default();
    site_map
        .static_assets
        .scripts
        .insert("https://example.com/app.js".to_string());
    site_map
        .static_assets
        .images
        .insert("https://example.com/logo.png".to_string());

    let mut assessment = sample_assessment();
    assessment.crawl = ProbeOutcome::Completed(site_map);
    let text = render_text_summary(&[TargetReport::assessed("https://example.com/", assessment)]);

    assert!(text.contains("Assets:       2 (1 scripts, 0 stylesheets, 1 images)"));
}

// ============================================================================
// JSON Tests
// ============================================================================

#[test]
fn test_json_report_tags_outcomes() {
    let reports = vec![
        TargetReport::assessed("https://example.com/", sample_assessment()),
        TargetReport::unreachable("https://down.example/", "refused"),
    ];
    let json = generate_json_report(&reports).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let targets = value["targets"].as_array().unwrap();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0]["outcome"]["status"], "assessed");
    assert_eq!(targets[0]["outcome"]["risk"], "MEDIUM");
    assert_eq!(targets[0]["outcome"]["tls"]["outcome"], "failed");
    assert_eq!(targets[0]["outcome"]["log_triage"]["outcome"], "completed");
    assert_eq!(targets[0]["outcome"]["log_triage"]["status"], "no_data");
    assert_eq!(targets[1]["outcome"]["status"], "unreachable");
    assert_eq!(targets[1]["outcome"]["error"], "refused");
}

#[test]
fn test_report_survives_json_round_trip() {
    let report = TargetReport::assessed("https://example.com/", sample_assessment());
    let json = serde_json::to_string(&report).unwrap();
    let back: TargetReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
