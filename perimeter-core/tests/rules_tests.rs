// Tests for header-hygiene rules, scoring and risk classification

use perimeter_core::rules::{
    COOKIE_HTTPONLY_MISSING, COOKIE_SAMESITE_MISSING, COOKIE_SECURE_MISSING, HSTS_MISSING,
    HSTS_PRESENT, HeaderFinding, NO_SET_COOKIE, Severity, classify_risk,
    evaluate_header_hygiene, score_findings, suggest,
};

fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn rules(findings: &[HeaderFinding]) -> Vec<&str> {
    findings.iter().map(|f| f.rule.as_str()).collect()
}

// ============================================================================
// Scoring Tests
// ============================================================================

#[test]
fn test_mixed_severities_score_sixteen_and_classify_high() {
    let findings = vec![
        HeaderFinding::new("A", Severity::High, ""),
        HeaderFinding::new("B", Severity::Medium, ""),
        HeaderFinding::new("C", Severity::Low, ""),
    ];
    let score = score_findings(&findings);
    assert_eq!(score, 16);
    assert_eq!(classify_risk(score), Severity::High);
}

#[test]
fn test_risk_thresholds() {
    assert_eq!(classify_risk(0), Severity::Info);
    assert_eq!(classify_risk(1), Severity::Low);
    assert_eq!(classify_risk(5), Severity::Low);
    assert_eq!(classify_risk(6), Severity::Medium);
    assert_eq!(classify_risk(14), Severity::Medium);
    assert_eq!(classify_risk(15), Severity::High);
    assert_eq!(classify_risk(400), Severity::High);
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::Info < Severity::Low);
    assert!(Severity::Low < Severity::Medium);
    assert!(Severity::Medium < Severity::High);
}

// ============================================================================
// Rule Evaluation Tests
// ============================================================================

#[test]
fn test_bare_response_flags_hsts_and_no_cookie() {
    let findings = evaluate_header_hygiene(&headers(&[("content-type", "text/html")]));
    assert_eq!(rules(&findings), vec![HSTS_MISSING, NO_SET_COOKIE]);
    assert_eq!(findings[0].severity, Severity::High);
    assert_eq!(findings[1].severity, Severity::Info);

    let score = score_findings(&findings);
    assert_eq!(score, 10);
    assert_eq!(classify_risk(score), Severity::Medium);
}

#[test]
fn test_hsts_header_name_is_case_insensitive() {
    let findings = evaluate_header_hygiene(&headers(&[(
        "Strict-Transport-Security",
        "max-age=31536000",
    )]));
    assert_eq!(rules(&findings), vec![HSTS_PRESENT, NO_SET_COOKIE]);
    assert_eq!(findings[0].detail, "max-age=31536000");
    assert_eq!(score_findings(&findings), 0);
}

#[test]
fn test_insecure_cookie_triggers_all_cookie_rules() {
    let findings = evaluate_header_hygiene(&headers(&[
        ("strict-transport-security", "max-age=60"),
        ("set-cookie", "session=abc; Path=/"),
    ]));
    assert_eq!(
        rules(&findings),
        vec![
            HSTS_PRESENT,
            COOKIE_HTTPONLY_MISSING,
            COOKIE_SECURE_MISSING,
            COOKIE_SAMESITE_MISSING
        ]
    );
    assert_eq!(findings[1].detail, "session=abc; Path=/");
    assert_eq!(score_findings(&findings), 11);
}

#[test]
fn test_hardened_cookie_raises_nothing() {
    let findings = evaluate_header_hygiene(&headers(&[
        ("strict-transport-security", "max-age=60"),
        ("set-cookie", "session=abc; secure; HTTPONLY; samesite=Strict"),
    ]));
    assert_eq!(rules(&findings), vec![HSTS_PRESENT]);
}

#[test]
fn test_only_offending_cookie_is_reported() {
    let findings = evaluate_header_hygiene(&headers(&[
        ("strict-transport-security", "max-age=60"),
        ("set-cookie", "a=1; Secure; HttpOnly; SameSite=Lax"),
        ("set-cookie", "b=2; Secure; SameSite=Lax"),
    ]));
    assert_eq!(rules(&findings), vec![HSTS_PRESENT, COOKIE_HTTPONLY_MISSING]);
    assert_eq!(findings[1].detail, "b=2; Secure; SameSite=Lax");
}

#[test]
fn test_cookie_value_mentioning_attribute_does_not_count() {
    let findings = evaluate_header_hygiene(&headers(&[
        ("strict-transport-security", "max-age=60"),
        ("set-cookie", "pref=Secure; HttpOnly; SameSite=Lax"),
    ]));
    assert_eq!(rules(&findings), vec![HSTS_PRESENT, COOKIE_SECURE_MISSING]);
}

// ============================================================================
// Suggestion Tests
// ============================================================================

#[test]
fn test_suggestions_follow_finding_order() {
    let findings = evaluate_header_hygiene(&headers(&[("set-cookie", "id=1; Secure")]));
    let suggestions = suggest(&findings);
    assert_eq!(suggestions.len(), 3);
    assert!(suggestions[0].contains("Strict-Transport-Security"));
    assert!(suggestions[1].contains("HttpOnly"));
    assert!(suggestions[2].contains("SameSite"));
}

#[test]
fn test_informational_hsts_has_no_suggestion() {
    let findings = vec![HeaderFinding::new(HSTS_PRESENT, Severity::Info, "max-age=1")];
    assert!(suggest(&findings).is_empty());
}
