//! URL canonicalization and same-origin helpers shared by the crawler.
//!
//! Two URLs are considered equal when their WHATWG serializations match after
//! the fragment is dropped. Path case and trailing slashes stay significant.

use url::Url;

const SKIPPED_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "tel:", "data:"];

/// Parses a crawl seed. Only absolute `http`/`https` URLs with a host qualify.
pub fn parse_seed(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw.trim()).ok()?;
    if !is_web_scheme(&url) || url.host_str().is_none() {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

/// Resolves an `href`/`src`/`action` value against the page's effective base.
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if !is_web_scheme(&resolved) {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved)
}

/// Identical scheme, host and port.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// An URL looks like an API endpoint when one of its path segments is `api`
/// or its path ends in `.json`.
pub fn is_api_like(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    path.ends_with(".json") || path.split('/').any(|segment| segment == "api")
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_parse_seed_rejects_non_web_schemes() {
        assert!(parse_seed("ftp://example.com/").is_none());
        assert!(parse_seed("not a url").is_none());
        assert!(parse_seed("file:///etc/passwd").is_none());
    }

    #[test]
    fn test_parse_seed_drops_fragment_and_adds_root_path() {
        let seed = parse_seed("https://Example.com#top").unwrap();
        assert_eq!(seed.as_str(), "https://example.com/");
    }

    #[test]
    fn test_resolve_link_relative_and_fragment() {
        let base = url("https://example.com/docs/index.html");
        assert_eq!(
            resolve_link(&base, "guide.html#intro").unwrap().as_str(),
            "https://example.com/docs/guide.html"
        );
        assert_eq!(
            resolve_link(&base, "/about").unwrap().as_str(),
            "https://example.com/about"
        );
    }

    #[test]
    fn test_resolve_link_skips_pseudo_schemes() {
        let base = url("https://example.com/");
        assert!(resolve_link(&base, "javascript:void(0)").is_none());
        assert!(resolve_link(&base, "MAILTO:a@example.com").is_none());
        assert!(resolve_link(&base, "tel:+123").is_none());
        assert!(resolve_link(&base, "#section").is_none());
        assert!(resolve_link(&base, "").is_none());
    }

    #[test]
    fn test_same_origin_compares_scheme_host_and_port() {
        let a = url("https://example.com/a");
        assert!(same_origin(&a, &url("https://example.com:443/b")));
        assert!(!same_origin(&a, &url("http://example.com/a")));
        assert!(!same_origin(&a, &url("https://api.example.com/a")));
        assert!(!same_origin(&a, &url("https://example.com:8443/a")));
    }

    #[test]
    fn test_is_api_like() {
        assert!(is_api_like(&url("https://example.com/api/users")));
        assert!(is_api_like(&url("https://example.com/v1/api")));
        assert!(is_api_like(&url("https://example.com/data/feed.json")));
        assert!(!is_api_like(&url("https://example.com/apis-overview")));
        assert!(!is_api_like(&url("https://example.com/about")));
    }
}
