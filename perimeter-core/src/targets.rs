// Target normalization: raw user input to canonical absolute URLs

use std::collections::HashSet;
use url::Url;

/// Normalizes one raw target. Bare hosts default to `https://`; anything
/// that does not end up as an `http`/`https` URL with a host is rejected.
pub fn normalize_target(raw: &str) -> Option<String> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return None;
    }

    let with_scheme = if candidate.contains("://") {
        candidate.to_string()
    } else {
        format!("https://{}", candidate)
    };

    let mut url = Url::parse(&with_scheme).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    url.set_fragment(None);

    Some(url.to_string())
}

/// Normalizes and deduplicates targets, keeping first-seen order.
pub fn prepare_targets<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut prepared = Vec::new();

    for entry in entries {
        if let Some(normalized) = normalize_target(entry.as_ref())
            && seen.insert(normalized.clone())
        {
            prepared.push(normalized);
        }
    }

    prepared
}
