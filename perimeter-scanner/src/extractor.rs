//! Structure extraction from a single HTML document.
//!
//! References are returned exactly as written in the markup; resolving them
//! against the page URL is the crawler's job.

use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));
static FORM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("static selector"));
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[src]").expect("static selector"));
static STYLESHEET_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("link[href]").expect("static selector"));
static IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("static selector"));

/// A `<form>` as declared in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawForm {
    /// Upper-cased, `GET` when absent.
    pub method: String,
    /// `None` when the attribute is missing or blank (submits to the page itself).
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageStructure {
    pub links: BTreeSet<String>,
    pub forms: Vec<RawForm>,
    pub scripts: BTreeSet<String>,
    pub stylesheets: BTreeSet<String>,
    pub images: BTreeSet<String>,
}

impl PageStructure {
    /// Unions another page structure into this one. Forms keep first-seen
    /// order and are deduplicated by value.
    pub fn merge(&mut self, other: PageStructure) {
        self.links.extend(other.links);
        for form in other.forms {
            if !self.forms.contains(&form) {
                self.forms.push(form);
            }
        }
        self.scripts.extend(other.scripts);
        self.stylesheets.extend(other.stylesheets);
        self.images.extend(other.images);
    }
}

/// Parses one HTML document. Malformed markup never fails; whatever the
/// parser recovers is returned.
pub fn extract_structure(html: &str) -> PageStructure {
    let document = Html::parse_document(html);
    let mut structure = PageStructure::default();

    for element in document.select(&LINK_SELECTOR) {
        if let Some(href) = non_blank(element.value().attr("href")) {
            structure.links.insert(href);
        }
    }

    for element in document.select(&FORM_SELECTOR) {
        let method = element
            .value()
            .attr("method")
            .map(|m| m.trim().to_ascii_uppercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "GET".to_string());
        let action = non_blank(element.value().attr("action"));
        let form = RawForm { method, action };
        if !structure.forms.contains(&form) {
            structure.forms.push(form);
        }
    }

    for element in document.select(&SCRIPT_SELECTOR) {
        if let Some(src) = non_blank(element.value().attr("src")) {
            structure.scripts.insert(src);
        }
    }

    for element in document.select(&STYLESHEET_SELECTOR) {
        let is_stylesheet = element
            .value()
            .attr("rel")
            .map(|rel| rel.to_ascii_lowercase().contains("stylesheet"))
            .unwrap_or(false);
        if is_stylesheet && let Some(href) = non_blank(element.value().attr("href")) {
            structure.stylesheets.insert(href);
        }
    }

    for element in document.select(&IMAGE_SELECTOR) {
        if let Some(src) = non_blank(element.value().attr("src")) {
            structure.images.insert(src);
        }
    }

    structure
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
