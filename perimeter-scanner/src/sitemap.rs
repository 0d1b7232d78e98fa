use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a visited page's structure was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    Static,
    Rendered,
    Both,
    /// Neither the static fetch nor the renderer produced HTML.
    Empty,
}

impl FetchMode {
    pub fn from_sources(static_html: bool, rendered: bool) -> Self {
        match (static_html, rendered) {
            (true, true) => FetchMode::Both,
            (true, false) => FetchMode::Static,
            (false, true) => FetchMode::Rendered,
            (false, false) => FetchMode::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub depth: usize,
    pub mode: FetchMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormRecord {
    pub method: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticAssets {
    pub scripts: BTreeSet<String>,
    pub stylesheets: BTreeSet<String>,
    pub images: BTreeSet<String>,
}

impl StaticAssets {
    pub fn len(&self) -> usize {
        self.scripts.len() + self.stylesheets.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Structural map of one target, produced by a single crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMap {
    /// Canonical start URL, `None` when the seed was unusable.
    pub start_url: Option<String>,
    /// Pages dequeued and fetched, in BFS visit order.
    pub visited: Vec<PageRecord>,
    /// Discovered same-origin URLs, sorted and capped at the page budget.
    pub pages: Vec<String>,
    pub forms: Vec<FormRecord>,
    pub static_assets: StaticAssets,
    pub api_endpoints: BTreeSet<String>,
    pub rendered_pages: usize,
    pub render_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_error: Option<String>,
}

impl SiteMap {
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
