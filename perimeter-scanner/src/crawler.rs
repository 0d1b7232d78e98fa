use crate::extractor::{PageStructure, extract_structure};
use crate::fetch::{FetchedPage, HttpFetcher};
use crate::origin::{is_api_like, parse_seed, resolve_link, same_origin};
use crate::render::{RenderCapability, Renderer};
use crate::sitemap::{FetchMode, FormRecord, PageRecord, SiteMap, StaticAssets};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

const DEFAULT_MAX_PAGES: usize = 30;
const DEFAULT_MAX_DEPTH: usize = 2;
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Bounded breadth-first crawler over a single origin.
///
/// Each page is fetched statically first. The render fallback runs only when
/// rendering is enabled and the page either produced no HTML or offered no
/// same-origin link leading somewhere other than itself.
pub struct Crawler {
    fetcher: HttpFetcher,
    renderer: RenderCapability,
    render_enabled: bool,
    max_pages: usize,
    max_depth: usize,
    fetch_timeout: Duration,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            renderer: RenderCapability::default(),
            render_enabled: true,
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            progress_callback: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_renderer(mut self, renderer: RenderCapability) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_render_enabled(mut self, enabled: bool) -> Self {
        self.render_enabled = enabled;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub async fn crawl(&self, start_url: &str) -> SiteMap {
        let Some(start) = parse_seed(start_url) else {
            warn!("Cannot crawl {}: not an absolute http(s) URL with a host", start_url);
            return SiteMap::default();
        };

        let (renderer, render_error) = match (&self.renderer, self.render_enabled) {
            (RenderCapability::Available(renderer), true) => (Some(renderer.clone()), None),
            (RenderCapability::Unavailable { reason }, true) => (None, Some(reason.clone())),
            _ => (None, None),
        };

        info!(
            "Starting crawl of {} (max_pages={}, max_depth={}, render={})",
            start,
            self.max_pages,
            self.max_depth,
            renderer.is_some()
        );

        let mut state = CrawlState::new(start.clone(), self.max_depth);

        while state.visited.len() < self.max_pages {
            let Some((url, depth)) = state.frontier.pop_front() else {
                break;
            };
            if !state.visited.insert(url.as_str().to_string()) {
                continue;
            }
            state.discovered.insert(url.as_str().to_string());

            if let Some(ref callback) = self.progress_callback {
                callback(url.as_str());
            }

            let page = self.fetch_html(&url).await;
            let static_html = page.is_some();
            let base = page
                .as_ref()
                .map(|p| p.final_url.clone())
                .unwrap_or_else(|| url.clone());
            let mut structure = page
                .as_ref()
                .map(|p| extract_structure(&p.body))
                .unwrap_or_default();

            let mut rendered = false;
            if let Some(ref renderer) = renderer
                && needs_render(static_html, &structure, &base, &url, &start)
            {
                rendered = self
                    .render_into(renderer.as_ref(), &url, &base, depth, &mut structure, &mut state)
                    .await;
            }

            state.records.push(PageRecord {
                url: url.as_str().to_string(),
                depth,
                mode: FetchMode::from_sources(static_html, rendered),
            });

            if static_html || rendered {
                state.absorb(&base, &url, depth, structure);
            }
        }

        let site_map = state.finish(self.max_pages, renderer.is_some(), render_error);
        info!(
            "Crawl of {} complete. Visited {} pages, discovered {}, rendered {}",
            start,
            site_map.visited_count(),
            site_map.pages.len(),
            site_map.rendered_pages
        );
        site_map
    }

    async fn fetch_html(&self, url: &Url) -> Option<FetchedPage> {
        match self.fetcher.fetch(url.as_str(), self.fetch_timeout).await {
            Ok(page) if page.is_html() => Some(page),
            Ok(page) => {
                debug!(
                    "Skipping structure of {} (status {}, content-type {:?})",
                    url, page.status, page.content_type
                );
                None
            }
            Err(e) => {
                debug!("Crawl fetch failed for {}: {}", url, e);
                None
            }
        }
    }

    /// Runs the renderer for one page and merges what it produced. Returns
    /// whether a non-empty DOM came back.
    async fn render_into(
        &self,
        renderer: &dyn Renderer,
        url: &Url,
        base: &Url,
        depth: usize,
        structure: &mut PageStructure,
        state: &mut CrawlState,
    ) -> bool {
        debug!("Render fallback for {}", url);

        // bounded here as well, a renderer may ignore the budget it is given
        let budget = self.fetch_timeout;
        let rendered = match timeout(budget, renderer.render(url, budget)).await {
            Ok(Ok(rendered)) if !rendered.html.trim().is_empty() => rendered,
            Ok(Ok(_)) => {
                debug!("Renderer returned an empty DOM for {}", url);
                return false;
            }
            Ok(Err(e)) => {
                debug!("Render of {} failed: {}", url, e);
                return false;
            }
            Err(_) => {
                debug!("Render of {} timed out after {:?}", url, budget);
                return false;
            }
        };

        state.rendered_pages += 1;
        structure.merge(extract_structure(&rendered.html));

        for nav in &rendered.navigated_urls {
            if let Some(target) = resolve_link(base, nav)
                && target != *url
            {
                state.discover(target, depth + 1);
            }
        }

        true
    }
}

fn needs_render(
    static_html: bool,
    structure: &PageStructure,
    base: &Url,
    current: &Url,
    origin: &Url,
) -> bool {
    if !static_html {
        return true;
    }

    let leads_elsewhere = structure.links.iter().any(|href| {
        resolve_link(base, href)
            .map(|link| same_origin(&link, origin) && link != *current && link != *base)
            .unwrap_or(false)
    });

    !leads_elsewhere
}

/// Frontier, visited-set and the SiteMap under construction for one crawl.
struct CrawlState {
    origin: Url,
    max_depth: usize,
    frontier: VecDeque<(Url, usize)>,
    queued: HashSet<String>,
    visited: HashSet<String>,
    records: Vec<PageRecord>,
    discovered: BTreeSet<String>,
    forms: Vec<FormRecord>,
    assets: StaticAssets,
    api_endpoints: BTreeSet<String>,
    rendered_pages: usize,
}

impl CrawlState {
    fn new(origin: Url, max_depth: usize) -> Self {
        let mut frontier = VecDeque::new();
        let mut queued = HashSet::new();
        queued.insert(origin.as_str().to_string());
        frontier.push_back((origin.clone(), 0));

        Self {
            origin,
            max_depth,
            frontier,
            queued,
            visited: HashSet::new(),
            records: Vec::new(),
            discovered: BTreeSet::new(),
            forms: Vec::new(),
            assets: StaticAssets::default(),
            api_endpoints: BTreeSet::new(),
            rendered_pages: 0,
        }
    }

    /// Records a same-origin URL and queues it when the depth budget allows.
    fn discover(&mut self, url: Url, next_depth: usize) {
        if !same_origin(&url, &self.origin) {
            return;
        }

        let key = url.as_str().to_string();
        if is_api_like(&url) {
            self.api_endpoints.insert(key.clone());
        }
        self.discovered.insert(key.clone());

        if next_depth <= self.max_depth && !self.visited.contains(&key) && self.queued.insert(key)
        {
            self.frontier.push_back((url, next_depth));
        }
    }

    fn absorb(&mut self, base: &Url, current: &Url, depth: usize, structure: PageStructure) {
        let PageStructure {
            links,
            forms,
            scripts,
            stylesheets,
            images,
        } = structure;

        for form in forms {
            let action = match form.action.as_deref() {
                None => Some(current.clone()),
                Some(action) if action.starts_with('#') => Some(current.clone()),
                Some(action) => resolve_link(base, action),
            };
            let Some(action) = action else {
                continue;
            };
            if !same_origin(&action, &self.origin) {
                continue;
            }
            if is_api_like(&action) {
                self.api_endpoints.insert(action.as_str().to_string());
            }

            let record = FormRecord {
                method: form.method,
                action: action.as_str().to_string(),
            };
            if !self.forms.contains(&record) {
                self.forms.push(record);
            }
        }

        collect_assets(&self.origin, base, scripts, &mut self.assets.scripts);
        collect_assets(&self.origin, base, stylesheets, &mut self.assets.stylesheets);
        collect_assets(&self.origin, base, images, &mut self.assets.images);

        for href in links {
            if let Some(link) = resolve_link(base, &href) {
                self.discover(link, depth + 1);
            }
        }
    }

    fn finish(
        self,
        max_pages: usize,
        render_enabled: bool,
        render_error: Option<String>,
    ) -> SiteMap {
        SiteMap {
            start_url: Some(self.origin.as_str().to_string()),
            visited: self.records,
            pages: self.discovered.into_iter().take(max_pages).collect(),
            forms: self.forms,
            static_assets: self.assets,
            api_endpoints: self.api_endpoints,
            rendered_pages: self.rendered_pages,
            render_enabled,
            render_error,
        }
    }
}

fn collect_assets(
    origin: &Url,
    base: &Url,
    references: BTreeSet<String>,
    into: &mut BTreeSet<String>,
) {
    for reference in references {
        if let Some(asset) = resolve_link(base, &reference)
            && same_origin(&asset, origin)
        {
            into.insert(asset.as_str().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::render::RenderedPage;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use wiremock::{
        Mock, MockServer, Request, Respond, ResponseTemplate,
        matchers::{method, path, path_regex},
    };

    fn html(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(
            format!("<html><body>{}</body></html>", body),
            "text/html; charset=utf-8",
        )
    }

    async fn mount_html(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html(body))
            .mount(server)
            .await;
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new("perimeter-test", Duration::from_secs(2)).unwrap()
    }

    /// Renderer double that records every URL it is asked to render.
    #[derive(Default)]
    struct RecordingRenderer {
        pages: HashMap<String, RenderedPage>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingRenderer {
        fn with_page(mut self, url: String, page: RenderedPage) -> Self {
            self.pages.insert(url, page);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Renderer for RecordingRenderer {
        async fn render(&self, url: &Url, _timeout: Duration) -> Result<RenderedPage> {
            self.calls.lock().unwrap().push(url.path().to_string());
            Ok(self.pages.get(url.as_str()).cloned().unwrap_or_default())
        }
    }

    /// Renderer double that never finishes and ignores its budget.
    struct HangingRenderer;

    #[async_trait]
    impl Renderer for HangingRenderer {
        async fn render(&self, _url: &Url, _timeout: Duration) -> Result<RenderedPage> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(RenderedPage::default())
        }
    }

    /// Every `/n/<k>` page links to two deeper pages and back to the root,
    /// so the graph is both infinite and cyclic.
    struct EndlessSite;

    impl Respond for EndlessSite {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let k: u64 = request
                .url
                .path()
                .trim_start_matches("/n/")
                .parse()
                .unwrap_or(0);
            html(&format!(
                r#"<a href="/n/{}">a</a><a href="/n/{}">b</a><a href="/">home</a>"#,
                2 * k + 1,
                2 * k + 2
            ))
        }
    }

    #[tokio::test]
    async fn test_link_discovery() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(
            &server,
            "/",
            &format!(r#"<a href="{uri}/page1">Page 1</a><a href="/page2">Page 2</a>"#),
        )
        .await;
        mount_html(&server, "/page1", r#"<a href="/">home</a>"#).await;
        mount_html(&server, "/page2", r#"<a href="/page1">p1</a>"#).await;

        let crawler = Crawler::new(fetcher()).with_max_depth(2);
        let site_map = crawler.crawl(&uri).await;

        assert_eq!(site_map.visited_count(), 3);
        assert_eq!(
            site_map.pages,
            vec![
                format!("{uri}/"),
                format!("{uri}/page1"),
                format!("{uri}/page2"),
            ]
        );
        assert_eq!(site_map.visited[0].depth, 0);
        assert!(site_map.visited.iter().all(|p| p.mode == FetchMode::Static));
    }

    #[tokio::test]
    async fn test_page_budget_bounds_endless_cyclic_site() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(&server, "/", r#"<a href="/n/0">start</a>"#).await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/n/\d+$"))
            .respond_with(EndlessSite)
            .mount(&server)
            .await;

        let crawler = Crawler::new(fetcher())
            .with_max_pages(7)
            .with_max_depth(50)
            .with_render_enabled(false);
        let site_map = crawler.crawl(&uri).await;

        assert_eq!(site_map.visited_count(), 7);
        assert!(site_map.pages.len() <= 7);
        let unique: HashSet<_> = site_map.visited.iter().map(|p| p.url.clone()).collect();
        assert_eq!(unique.len(), site_map.visited_count());
    }

    #[tokio::test]
    async fn test_depth_limit_stops_enqueueing() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(&server, "/", r#"<a href="/d1">d1</a>"#).await;
        mount_html(&server, "/d1", r#"<a href="/d2">d2</a>"#).await;
        mount_html(&server, "/d2", r#"<a href="/d3">d3</a>"#).await;

        let crawler = Crawler::new(fetcher()).with_max_depth(1);
        let site_map = crawler.crawl(&uri).await;

        let visited: Vec<_> = site_map.visited.iter().map(|p| p.url.clone()).collect();
        assert_eq!(visited, vec![format!("{uri}/"), format!("{uri}/d1")]);
        // seen on a depth-1 page, recorded but never fetched
        assert!(site_map.pages.contains(&format!("{uri}/d2")));
    }

    #[tokio::test]
    async fn test_off_origin_urls_never_enter_the_map() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(
            &server,
            "/",
            r#"<a href="https://elsewhere.example/">x</a>
               <a href="//cdn.example/lib">cdn</a>
               <a href="/local">local</a>
               <script src="https://cdn.example/app.js"></script>
               <script src="/static/app.js"></script>
               <form action="https://collector.example/submit" method="post"></form>"#,
        )
        .await;
        mount_html(&server, "/local", "nothing here").await;

        let crawler = Crawler::new(fetcher()).with_render_enabled(false);
        let site_map = crawler.crawl(&uri).await;

        assert!(site_map.pages.iter().all(|p| p.starts_with(&uri)));
        assert_eq!(
            site_map.static_assets.scripts.iter().collect::<Vec<_>>(),
            vec![&format!("{uri}/static/app.js")]
        );
        assert!(site_map.forms.is_empty());
    }

    #[tokio::test]
    async fn test_non_html_pages_are_visited_but_empty() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(&server, "/", r#"<a href="/data/feed.json">feed</a>"#).await;
        Mock::given(method("GET"))
            .and(path("/data/feed.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"href": "/hidden"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let crawler = Crawler::new(fetcher()).with_render_enabled(false);
        let site_map = crawler.crawl(&uri).await;

        assert_eq!(site_map.visited_count(), 2);
        assert_eq!(site_map.visited[1].mode, FetchMode::Empty);
        assert!(site_map.api_endpoints.contains(&format!("{uri}/data/feed.json")));
        assert!(!site_map.pages.iter().any(|p| p.ends_with("/hidden")));
    }

    #[tokio::test]
    async fn test_render_fallback_only_for_render_dependent_pages() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(
            &server,
            "/",
            r#"<a href="/no-links">a</a><a href="/offsite-only">b</a>
               <a href="/linked">c</a><a href="/missing">d</a>"#,
        )
        .await;
        mount_html(&server, "/no-links", "<p>shell</p>").await;
        mount_html(
            &server,
            "/offsite-only",
            r#"<a href="https://elsewhere.example/">out</a><a href="/offsite-only#top">self</a>"#,
        )
        .await;
        mount_html(&server, "/linked", r#"<a href="/">home</a>"#).await;

        let renderer = Arc::new(RecordingRenderer::default());
        let crawler = Crawler::new(fetcher())
            .with_max_depth(1)
            .with_renderer(RenderCapability::available(renderer.clone()));
        let site_map = crawler.crawl(&uri).await;

        let mut calls = renderer.calls();
        calls.sort();
        assert_eq!(calls, vec!["/missing", "/no-links", "/offsite-only"]);
        assert!(site_map.render_enabled);
        // the double returns empty DOMs, so nothing counts as rendered
        assert_eq!(site_map.rendered_pages, 0);
    }

    #[tokio::test]
    async fn test_stalled_renderer_is_cut_off_by_fetch_timeout() {
        let server = MockServer::start().await;
        mount_html(&server, "/", r#"<div id="app"></div>"#).await;

        let crawler = Crawler::new(fetcher())
            .with_fetch_timeout(Duration::from_millis(300))
            .with_renderer(RenderCapability::available(Arc::new(HangingRenderer)));
        let site_map = tokio::time::timeout(Duration::from_secs(5), crawler.crawl(&server.uri()))
            .await
            .expect("crawl should finish despite a stalled renderer");

        assert_eq!(site_map.visited_count(), 1);
        assert_eq!(site_map.visited[0].mode, FetchMode::Static);
        assert_eq!(site_map.rendered_pages, 0);
    }

    #[tokio::test]
    async fn test_slow_page_does_not_abort_crawl() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(&server, "/", r#"<a href="/slow">s</a><a href="/fast">f</a>"#).await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                html(r#"<a href="/behind-slow">x</a>"#).set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        mount_html(&server, "/fast", r#"<a href="/fast/child">c</a>"#).await;
        mount_html(&server, "/fast/child", "leaf").await;

        let crawler = Crawler::new(fetcher())
            .with_max_depth(2)
            .with_fetch_timeout(Duration::from_millis(300))
            .with_render_enabled(false);
        let site_map = crawler.crawl(&uri).await;

        let mode_of = |suffix: &str| {
            site_map
                .visited
                .iter()
                .find(|p| p.url == format!("{uri}{suffix}"))
                .map(|p| p.mode)
        };
        assert_eq!(site_map.visited_count(), 4);
        assert_eq!(mode_of("/slow"), Some(FetchMode::Empty));
        assert_eq!(mode_of("/fast"), Some(FetchMode::Static));
        assert_eq!(mode_of("/fast/child"), Some(FetchMode::Static));
        assert!(!site_map.pages.contains(&format!("{uri}/behind-slow")));
    }

    #[tokio::test]
    async fn test_render_disabled_never_invokes_renderer() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(&server, "/", "<p>no links at all</p>").await;

        let renderer = Arc::new(RecordingRenderer::default());
        let crawler = Crawler::new(fetcher())
            .with_renderer(RenderCapability::available(renderer.clone()))
            .with_render_enabled(false);
        let site_map = crawler.crawl(&uri).await;

        assert!(renderer.calls().is_empty());
        assert!(!site_map.render_enabled);
        assert_eq!(site_map.visited_count(), 1);
    }

    #[tokio::test]
    async fn test_rendered_dom_and_navigations_are_followed() {
        let server = MockServer::start().await;
        let uri = server.uri();

        mount_html(&server, "/", r#"<div id="root"></div><script src="/bundle.js"></script>"#)
            .await;
        mount_html(&server, "/from-dom", r#"<a href="/from-nav">n</a>"#).await;
        mount_html(&server, "/from-nav", r#"<a href="/from-dom">d</a>"#).await;

        let shell = RenderedPage::new(
            r#"<html><body><a href="/from-dom">dom link</a>
               <form action="/api/search" method="post"></form></body></html>"#,
            vec![format!("{uri}/from-nav"), format!("{uri}/")],
        );
        let renderer = Arc::new(RecordingRenderer::default().with_page(format!("{uri}/"), shell));
        let crawler = Crawler::new(fetcher())
            .with_renderer(RenderCapability::available(renderer.clone()));
        let site_map = crawler.crawl(&uri).await;

        assert_eq!(renderer.calls(), vec!["/"]);
        assert_eq!(site_map.rendered_pages, 1);
        assert_eq!(site_map.visited[0].mode, FetchMode::Both);

        let visited: HashSet<_> = site_map.visited.iter().map(|p| p.url.clone()).collect();
        assert!(visited.contains(&format!("{uri}/from-dom")));
        assert!(visited.contains(&format!("{uri}/from-nav")));

        assert_eq!(
            site_map.forms,
            vec![FormRecord {
                method: "POST".to_string(),
                action: format!("{uri}/api/search"),
            }]
        );
        assert!(site_map.api_endpoints.contains(&format!("{uri}/api/search")));
        assert!(site_map.static_assets.scripts.contains(&format!("{uri}/bundle.js")));
    }

    #[tokio::test]
    async fn test_forms_are_resolved_and_deduplicated() {
        let server = MockServer::start().await;
        let uri = server.uri();

        let form = r#"<form action="/api/login" method="post"></form><form></form>"#;
        mount_html(&server, "/", &format!(r#"<a href="/other">o</a>{form}"#)).await;
        mount_html(&server, "/other", &format!(r#"<a href="/">home</a>{form}"#)).await;

        let crawler = Crawler::new(fetcher()).with_render_enabled(false);
        let site_map = crawler.crawl(&uri).await;

        assert_eq!(
            site_map.forms,
            vec![
                FormRecord {
                    method: "POST".to_string(),
                    action: format!("{uri}/api/login"),
                },
                FormRecord {
                    method: "GET".to_string(),
                    action: format!("{uri}/"),
                },
                FormRecord {
                    method: "GET".to_string(),
                    action: format!("{uri}/other"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_unavailable_renderer_is_reported() {
        let server = MockServer::start().await;
        mount_html(&server, "/", "<p>spa shell</p>").await;

        let crawler = Crawler::new(fetcher())
            .with_renderer(RenderCapability::unavailable("chromium not installed"));
        let site_map = crawler.crawl(&server.uri()).await;

        assert!(!site_map.render_enabled);
        assert_eq!(site_map.render_error.as_deref(), Some("chromium not installed"));
        assert_eq!(site_map.visited_count(), 1);
    }

    #[tokio::test]
    async fn test_unusable_seed_yields_empty_map() {
        let crawler = Crawler::new(fetcher());

        assert_eq!(crawler.crawl("ftp://example.com/").await, SiteMap::default());
        assert_eq!(crawler.crawl("not a url").await, SiteMap::default());
    }
}
