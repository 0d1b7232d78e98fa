//! Scan orchestration.
//!
//! One pipeline per target: a baseline fetch, header analysis, then the TLS,
//! audit-tool, crawl and log-triage sub-probes running concurrently. The
//! three external probe kinds draw from semaphores shared by every target of
//! the orchestrator, so the caps hold scan-wide rather than per target.

use crate::audit::{
    CommandAuditTool, DisabledAuditTool, ToolOutput, TransportAuditTool, extract_hostport,
};
use crate::config::ScanConfig;
use crate::error::{ProbeError, SetupError};
use crate::report::{Assessment, BaselineObservation, ProbeOutcome, TargetReport, body_snippet};
use crate::rules::{classify_risk, evaluate_header_hygiene, score_findings, suggest};
use crate::tls::{OpensslTlsProbe, TlsDetails, TlsProbe};
use crate::triage::{TriageSummary, triage_log};
use futures::future::join_all;
use perimeter_scanner::crawler::ProgressCallback;
use perimeter_scanner::{Crawler, HttpFetcher, RenderCapability, SiteMap};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

/// Concurrency caps for the external sub-probes.
#[derive(Clone)]
struct ProbePools {
    tls: Arc<Semaphore>,
    tool: Arc<Semaphore>,
    crawl: Arc<Semaphore>,
}

impl ProbePools {
    fn from_config(config: &ScanConfig) -> Self {
        Self {
            tls: Arc::new(Semaphore::new(config.tls_concurrency)),
            tool: Arc::new(Semaphore::new(config.tool_concurrency)),
            crawl: Arc::new(Semaphore::new(config.crawl_concurrency)),
        }
    }
}

pub struct Orchestrator {
    config: ScanConfig,
    fetcher: HttpFetcher,
    tls_probe: Arc<dyn TlsProbe>,
    audit_tool: Arc<dyn TransportAuditTool>,
    renderer: RenderCapability,
    pools: ProbePools,
    progress_callback: Option<ProgressCallback>,
}

impl Orchestrator {
    pub fn new(config: ScanConfig) -> Result<Self, SetupError> {
        config.validate()?;

        let fetcher = HttpFetcher::new(&config.user_agent, config.fetch_timeout())?;
        let audit_tool: Arc<dyn TransportAuditTool> = match &config.audit_tool {
            Some(program) => Arc::new(CommandAuditTool::new(program.clone())),
            None => Arc::new(DisabledAuditTool),
        };

        Ok(Self {
            pools: ProbePools::from_config(&config),
            config,
            fetcher,
            tls_probe: Arc::new(OpensslTlsProbe),
            audit_tool,
            renderer: RenderCapability::default(),
            progress_callback: None,
        })
    }

    pub fn with_fetcher(mut self, fetcher: HttpFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_tls_probe(mut self, probe: Arc<dyn TlsProbe>) -> Self {
        self.tls_probe = probe;
        self
    }

    pub fn with_audit_tool(mut self, tool: Arc<dyn TransportAuditTool>) -> Self {
        self.audit_tool = tool;
        self
    }

    pub fn with_renderer(mut self, renderer: RenderCapability) -> Self {
        self.renderer = renderer;
        self
    }

    /// Called with every URL a crawl visits, across all targets.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Scans every target concurrently. The returned reports line up index
    /// for index with `targets`; one target's failures never affect another.
    pub async fn scan(&self, targets: &[String], log_bytes: Option<Arc<[u8]>>) -> Vec<TargetReport> {
        info!(
            "Scanning {} targets (tls={}, tool={}, crawl={}, render={})",
            targets.len(),
            self.config.tls_concurrency,
            self.config.tool_concurrency,
            self.config.crawl_concurrency,
            self.config.render_enabled && self.renderer.is_available()
        );

        let reports = join_all(
            targets
                .iter()
                .map(|target| self.scan_target(target, log_bytes.clone())),
        )
        .await;

        info!("Scan complete: {} reports", reports.len());
        reports
    }

    async fn scan_target(&self, target: &str, log_bytes: Option<Arc<[u8]>>) -> TargetReport {
        let page = match self.fetcher.fetch(target, self.config.fetch_timeout()).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Baseline fetch failed for {}: {}", target, e);
                return TargetReport::unreachable(target, e.to_string());
            }
        };
        debug!("Baseline for {}: HTTP {}", target, page.status);

        let findings = evaluate_header_hygiene(&page.headers);
        let score = score_findings(&findings);
        let risk = classify_risk(score);
        let suggestions = suggest(&findings);

        let tls_task = self.spawn_tls_probe(target);
        let tool_task = self.spawn_tool_probe(target);
        let crawl_task = self.spawn_crawl(target);
        let triage_task = log_bytes.map(|bytes| {
            let target = target.to_string();
            tokio::task::spawn_blocking(move || triage_log(&target, Some(&bytes[..])))
        });
        let triage = async move {
            match triage_task {
                Some(handle) => ProbeOutcome::from_result(handle.await),
                None => ProbeOutcome::Completed(TriageSummary::no_data()),
            }
        };

        let (tls, transport_audit, crawl, log_triage) =
            tokio::join!(tls_task, tool_task, crawl_task, triage);

        let assessment = Assessment {
            baseline: BaselineObservation {
                final_url: page.final_url.to_string(),
                status: page.status,
                body_snippet: body_snippet(&page.body, self.config.body_snippet_chars),
                headers: page.headers,
            },
            findings,
            score,
            risk,
            suggestions,
            tls: settle(target, "TLS probe", tls),
            transport_audit: settle(target, "audit tool", transport_audit),
            crawl: settle(target, "crawl", crawl),
            log_triage,
        };

        TargetReport::assessed(target, assessment)
    }

    fn spawn_tls_probe(&self, target: &str) -> JoinHandle<Result<TlsDetails, ProbeError>> {
        let probe = self.tls_probe.clone();
        let pool = self.pools.tls.clone();
        let timeout = self.config.tls_timeout();
        let url = target.to_string();

        tokio::spawn(async move {
            pooled(pool, timeout, async move {
                probe.fetch_tls_details(&url, timeout).await
            })
            .await
        })
    }

    fn spawn_tool_probe(&self, target: &str) -> JoinHandle<Result<ToolOutput, ProbeError>> {
        let tool = self.audit_tool.clone();
        let pool = self.pools.tool.clone();
        let timeout = self.config.tool_timeout();
        let url = target.to_string();

        tokio::spawn(async move {
            let hostport = extract_hostport(&url)?;
            pooled(pool, timeout, async move { tool.run(&hostport, timeout).await }).await
        })
    }

    fn spawn_crawl(&self, target: &str) -> JoinHandle<Result<SiteMap, ProbeError>> {
        let mut crawler = Crawler::new(self.fetcher.clone())
            .with_max_pages(self.config.max_pages)
            .with_max_depth(self.config.max_depth)
            .with_fetch_timeout(self.config.crawl_fetch_timeout())
            .with_renderer(self.renderer.clone())
            .with_render_enabled(self.config.render_enabled);
        if let Some(ref callback) = self.progress_callback {
            crawler = crawler.with_progress_callback(callback.clone());
        }
        let pool = self.pools.crawl.clone();
        let budget = self.config.crawl_timeout();
        let url = target.to_string();

        tokio::spawn(async move {
            pooled(pool, budget, async move { Ok(crawler.crawl(&url).await) }).await
        })
    }
}

/// Waits for a slot in `pool`, then runs `probe` under `budget`. Time spent
/// queueing for the slot does not count against the budget.
async fn pooled<T, F>(pool: Arc<Semaphore>, budget: Duration, probe: F) -> Result<T, ProbeError>
where
    F: Future<Output = Result<T, ProbeError>>,
{
    if pool.available_permits() == 0 {
        debug!("Probe pool saturated, waiting for a slot");
    }
    let _permit = pool
        .acquire_owned()
        .await
        .map_err(|_| ProbeError::PoolClosed)?;

    tokio::time::timeout(budget, probe)
        .await
        .map_err(|_| ProbeError::Timeout(budget))?
}

fn settle<T>(
    target: &str,
    probe: &str,
    joined: Result<Result<T, ProbeError>, JoinError>,
) -> ProbeOutcome<T> {
    let result = joined.map_err(ProbeError::from).and_then(|inner| inner);
    if let Err(ref e) = result {
        warn!("{} failed for {}: {}", probe, target, e);
    }
    ProbeOutcome::from_result(result)
}
