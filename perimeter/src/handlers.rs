use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use perimeter_core::report::{
    ReportFormat, TargetReport, generate_json_report, render_text_summary, save_report,
};
use perimeter_core::targets::prepare_targets;
use perimeter_core::{Orchestrator, ScanConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn print_banner() {
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
    eprintln!(
        "{} {}",
        "  PERIMETER".bright_white().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
    eprintln!("  passive web exposure assessment");
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
    eprintln!();
}

/// Logs go to stderr so JSON on stdout stays clean. `RUST_LOG` wins over
/// the verbosity count.
pub fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Raw target lines from a file. Blank lines and `#` comments are skipped;
/// normalization happens later.
pub fn load_targets_from_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read targets file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Merges command-line targets with the targets file, normalized and
/// deduplicated in first-seen order.
pub fn collect_targets(cli_targets: &[String], targets_file: Option<&Path>) -> Result<Vec<String>> {
    let mut raw: Vec<String> = cli_targets.to_vec();
    if let Some(path) = targets_file {
        raw.extend(load_targets_from_file(path)?);
    }

    let targets = prepare_targets(&raw);
    if targets.is_empty() {
        bail!("No valid targets supplied (use --target or --targets-file)");
    }
    Ok(targets)
}

pub fn load_log_file(path: &Path) -> Result<Arc<[u8]>> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read log file {}", path.display()))?;
    Ok(Arc::from(bytes))
}

pub fn build_config(args: &ArgMatches) -> Result<ScanConfig> {
    let mut config = ScanConfig::default();

    if let Some(&max_pages) = args.get_one::<usize>("max-pages") {
        config.max_pages = max_pages;
    }
    if let Some(&max_depth) = args.get_one::<usize>("max-depth") {
        config.max_depth = max_depth;
    }
    if let Some(&timeout) = args.get_one::<u64>("timeout") {
        config.fetch_timeout_secs = timeout;
        config.crawl_fetch_timeout_secs = timeout;
    }
    if let Some(&tool_timeout) = args.get_one::<u64>("tool-timeout") {
        config.tool_timeout_secs = tool_timeout;
    }
    if let Some(&workers) = args.get_one::<usize>("tls-workers") {
        config.tls_concurrency = workers;
    }
    if let Some(&workers) = args.get_one::<usize>("tool-workers") {
        config.tool_concurrency = workers;
    }
    if let Some(&workers) = args.get_one::<usize>("crawl-workers") {
        config.crawl_concurrency = workers;
    }
    config.render_enabled = !args.get_flag("no-render");
    config.audit_tool = if args.get_flag("no-audit-tool") {
        None
    } else {
        args.get_one::<String>("audit-tool").cloned()
    };

    config.validate().context("Invalid scan settings")?;
    Ok(config)
}

fn format_reports(reports: &[TargetReport], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text_summary(reports)),
        ReportFormat::Json => {
            generate_json_report(reports).context("Failed to serialize JSON report")
        }
    }
}

pub async fn handle_scan(sub_matches: &ArgMatches) -> Result<()> {
    let cli_targets: Vec<String> = sub_matches
        .get_many::<String>("target")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let targets_file = sub_matches
        .get_one::<String>("targets-file")
        .map(|raw| expand_path(raw));
    let targets = collect_targets(&cli_targets, targets_file.as_deref())?;

    let log_bytes = match sub_matches.get_one::<String>("log-file") {
        Some(raw) => Some(load_log_file(&expand_path(raw))?),
        None => None,
    };

    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let output = sub_matches.get_one::<PathBuf>("output");
    let quiet = sub_matches.get_flag("quiet");
    let config = build_config(sub_matches)?;

    info!(
        "Scanning {} target(s), max_pages={}, max_depth={}",
        targets.len(),
        config.max_pages,
        config.max_depth
    );

    let show_progress = !quiet && !(format == ReportFormat::Json && output.is_none());
    let spinner = if show_progress {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("Invalid progress template")?,
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("Scanning {} target(s)...", targets.len()));
        Some(spinner)
    } else {
        None
    };

    let mut orchestrator = Orchestrator::new(config).context("Failed to set up the scanner")?;
    if let Some(ref spinner) = spinner {
        let spinner = spinner.clone();
        orchestrator = orchestrator.with_progress_callback(Arc::new(move |url: &str| {
            spinner.set_message(format!("Crawling {}", url));
        }));
    }

    let reports = orchestrator.scan(&targets, log_bytes).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let unreachable = reports.iter().filter(|r| r.error().is_some()).count();
    let rendered = format_reports(&reports, format)?;

    match output {
        Some(path) => {
            let path = expand_path(&path.to_string_lossy());
            save_report(&rendered, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                eprintln!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => print!("{}", rendered),
    }

    if !quiet && unreachable > 0 {
        eprintln!(
            "{} {} of {} target(s) unreachable",
            "⚠".yellow().bold(),
            unreachable,
            reports.len()
        );
    }

    Ok(())
}
