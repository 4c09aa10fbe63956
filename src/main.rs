//! Awards Watch binary entrypoint.
//! Loads sources and seen state, runs one digest pass, writes the page and
//! saves the seen state. Scheduling is left to cron / CI.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use awards_watch::config::sources::{load_sources_default, load_sources_from};
use awards_watch::render::render_html;
use awards_watch::{run_with_repository, FileSeenRepository, HttpFetcher};

use crate::cli::Cli;

/// Compact logs by default; JSON lines when AWARDS_LOG_JSON=1.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("AWARDS_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact().with_target(true)).init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let sources = match &cli.sources {
        Some(p) => load_sources_from(p),
        None => load_sources_default(),
    }
    .context("loading sources")?;
    info!(count = sources.len(), "sources loaded");

    let params = cli.run_params();
    let fetcher = HttpFetcher::new(params.fetch_timeout).context("building http client")?;
    let repo = FileSeenRepository::new(&cli.state);

    let report = run_with_repository(&sources, &fetcher, &repo, params).await?;
    let digest = &report.digest;

    if let Some(dir) = cli.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    tokio::fs::write(&cli.output, render_html(digest))
        .await
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(path = %cli.output.display(), items = digest.item_count(), "digest written");

    if !digest.failures.is_empty() {
        warn!(count = digest.failures.len(), "some sources failed");
        for f in &digest.failures {
            warn!(source = %f.source, detail = %f.detail, "source failure");
        }
    }

    match &report.persisted {
        Ok(()) => Ok(true),
        Err(e) => {
            error!(error = %e, path = %repo.path().display(), "seen state not saved; items may resurface next run");
            Ok(false)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let detail = format!("{e:#}");
            error!(error = %detail, "run aborted");
            ExitCode::FAILURE
        }
    }
}
