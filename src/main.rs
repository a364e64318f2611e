//! CLI entry point for pricewatch.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pricewatch_core::config::{RunConfig, load_config};
use pricewatch_core::pipeline::ExitOutcome;
use pricewatch_core::{
    Database, DropDetector, Fetcher, HttpClient, Pipeline, PriceStore, RandomSource, RetryPolicy,
};
use tracing::{debug, error, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let outcome = match run(&args).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "pricewatch failed");
            eprintln!("pricewatch: fatal error: {message}");
            eprintln!("See the log output above for details.");
            ExitOutcome::Fatal
        }
    };
    ExitCode::from(outcome.code())
}

async fn run(args: &Args) -> Result<ExitOutcome> {
    let loaded = load_config(args.config.as_deref())?;
    if let (Some(path), Some(_)) = (&loaded.path, &loaded.config) {
        info!(path = %path.display(), "loaded config file");
    }

    let config = RunConfig::resolve(args.overrides(), loaded.config.as_ref())?;
    debug!(?config, "run configuration resolved");

    let pipeline = build_pipeline(config).await?;
    let report = pipeline.run().await;

    // Printed regardless of log level.
    for alert in &report.alerts {
        println!("{alert}");
    }
    println!("{report}");

    Ok(report.exit_outcome())
}

async fn build_pipeline(config: RunConfig) -> Result<Pipeline> {
    let random = Arc::new(match config.seed {
        Some(seed) => {
            info!(seed, "using seeded randomness");
            RandomSource::seeded(seed)
        }
        None => RandomSource::from_entropy(),
    });

    let client = HttpClient::with_timeout(config.request_timeout)
        .context("Failed to build HTTP client")?;
    let fetcher = Fetcher::new(
        client,
        RetryPolicy::new(config.max_retries, config.retry_delay),
        Arc::clone(&random),
    );

    let db = Database::new(&config.db_path).await.with_context(|| {
        format!("Failed to open database '{}'", config.db_path.display())
    })?;
    info!(path = %config.db_path.display(), "database ready");

    Ok(
        Pipeline::new(config.sources, fetcher, PriceStore::new(db), random)
            .with_detector(DropDetector::with_threshold(config.drop_threshold))
            .with_pacing(config.pacing),
    )
}
