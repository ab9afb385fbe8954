//! # Research News CLI
//!
//! Fetches one or more news categories through [`NewsService`] and writes
//! each result as a JSON digest, either to a dated directory or to stdout.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... research_news -c ai -c tech -j ./json
//! ```
//!
//! With `--interval-secs` the process keeps running and re-fetches on a
//! timer. Repeated fetches within the cache window cost no upstream requests.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::time::Duration as StdDuration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use research_news::cli::Cli;
use research_news::outputs::json;
use research_news::utils::ensure_writable_dir;
use research_news::{NewsApiClient, NewsDigest, NewsError, NewsSearch, NewsService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("research_news starting up");

    let args = Cli::parse();
    debug!(?args.categories, ?args.json_output_dir, "Parsed CLI arguments");

    let config = args.load_config()?;
    info!(?config, "Loaded configuration");

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let client = NewsApiClient::new(&config)?;
    let service = NewsService::new(client, &config);

    match args.interval_secs {
        None => {
            run_once(&service, &args).await;
        }
        Some(secs) => {
            let mut ticker = tokio::time::interval(StdDuration::from_secs(secs.max(1)));
            info!(interval_secs = secs, "Polling until interrupted");
            loop {
                tokio::select! {
                    _ = ticker.tick() => run_once(&service, &args).await,
                    _ = tokio::signal::ctrl_c() => {
                        info!("Interrupted; shutting down");
                        break;
                    }
                }
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        requests_used = service.requests_used(),
        daily_limit = service.daily_limit(),
        "Execution complete"
    );
    Ok(())
}

/// Fetch every requested category once and emit its digest.
#[instrument(level = "info", skip_all)]
async fn run_once<S: NewsSearch>(service: &NewsService<S>, args: &Cli) {
    for category in &args.categories {
        let items = match service.fetch_news(category).await {
            Ok(items) => items,
            Err(e @ NewsError::RateLimitExceeded { .. }) => {
                warn!(%category, error = %e, "Daily quota exhausted; skipping remaining categories");
                break;
            }
            Err(e) => {
                error!(%category, error = %e, "Failed to fetch category");
                continue;
            }
        };

        let digest = NewsDigest {
            category: category.clone(),
            generated_at: Utc::now(),
            items,
        };

        match &args.json_output_dir {
            Some(dir) => {
                if let Err(e) = json::write_digest(&digest, dir).await {
                    error!(%category, error = %e, "Failed to write JSON digest");
                }
            }
            None => match serde_json::to_string_pretty(&digest) {
                Ok(json) => println!("{json}"),
                Err(e) => error!(%category, error = %e, "Failed to serialize digest"),
            },
        }
    }
}
