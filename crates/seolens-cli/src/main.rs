use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use seolens_cli::{Args, build_request, load_metrics, render_report};
use seolens_core::analyze_request;

/// Log to stderr so stdout stays clean for the report
fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let request = build_request(&args)?;
    let metrics = load_metrics(args.metrics_file.as_deref())?;
    debug!(?request.options, has_metrics = metrics.is_some(), "request assembled");

    let results = analyze_request(&request, metrics, Duration::from_secs(args.timeout)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", render_report(&results));
    }

    Ok(())
}
