//! CLI entry point for stampscan.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use stampscan_core::{
    HttpClient, HttpProber, ImageDownloader, PacingPolicy, Scenario, SearchParams, TokioSleeper,
    UrlTemplate, run_scenario,
};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");
    info!("stampscan starting");

    let probe_client = HttpClient::new(Duration::from_secs(args.probe_timeout), &args.referer)?;
    let download_client =
        HttpClient::new(Duration::from_secs(args.download_timeout), &args.referer)?;

    let prober = HttpProber::new(probe_client).with_head_first(!args.no_head);
    let downloader = ImageDownloader::new(download_client);

    let scenario = Scenario {
        template: UrlTemplate::new(args.template),
        search: SearchParams::new(args.start, args.step, args.max_tries),
        pacing: PacingPolicy::with_base_delay(Duration::from_millis(args.delay_ms)),
        output_dir: args.output_dir,
    };

    let outcome = run_scenario(&scenario, &prober, &TokioSleeper, &downloader).await;
    println!("{outcome}");

    Ok(())
}
