//! # CUSP Xymon
//!
//! Send CUSP seismic recorder state-of-health reports to a Xymon server.
//!
//! Walks the given directories, picks up report files matching the
//! configured template and pushes one Xymon status per monitored aspect
//! (`checkin`, `clock`, `bat`, `temp`, `storage`).
//!
//! # Examples
//!
//! ```bash
//! cusp-xymon --host cusp-wel --xymon xymon.example.net --unlink /data/cusp
//! ```
//!
//! Expected output:
//! ```text
//! INFO cusp_xymon: CUSP Xymon v0.1.0 starting...
//! INFO cusp_xymon::processor: walking directory: /data/cusp
//! INFO cusp_xymon: Processed 3 reports (15 sent, 0 failed, 1 too old, 0 errors)
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod cli;

use cli::Cli;
use cusp_xymon::config::Config;
use cusp_xymon::processor::Processor;
use cusp_xymon::transport::UdpSender;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into())
        )
        .init();

    info!("CUSP Xymon v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    cli.apply(&mut config);
    config.validate().context("invalid configuration")?;

    if config.scan.dry_run {
        info!("Dry run: statuses will be logged, not sent");
    }

    let processor = Processor::new(config, UdpSender::new());
    let summary = processor.run(&cli.dirs).await?;

    info!(
        "Processed {} reports ({} sent, {} failed, {} too old, {} errors)",
        summary.processed, summary.sent, summary.failed, summary.too_old, summary.errors
    );

    Ok(())
}
