//! # Serial Scope
//!
//! Live two-channel scrolling chart of line-delimited serial telemetry.
//!
//! Reads whitespace-separated three-field records (`<channel A>
//! <channel B> <ordering>`) from a serial device and advances a
//! fixed-capacity rolling window by at most one record per display frame,
//! so the visual scroll rate tracks the frame timer rather than data
//! arrival.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

mod buffer;
mod config;
mod error;
mod record;
mod render;
mod serial;
mod telemetry;
mod updater;

use buffer::window::TelemetryBuffer;
use config::Config;
use render::{Renderer, TraceRenderer};
use serial::SerialLineSource;
use telemetry::logger::RecordLogger;
use updater::{FrameOutcome, FrameUpdater};

/// Command line arguments
///
/// The transport identifier is the one required option; everything else
/// lives in the optional TOML configuration.
#[derive(Debug, Parser)]
#[command(
    name = "serial-scope",
    version,
    about = "Live two-channel chart of line-delimited serial telemetry"
)]
struct Args {
    /// Serial device to read from (e.g. /dev/ttyUSB0)
    #[arg(long)]
    port: String,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Main entry point for Serial Scope
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with a non-blocking tracing subscriber
///    - Load configuration (defaults when no file is given)
///    - Open the serial device named on the command line
///
/// 2. **Tick Loop**
///    - Await the frame interval, then race the frame update against
///      Ctrl+C so an interrupt lands even while blocked on a quiet device
///    - Hand every frame's snapshot to the renderer; append applied
///      records to the rotating record log when enabled
///    - A malformed line is reported and skipped; the previous frame's
///      window is presented unchanged
///
/// 3. **Graceful Shutdown**
///    - Transport closure or Ctrl+C ends the loop
///    - Flush the record log, flush and release the serial port, log the
///      session totals, exit cleanly
///
/// # Errors
///
/// Returns error if the serial port cannot be opened or the configuration
/// file is invalid; either way the process exits non-zero before the tick
/// loop starts.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Non-blocking writer so a slow terminal never stalls the tick loop
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Serial Scope v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let source = SerialLineSource::open(&args.port, config.serial.baud_rate)?;
    info!("Reading from serial port {}...", source.device_path());

    let buffer = TelemetryBuffer::new(config.chart.capacity);
    let mut updater = FrameUpdater::new(source, buffer);
    let mut renderer = TraceRenderer::new(config.chart.status_interval_frames);

    let mut record_log = if config.record_log.enabled {
        Some(RecordLogger::new(
            &config.record_log.log_dir,
            config.record_log.max_records_per_file,
            config.record_log.max_files_to_keep,
        )?)
    } else {
        None
    };

    let mut frame_interval = interval(Duration::from_millis(config.chart.tick_interval_ms));

    info!(
        "Plotting {} samples per channel, one record per {}ms frame",
        config.chart.capacity, config.chart.tick_interval_ms
    );
    info!("Press Ctrl+C to exit");

    let mut applied: u64 = 0;
    let mut rejected: u64 = 0;

    // Main tick loop: one frame per interval, at most one record per
    // frame. The transport read may outlast the interval when the device
    // is quiet; frames are then delayed rather than overlapped.
    loop {
        frame_interval.tick().await;

        let outcome = tokio::select! {
            outcome = updater.tick() => outcome,
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        };

        match outcome {
            FrameOutcome::Applied { record, snapshot } => {
                applied += 1;
                if let Some(log) = record_log.as_mut() {
                    if let Err(e) = log.append(&record) {
                        warn!("Record log write failed: {}", e);
                    }
                }
                renderer.render(&snapshot);
            }
            FrameOutcome::Rejected { snapshot, .. } => {
                // The updater already reported the rejection details
                rejected += 1;
                renderer.render(&snapshot);
            }
            FrameOutcome::Stopped { cause, .. } => {
                info!("Transport closed: {}", cause);
                break;
            }
        }
    }

    if let Some(log) = record_log.as_mut() {
        if let Err(e) = log.flush() {
            warn!("Record log flush failed: {}", e);
        }
    }

    info!("Applied {} records, rejected {} lines", applied, rejected);

    if let Err(e) = updater.shutdown().await {
        warn!("Transport release failed: {}", e);
    }

    info!("exiting.");
    Ok(())
}
