//! # Frame Updater
//!
//! Per-tick driver advancing the telemetry window by at most one record.
//!
//! This module handles:
//! - Pulling exactly one line from the transport per tick
//! - Applying parsed records to the telemetry window
//! - Keeping the window untouched on malformed lines
//! - Latching a terminal stopped state once the transport closes

use tracing::{debug, warn};

use crate::buffer::window::{ChartSnapshot, TelemetryBuffer};
use crate::error::ScopeError;
use crate::record::parser::parse_line;
use crate::record::types::{Rejection, TelemetryRecord};
use crate::serial::line_source::LineSource;

/// Outcome of one frame tick
///
/// Every variant carries the snapshot the renderer should present for this
/// frame: one sample ahead after `Applied`, the previous frame's contents
/// unchanged after `Rejected`, and the last known-good contents after
/// `Stopped`. The renderer is never shown partial or corrupted state.
#[derive(Debug)]
pub enum FrameOutcome {
    /// A record was parsed and applied
    Applied {
        record: TelemetryRecord,
        snapshot: ChartSnapshot,
    },
    /// The line was malformed; the window is untouched
    Rejected {
        rejection: Rejection,
        snapshot: ChartSnapshot,
    },
    /// The transport closed; terminal for the session
    Stopped {
        cause: ScopeError,
        snapshot: ChartSnapshot,
    },
}

/// Per-tick frame updater
///
/// Each tick reads at most ONE line from the transport, regardless of how
/// many lines the device has queued, so the visual scroll rate tracks the
/// external tick source rather than data arrival. The read suspends until
/// a line is available; a quiet device therefore delays frames rather than
/// producing empty ones. Once the transport closes, the updater is stopped
/// for good and every further tick reports [`FrameOutcome::Stopped`]
/// without reading.
pub struct FrameUpdater<S: LineSource> {
    source: S,
    buffer: TelemetryBuffer,
    stopped: bool,
}

impl<S: LineSource> FrameUpdater<S> {
    /// Create an updater driving `buffer` from `source`
    pub fn new(source: S, buffer: TelemetryBuffer) -> Self {
        Self {
            source,
            buffer,
            stopped: false,
        }
    }

    /// Whether the transport has closed
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Current window contents without advancing anything
    pub fn snapshot(&self) -> ChartSnapshot {
        self.buffer.snapshot()
    }

    /// Advance the window by at most one record
    ///
    /// Suspends until the transport yields a line, the transport closes,
    /// or the caller cancels the pending read (the tick loop races this
    /// future against the interrupt signal).
    pub async fn tick(&mut self) -> FrameOutcome {
        if self.stopped {
            return FrameOutcome::Stopped {
                cause: ScopeError::TransportClosed("updater already stopped".to_string()),
                snapshot: self.buffer.snapshot(),
            };
        }

        let line = match self.source.next_line().await {
            Ok(line) => line,
            Err(cause) => {
                self.stopped = true;
                return FrameOutcome::Stopped {
                    cause,
                    snapshot: self.buffer.snapshot(),
                };
            }
        };

        match parse_line(&line) {
            Ok(record) => {
                self.buffer.apply(&record);
                debug!("Applied record {:?}", record);
                FrameOutcome::Applied {
                    record,
                    snapshot: self.buffer.snapshot(),
                }
            }
            Err(rejection) => {
                warn!("Rejected line {:?}: {}", rejection.line(), rejection);
                FrameOutcome::Rejected {
                    rejection,
                    snapshot: self.buffer.snapshot(),
                }
            }
        }
    }

    /// Flush and release the transport
    pub async fn shutdown(mut self) -> crate::error::Result<()> {
        self.source.shutdown().await
    }
}
