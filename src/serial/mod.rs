//! # Serial Transport Module
//!
//! Line-oriented serial input from the telemetry device.
//!
//! This module handles:
//! - Opening the device at a configured baud rate (8N1, no flow control)
//! - Buffered async line reads with lossy UTF-8 decoding
//! - Flush-and-release shutdown
//!
//! The core never chooses connection parameters: the device path comes
//! from the CLI and the baud rate from configuration.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info};

use crate::error::{Result, ScopeError};

pub mod line_source;

use line_source::LineSource;

/// Default baud rate for line-delimited telemetry firmware
pub const DEFAULT_BAUD_RATE: u32 = 9_600;

/// UART baud rates the configuration accepts
pub const SUPPORTED_BAUD_RATES: &[u32] =
    &[4_800, 9_600, 19_200, 38_400, 57_600, 115_200, 230_400];

/// Serial line source
///
/// Wraps the device stream in a buffered reader and yields one decoded
/// line per read.
pub struct SerialLineSource {
    /// Buffered serial port handle
    reader: BufReader<tokio_serial::SerialStream>,
    /// Device path (e.g., /dev/ttyUSB0)
    device_path: String,
}

impl std::fmt::Debug for SerialLineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLineSource")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl SerialLineSource {
    /// Open the telemetry device
    ///
    /// # Arguments
    ///
    /// * `path` - Device path (e.g., "/dev/ttyUSB0")
    /// * `baud_rate` - Line speed; the telemetry firmware default is 9600
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use serial_scope::serial::{SerialLineSource, DEFAULT_BAUD_RATE};
    ///
    /// fn main() -> anyhow::Result<()> {
    ///     let source = SerialLineSource::open("/dev/ttyUSB0", DEFAULT_BAUD_RATE)?;
    ///     println!("reading from {}", source.device_path());
    ///     Ok(())
    /// }
    /// ```
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        debug!("Opening serial port {} at {} baud", path, baud_rate);

        let port = tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| ScopeError::Serial(format!("Failed to open {}: {}", path, e)))?;

        info!("Opened telemetry device at {}", path);
        Ok(Self {
            reader: BufReader::new(port),
            device_path: path.to_string(),
        })
    }

    /// Get the device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

#[async_trait]
impl LineSource for SerialLineSource {
    async fn next_line(&mut self) -> Result<String> {
        let mut raw = Vec::new();
        let read = self.reader.read_until(b'\n', &mut raw).await?;

        if read == 0 {
            return Err(ScopeError::TransportClosed(format!(
                "{}: end of stream",
                self.device_path
            )));
        }

        // Undecodable bytes become a malformed line for the parser to
        // reject, not a transport failure.
        let line = String::from_utf8_lossy(&raw);
        Ok(line
            .trim_end_matches(|c| c == '\r' || c == '\n')
            .to_string())
    }

    async fn shutdown(&mut self) -> Result<()> {
        self.reader.get_mut().flush().await?;
        debug!("Serial port {} flushed and released", self.device_path);
        Ok(())
    }
}
