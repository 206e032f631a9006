//! # Telemetry Record Types
//!
//! Core data types for the three-field telemetry stream.

use thiserror::Error;

/// Number of whitespace-separated fields in a well-formed telemetry line
pub const RECORD_FIELD_COUNT: usize = 3;

/// A validated three-field telemetry record
///
/// Wire order is `<channel A> <channel B> <ordering>`. The ordering field
/// is a timestamp-like monotone value supplied by the device firmware; the
/// record layer does not interpret it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRecord {
    /// First plotted value
    pub channel_a: f64,
    /// Second plotted value
    pub channel_b: f64,
    /// Timestamp-like ordering value
    pub ordering: f64,
}

/// Non-fatal parse rejection
///
/// Rejections are a normal, expected condition (line noise, truncated
/// lines, empty lines). They carry the offending raw line for diagnostic
/// reporting, not for retry, and leave all buffer state untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Rejection {
    /// Line did not split into exactly three fields
    #[error("expected 3 fields, got {count} in {line:?}")]
    FieldCountMismatch {
        /// Number of fields the line actually split into
        count: usize,
        /// The raw line as read from the transport
        line: String,
    },

    /// A field could not be converted to a floating-point number
    #[error("unparseable field {field:?} in {line:?}")]
    NumericConversionFailure {
        /// The first field that failed conversion
        field: String,
        /// The raw line as read from the transport
        line: String,
    },
}

impl Rejection {
    /// The offending raw line, for diagnostic reporting
    pub fn line(&self) -> &str {
        match self {
            Rejection::FieldCountMismatch { line, .. } => line,
            Rejection::NumericConversionFailure { line, .. } => line,
        }
    }
}
