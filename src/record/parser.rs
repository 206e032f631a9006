//! # Line Parser
//!
//! Converts raw serial lines into validated telemetry records.

use super::types::{Rejection, TelemetryRecord, RECORD_FIELD_COUNT};

/// Parse one raw line into a telemetry record
///
/// Tokenizes the entire line on whitespace and converts the three fields
/// to floats in wire order: `<channel A> <channel B> <ordering>`.
///
/// Convertibility is the only numeric check performed here. Non-finite
/// values the standard parser accepts (`nan`, `inf`) pass through
/// unmodified; what to do with them is the frontend's decision.
///
/// # Arguments
///
/// * `line` - Raw line text, trailing newline already stripped
///
/// # Returns
///
/// * `Ok(TelemetryRecord)` on a well-formed line
/// * `Err(Rejection)` on a malformed line (non-fatal, state untouched)
///
/// # Examples
///
/// ```
/// use serial_scope::record::parser::parse_line;
///
/// let record = parse_line("412.0 87.0 1536.25").unwrap();
/// assert_eq!(record.channel_a, 412.0);
/// assert_eq!(record.channel_b, 87.0);
/// assert_eq!(record.ordering, 1536.25);
///
/// assert!(parse_line("412.0 87.0").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<TelemetryRecord, Rejection> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() != RECORD_FIELD_COUNT {
        return Err(Rejection::FieldCountMismatch {
            count: fields.len(),
            line: line.to_string(),
        });
    }

    let mut values = [0.0f64; RECORD_FIELD_COUNT];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field.parse().map_err(|_| Rejection::NumericConversionFailure {
            field: (*field).to_string(),
            line: line.to_string(),
        })?;
    }

    Ok(TelemetryRecord {
        channel_a: values[0],
        channel_b: values[1],
        ordering: values[2],
    })
}
