//! # Telemetry Record Module
//!
//! Line-delimited telemetry record parsing and validation.
//!
//! This module handles:
//! - Tokenizing raw serial lines into whitespace-separated fields
//! - Converting all three fields to floating-point samples
//! - Classifying malformed lines as non-fatal rejections

pub mod parser;
pub mod types;
