//! # Telemetry Module
//!
//! Record logging to JSONL files with rotation.
//!
//! This module handles:
//! - Formatting applied records as JSONL (JSON Lines)
//! - Writing to rotating log files
//! - Managing file rotation (max N records per file)
//! - Retaining only the last M files

pub mod logger;
