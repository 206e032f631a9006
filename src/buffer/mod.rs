//! # Rolling Buffer Module
//!
//! Fixed-capacity rolling sample storage for the live chart.
//!
//! This module handles:
//! - Drop-oldest insertion with the newest sample at the head
//! - Atomic three-channel record application
//! - Index-aligned snapshots for the renderer

pub mod channel;
pub mod window;
