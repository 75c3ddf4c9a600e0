//! # lyssna Telemetry
//!
//! Structured logging for the lyssna binaries.

pub mod logging;
