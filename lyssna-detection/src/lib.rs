//! # lyssna-detection
//!
//! The detection engine: reduces a mono sample stream to window-energy
//! values and either emits them (dump) or compares them against a captured
//! fingerprint (capture). One worker per bound stream; the worker loop is
//! synchronous and blocking, scheduled by the dispatcher that owns it.

mod error;
mod matcher;
mod window;
mod worker;

pub use error::DetectError;
pub use matcher::FingerprintMatcher;
pub use window::WindowAccumulator;
pub use worker::run_worker;
