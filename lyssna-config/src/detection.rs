//! Detection threshold coefficients and pattern-length parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tuning for the window-energy matcher.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DetectionConfig {
    /// Length of one energy window in milliseconds.
    #[serde(default = "default_window_ms")]
    #[validate(range(min = 10, max = 5000))]
    pub window_ms: u64,

    /// Relative tolerance when comparing a window value against the
    /// fingerprint (0 means exact match).
    #[serde(default = "default_tolerance")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub tolerance: f64,

    /// Reference values at or below this level count as silence when
    /// scaling the tolerance.
    #[serde(default = "default_silence_floor")]
    #[validate(range(min = 1e-9, max = 1.0))]
    pub silence_floor: f64,

    /// Shortest fingerprint, in windows, a capture run accepts.
    #[serde(default = "default_min_pattern_windows")]
    #[validate(range(min = 1, max = 1024))]
    pub min_pattern_windows: usize,
}

fn default_window_ms() -> u64 {
    100
}

fn default_tolerance() -> f64 {
    0.15
}

fn default_silence_floor() -> f64 {
    1e-4
}

fn default_min_pattern_windows() -> usize {
    3
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            tolerance: default_tolerance(),
            silence_floor: default_silence_floor(),
            min_pattern_windows: default_min_pattern_windows(),
        }
    }
}
