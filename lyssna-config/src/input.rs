//! Input-driver parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Knobs shared by every input driver.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct InputConfig {
    /// How often the automatic monitor polls for channels, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    #[validate(range(min = 50, max = 60000))]
    pub poll_interval_ms: u64,

    /// Frames a worker requests from its source per read.
    #[serde(default = "default_chunk_frames")]
    #[validate(range(min = 64, max = 1048576))]
    pub chunk_frames: usize,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_chunk_frames() -> usize {
    4096
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            chunk_frames: default_chunk_frames(),
        }
    }
}
