//! Detection-engine error conditions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("input failure: {0}")]
    Input(#[from] lyssna_input::InputError),

    /// The source reported parameters no worker can run against.
    #[error("unusable stream: {0}")]
    BadStream(String),
}
