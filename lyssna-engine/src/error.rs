//! Engine error conditions.

use thiserror::Error;
use tokio::task::JoinError;

use lyssna_config::ConfigError;
use lyssna_core::JobError;
use lyssna_detection::DetectError;
use lyssna_input::InputError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("job error: {0}")]
    Job(#[from] JobError),

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("detection error: {0}")]
    Detect(#[from] DetectError),

    #[error("worker task failed: {0}")]
    Join(#[from] JoinError),

    #[error("action is capture, but no sample file was given")]
    MissingSampleFile,

    #[error("manual mode needs a channel or file name")]
    MissingSource,
}
