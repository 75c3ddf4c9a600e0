//! Parameter bundle construction.

use std::path::Path;

use tracing::debug;

use lyssna_config::{fingerprint, LyssnaConfig};
use lyssna_core::{Action, DetectJob};

use crate::EngineError;

/// Builds the per-action job every worker of the run shares.
///
/// Capture loads the previously captured fingerprint from the sample file;
/// a missing, malformed, or too-short fingerprint is fatal here, before any
/// worker exists. There is no empty-payload fallback.
pub fn build_job(
    action: Action,
    sample_path: Option<&Path>,
    config: &LyssnaConfig,
) -> Result<DetectJob, EngineError> {
    match action {
        Action::Dump => Ok(DetectJob::Dump),
        Action::Capture => {
            let path = sample_path.ok_or(EngineError::MissingSampleFile)?;
            debug!(path = %path.display(), "loading captured fingerprint");
            let values = fingerprint::load(path)?;
            Ok(DetectJob::capture(
                values,
                config.detection.min_pattern_windows,
            )?)
        }
    }
}
