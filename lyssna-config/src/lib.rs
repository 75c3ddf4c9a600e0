//! # lyssna Configuration System
//!
//! Configuration loading for the lyssna toolkit. The operator points the
//! binary at one YAML file holding detection threshold coefficients and
//! pattern-length parameters; the loaded value is immutable for the rest of
//! the run and shared read-only by every worker.
//!
//! ## Features
//! - **Single source of truth**: one `LyssnaConfig` across all components
//! - **Validation**: every parameter range-checked at load time
//! - **Environment overrides**: `LYSSNA_*` variables win over the file

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod detection;
mod error;
pub mod fingerprint;
mod input;

pub use detection::DetectionConfig;
pub use error::ConfigError;
pub use input::InputConfig;

/// Top-level configuration container for all lyssna components.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct LyssnaConfig {
    /// Detection threshold coefficients and pattern-length parameters.
    #[validate(nested)]
    pub detection: DetectionConfig,

    /// Input-driver parameters (chunk sizing, discovery polling).
    #[validate(nested)]
    pub input: InputConfig,
}

impl LyssnaConfig {
    /// Load configuration from the operator-supplied file.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. The YAML file at `path` (mandatory; missing is an error)
    /// 3. `LYSSNA_*` environment variables (`__` separates nesting)
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Figment::from(Serialized::defaults(LyssnaConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("LYSSNA_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_validates() {
        let config = LyssnaConfig::default();
        config.validate().expect("default config should validate");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = LyssnaConfig::load_from_path("/nonexistent/lyssna.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "detection:\n  window_ms: 250\n  tolerance: 0.3").unwrap();

        let config = LyssnaConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.detection.window_ms, 250);
        assert!((config.detection.tolerance - 0.3).abs() < 1e-12);
        // Untouched sections keep their defaults.
        assert_eq!(config.input.poll_interval_ms, 500);
    }

    #[test]
    fn out_of_range_tolerance_fails_validation() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "detection:\n  tolerance: 7.5").unwrap();

        let err = LyssnaConfig::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
