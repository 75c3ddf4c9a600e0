//! Captured-fingerprint file parsing.
//!
//! `lyssna -a dump` emits one window value per line; this module reads that
//! format back for capture runs. Blank lines and `#` comments are skipped.

use std::fs;
use std::path::Path;

use crate::ConfigError;

/// Loads the fingerprint value sequence from a sample file.
///
/// A missing file or a line that does not parse as a number is an error;
/// there is no empty-sequence fallback, the caller decides what a usable
/// fingerprint looks like.
pub fn load(path: &Path) -> Result<Vec<f64>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    parse(&text).map_err(|line| ConfigError::Fingerprint {
        path: path.to_path_buf(),
        line,
    })
}

fn parse(text: &str) -> Result<Vec<f64>, usize> {
    let mut values = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let value: f64 = line.parse().map_err(|_| idx + 1)?;
        values.push(value);
    }
    Ok(values)
}
