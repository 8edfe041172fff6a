//! # View Configuration
//!
//! Tuning values shared by the pipeline, the selector and the capture flow.
//!
//! ```rust
//! use pm_core::config::ViewConfig;
//!
//! let config = ViewConfig::default();
//! assert_eq!(config.top_k, 3);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::zone::{DEFAULT_PITCH_LENGTH, NORMALIZED_LENGTH};
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Zone length for raw metre coordinates
    pub pitch_length: f64,
    /// Zone length for normalized coordinates
    pub normalized_length: f64,
    /// Candidates shown for a selected play, and humming results kept
    pub top_k: usize,
    /// Zone coverage entries shown per play
    pub max_zone_labels: usize,
    /// Elapsed-time tick period while recording
    pub tick_interval_secs: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            pitch_length: DEFAULT_PITCH_LENGTH,
            normalized_length: NORMALIZED_LENGTH,
            top_k: 3,
            max_zone_labels: 3,
            tick_interval_secs: 1,
        }
    }
}

impl ViewConfig {
    /// Single best candidate, single zone label.
    pub fn compact() -> Self {
        Self {
            top_k: 1,
            max_zone_labels: 1,
            ..Self::default()
        }
    }

    /// Load from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AnalysisError::MissingFile(path.display().to_string()),
            _ => AnalysisError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;
        let config: ViewConfig =
            serde_json::from_str(&text).map_err(|e| AnalysisError::InvalidJson {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pitch_length.is_nan() || self.pitch_length <= 0.0 {
            return Err(AnalysisError::InvalidField {
                field: "pitch_length".into(),
                reason: "must be positive".into(),
            });
        }
        if self.normalized_length.is_nan() || self.normalized_length <= 0.0 {
            return Err(AnalysisError::InvalidField {
                field: "normalized_length".into(),
                reason: "must be positive".into(),
            });
        }
        if self.top_k == 0 {
            return Err(AnalysisError::InvalidField {
                field: "top_k".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.tick_interval_secs == 0 {
            return Err(AnalysisError::InvalidField {
                field: "tick_interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Copy with the raw pitch length taken from the backend run, when it reported one.
    pub fn with_pitch_length(&self, pitch_length: Option<f64>) -> Self {
        let mut cfg = self.clone();
        if let Some(len) = pitch_length.filter(|l| *l > 0.0) {
            cfg.pitch_length = len;
        }
        cfg
    }
}
