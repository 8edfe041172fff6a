//! Humming match and song library shapes.

use serde::{Deserialize, Serialize};

/// Backend confidence bucket for a song match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Same thresholds the matcher uses: > 0.7 high, > 0.5 medium.
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Confidence::High
        } else if score > 0.5 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Pitch statistics of the submitted humming clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryInfo {
    pub pitch_length: u64,
    /// 0.0 - 1.0
    pub valid_pitch_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMatch {
    pub song_id: String,
    #[serde(default = "unknown")]
    pub title: String,
    #[serde(default = "unknown")]
    pub artist: String,
    pub similarity_score: f64,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMatchResponse {
    pub query: QueryInfo,
    pub matches: Vec<SongMatch>,
}

impl SongMatchResponse {
    /// Parse a backend body, reporting missing top-level keys as data-shape errors.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| crate::AnalysisError::MalformedResponse(e.to_string()))?;
        for key in ["query", "matches"] {
            if value.get(key).is_none() {
                return Err(crate::AnalysisError::MissingKey(key.to_string()));
            }
        }
        serde_json::from_value(value)
            .map_err(|e| crate::AnalysisError::MalformedResponse(e.to_string()))
    }

    /// Keep the first `k` matches, preserving backend order.
    pub fn truncate(mut self, k: usize) -> Self {
        self.matches.truncate(k);
        self
    }
}

/// Song library listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub contour_length: u64,
    /// Seconds
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongListResponse {
    pub songs: Vec<SongSummary>,
}

fn unknown() -> String {
    "Unknown".to_string()
}
