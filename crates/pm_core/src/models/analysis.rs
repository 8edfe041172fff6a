//! Tactical analysis response: two match datasets plus the similarity matrix.

use serde::{Deserialize, Serialize};

use super::play::{MatchSide, Play, PlayId};
use super::similarity::SimilarityRecord;
use crate::error::{AnalysisError, Result};

/// Parameters the backend ran the analysis with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisConfiguration {
    #[serde(default)]
    pub lookahead_frames: Option<u32>,
    #[serde(default)]
    pub max_radius: Option<f64>,
    #[serde(default)]
    pub min_passes: Option<u32>,
    #[serde(default)]
    pub pitch_length: Option<f64>,
    #[serde(default)]
    pub pitch_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaysBlock {
    #[serde(default)]
    pub total_plays: Option<usize>,
    #[serde(default)]
    pub min_passes_filter: Option<u32>,
    pub plays_data: Vec<Play>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MatchAnalysis {
    pub plays: PlaysBlock,
}

impl MatchAnalysis {
    pub fn plays(&self) -> &[Play] {
        &self.plays.plays_data
    }

    pub fn find_play(&self, play_id: PlayId) -> Option<&Play> {
        self.plays.plays_data.iter().find(|p| p.play_id == play_id)
    }
}

/// Full backend response. Constructed wholesale, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub configuration: AnalysisConfiguration,
    pub match1: MatchAnalysis,
    pub match2: MatchAnalysis,
    pub similarities: Vec<SimilarityRecord>,
}

impl TacticalAnalysis {
    /// Parse and shape-check a backend body.
    ///
    /// Missing `match1`/`match2`/`similarities` (or a match without
    /// `plays.plays_data`) is reported as `MissingKey`.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        for key in ["match1", "match2", "similarities"] {
            if value.get(key).is_none() {
                return Err(AnalysisError::MissingKey(key.to_string()));
            }
        }
        for side in [MatchSide::Match1, MatchSide::Match2] {
            let plays = &value[side.key()]["plays"];
            if plays.is_null() {
                return Err(AnalysisError::MissingKey(format!("{}.plays", side.key())));
            }
            if plays.get("plays_data").is_none() {
                return Err(AnalysisError::MissingKey(format!(
                    "{}.plays.plays_data",
                    side.key()
                )));
            }
        }

        serde_json::from_value(value).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }

    pub fn dataset(&self, side: MatchSide) -> &MatchAnalysis {
        match side {
            MatchSide::Match1 => &self.match1,
            MatchSide::Match2 => &self.match2,
        }
    }

    pub fn find_play(&self, side: MatchSide, play_id: PlayId) -> Option<&Play> {
        self.dataset(side).find_play(play_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> String {
        serde_json::json!({
            "success": true,
            "session_id": "abc",
            "configuration": {"lookahead_frames": 3, "min_passes": 3, "pitch_length": 105.0},
            "match1": {"plays": {"total_plays": 1, "plays_data": [
                {"play_id": 0, "team": "home", "num_passes": 1, "passes": [
                    {"passer_x": 1.0, "passer_y": 2.0, "receiver_x": 3.0, "receiver_y": 4.0}
                ]}
            ]}, "ball_tracking": {"total_frames": 10}},
            "match2": {"plays": {"plays_data": []}},
            "similarities": [{"play1_id": 0, "play2_id": 5, "similarity_score": 0.4}]
        })
        .to_string()
    }

    #[test]
    fn test_parse_full_response() {
        let analysis = TacticalAnalysis::from_json(&body()).unwrap();
        assert_eq!(analysis.session_id.as_deref(), Some("abc"));
        assert_eq!(analysis.configuration.pitch_length, Some(105.0));
        assert_eq!(analysis.match1.plays().len(), 1);
        assert!(analysis.find_play(MatchSide::Match1, 0).is_some());
        assert!(analysis.find_play(MatchSide::Match2, 0).is_none());
        assert_eq!(analysis.similarities.len(), 1);
    }

    #[test]
    fn test_missing_top_level_key() {
        let err = TacticalAnalysis::from_json(r#"{"match1": {}, "match2": {}}"#).unwrap_err();
        assert_eq!(err, AnalysisError::MissingKey("similarities".into()));
    }

    #[test]
    fn test_missing_plays_data() {
        let body = r#"{"match1": {"plays": {}}, "match2": {"plays": {"plays_data": []}}, "similarities": []}"#;
        let err = TacticalAnalysis::from_json(body).unwrap_err();
        assert_eq!(err, AnalysisError::MissingKey("match1.plays.plays_data".into()));
    }

    #[test]
    fn test_not_json() {
        let err = TacticalAnalysis::from_json("<html>").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }
}
