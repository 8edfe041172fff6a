use serde::{Deserialize, Serialize};

use super::play::PlayId;

/// Scored association between one play of match 1 and one play of match 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub play1_id: PlayId,
    pub play2_id: PlayId,
    /// 0.0 - 1.0
    pub similarity_score: f64,
    #[serde(default)]
    pub play2_passes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play1_passes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtw_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_bonus: Option<f64>,
}

impl SimilarityRecord {
    pub fn new(play1_id: PlayId, play2_id: PlayId, similarity_score: f64) -> Self {
        Self {
            play1_id,
            play2_id,
            similarity_score,
            play2_passes: 0,
            play1_passes: None,
            dtw_distance: None,
            base_similarity: None,
            length_bonus: None,
        }
    }

    /// Score as a whole percentage for tables.
    pub fn score_percent(&self) -> f64 {
        (self.similarity_score.clamp(0.0, 1.0) * 100.0).round()
    }
}
