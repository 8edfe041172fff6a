//! # Similarity Selector
//!
//! Ranks the backend similarity matrix for one selected match-1 play and
//! joins each retained record to its match-2 play.

use serde::Serialize;

use crate::models::{MatchAnalysis, Play, PlayId, SimilarityRecord};

/// Default candidate count.
pub const DEFAULT_TOP_K: usize = 3;

/// A ranked record plus the joined play, if the dataset has it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate<'a> {
    pub rank: usize,
    pub record: &'a SimilarityRecord,
    /// `None` when the backend referenced a play the dataset does not contain.
    pub play: Option<&'a Play>,
}

impl Candidate<'_> {
    pub fn play_id(&self) -> PlayId {
        self.record.play2_id
    }

    pub fn is_resolved(&self) -> bool {
        self.play.is_some()
    }
}

/// Records for `play1_id`, best first, at most `k`.
///
/// Equal scores keep their matrix order (`sort_by` is stable).
pub fn rank_records(
    matrix: &[SimilarityRecord],
    play1_id: PlayId,
    k: usize,
) -> Vec<&SimilarityRecord> {
    let mut ranked: Vec<&SimilarityRecord> =
        matrix.iter().filter(|r| r.play1_id == play1_id).collect();

    ranked.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
    ranked.truncate(k);
    ranked
}

/// Top `k` candidates for `play1_id`, joined against `opposite`.
pub fn select_candidates<'a>(
    matrix: &'a [SimilarityRecord],
    opposite: &'a MatchAnalysis,
    play1_id: PlayId,
    k: usize,
) -> Vec<Candidate<'a>> {
    let candidates: Vec<Candidate<'a>> = rank_records(matrix, play1_id, k)
        .into_iter()
        .enumerate()
        .map(|(idx, record)| Candidate {
            rank: idx + 1,
            record,
            play: opposite.find_play(record.play2_id),
        })
        .collect();

    let unresolved = candidates.iter().filter(|c| !c.is_resolved()).count();
    if unresolved > 0 {
        log::warn!(
            "play {}: {} candidate(s) reference plays missing from match 2",
            play1_id,
            unresolved
        );
    }
    log::debug!("play {}: {} candidate(s) selected", play1_id, candidates.len());

    candidates
}

/// Record linking a specific pair, if the matrix has one.
pub fn find_record(
    matrix: &[SimilarityRecord],
    play1_id: PlayId,
    play2_id: PlayId,
) -> Option<&SimilarityRecord> {
    matrix
        .iter()
        .find(|r| r.play1_id == play1_id && r.play2_id == play2_id)
}
