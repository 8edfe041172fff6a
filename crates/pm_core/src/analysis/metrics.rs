//! # Metrics Aggregator
//!
//! Per-pass and per-play statistics in raw (non-normalized) units.
//! Everything is recomputed on demand and deterministic for identical input.

use serde::{Deserialize, Serialize};

use crate::models::{PassEvent, Play, SimilarityRecord};

/// Compass-like bucket of a pass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassDirection {
    Forward,
    Right,
    Left,
    Backward,
}

impl PassDirection {
    /// Bucket the vector `(dx, dy)` by its angle from the +x axis.
    ///
    /// `(-45, 45]` forward, `(45, 135]` right, `(-135, -45]` left, rest backward.
    /// +y points right when facing the attacking direction (screen coordinates).
    /// A zero vector is forward.
    pub fn from_delta(dx: f64, dy: f64) -> Self {
        let angle = dy.atan2(dx).to_degrees();
        if angle > -45.0 && angle <= 45.0 {
            PassDirection::Forward
        } else if angle > 45.0 && angle <= 135.0 {
            PassDirection::Right
        } else if angle > -135.0 && angle <= -45.0 {
            PassDirection::Left
        } else {
            PassDirection::Backward
        }
    }

    pub fn of_pass(pass: &PassEvent) -> Self {
        let (dx, dy) = pass.delta();
        Self::from_delta(dx, dy)
    }

    pub fn label(self) -> &'static str {
        match self {
            PassDirection::Forward => "Forward",
            PassDirection::Right => "Right",
            PassDirection::Left => "Left",
            PassDirection::Backward => "Backward",
        }
    }
}

/// Euclidean origin -> destination distance.
pub fn pass_distance(pass: &PassEvent) -> f64 {
    let (dx, dy) = pass.delta();
    (dx * dx + dy * dy).sqrt()
}

/// Mean pass distance; 0 for no passes.
pub fn average_distance(passes: &[PassEvent]) -> f64 {
    if passes.is_empty() {
        return 0.0;
    }
    total_distance(passes) / passes.len() as f64
}

/// Longest pass; 0 for no passes.
pub fn max_distance(passes: &[PassEvent]) -> f64 {
    passes.iter().map(pass_distance).fold(0.0, f64::max)
}

pub fn total_distance(passes: &[PassEvent]) -> f64 {
    passes.iter().map(pass_distance).sum()
}

/// Summary row for one play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayMetrics {
    pub pass_count: usize,
    pub average_distance: f64,
    pub max_distance: f64,
    pub total_distance: f64,
    /// Seconds
    pub duration: f64,
    pub distances: Vec<f64>,
}

impl PlayMetrics {
    /// Metrics over an explicit pass sequence (usually the chained passes).
    pub fn from_passes(passes: &[PassEvent], duration: f64) -> Self {
        Self {
            pass_count: passes.len(),
            average_distance: average_distance(passes),
            max_distance: max_distance(passes),
            total_distance: total_distance(passes),
            duration: duration.max(0.0),
            distances: passes.iter().map(pass_distance).collect(),
        }
    }

    pub fn of_play(play: &Play) -> Self {
        Self::from_passes(&play.passes, play.duration_secs())
    }

    /// Passes per second; 0 when the duration is unknown.
    pub fn tempo(&self) -> f64 {
        if self.duration > 0.0 {
            self.pass_count as f64 / self.duration
        } else {
            0.0
        }
    }
}

/// Side-by-side statistics for a selected play pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub play1: PlayMetrics,
    pub play2: PlayMetrics,
    pub similarity_score: Option<f64>,
    /// play2 - play1
    pub pass_count_delta: i64,
    /// play2 - play1
    pub average_distance_delta: f64,
    /// play2 - play1
    pub total_distance_delta: f64,
    /// play2 - play1
    pub duration_delta: f64,
}

impl ComparisonMetrics {
    pub fn new(play1: PlayMetrics, play2: PlayMetrics, record: Option<&SimilarityRecord>) -> Self {
        Self {
            similarity_score: record.map(|r| r.similarity_score),
            pass_count_delta: play2.pass_count as i64 - play1.pass_count as i64,
            average_distance_delta: play2.average_distance - play1.average_distance,
            total_distance_delta: play2.total_distance - play1.total_distance,
            duration_delta: play2.duration - play1.duration,
            play1,
            play2,
        }
    }
}
