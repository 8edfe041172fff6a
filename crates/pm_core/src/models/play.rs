//! Pass events and plays as delivered by the tactical analysis backend.
//!
//! Coordinates are in whatever unit the source dataset uses. Nothing here
//! assumes fixed pitch dimensions; see `analysis::geometry` for the per-play
//! rescale into 0-100 space.

use serde::{Deserialize, Serialize};

/// Play identifier, unique within one match dataset.
pub type PlayId = u32;

/// Which uploaded match a play belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchSide {
    Match1,
    Match2,
}

impl MatchSide {
    pub fn opposite(self) -> Self {
        match self {
            MatchSide::Match1 => MatchSide::Match2,
            MatchSide::Match2 => MatchSide::Match1,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MatchSide::Match1 => "match1",
            MatchSide::Match2 => "match2",
        }
    }
}

/// A single origin -> destination movement event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passer_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<u64>,
    pub passer_x: f64,
    pub passer_y: f64,
    pub receiver_x: f64,
    pub receiver_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// "successful" / "intercepted" etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    /// Seconds from the start of the match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_time: Option<f64>,
}

impl PassEvent {
    /// Bare event with only coordinates set.
    pub fn new(passer: (f64, f64), receiver: (f64, f64)) -> Self {
        Self {
            passer_id: None,
            receiver_id: None,
            passer_x: passer.0,
            passer_y: passer.1,
            receiver_x: receiver.0,
            receiver_y: receiver.1,
            team: None,
            outcome: None,
            frame_time: None,
        }
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.passer_x, self.passer_y)
    }

    pub fn destination(&self) -> (f64, f64) {
        (self.receiver_x, self.receiver_y)
    }

    /// Displacement vector (dx, dy) from origin to destination.
    pub fn delta(&self) -> (f64, f64) {
        (self.receiver_x - self.passer_x, self.receiver_y - self.passer_y)
    }
}

/// One discrete sequence of passes by one team. Array order is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub play_id: PlayId,
    #[serde(default)]
    pub team: Option<String>,
    /// Seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_passes: Option<usize>,
    #[serde(default)]
    pub passes: Vec<PassEvent>,
}

impl Play {
    pub fn new(play_id: PlayId, passes: Vec<PassEvent>) -> Self {
        Self {
            play_id,
            team: None,
            duration: 0.0,
            num_passes: None,
            passes,
        }
    }

    /// Number of passes actually present (the backend's `num_passes` is advisory).
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Duration clamped to zero; negative values in the payload are treated as unknown.
    pub fn duration_secs(&self) -> f64 {
        self.duration.max(0.0)
    }

    pub fn team_label(&self) -> &str {
        self.team.as_deref().unwrap_or("unknown")
    }
}
