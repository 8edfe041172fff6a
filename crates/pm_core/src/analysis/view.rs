//! # Play View
//!
//! Chain -> normalize -> zone/metrics for one play, the shape the pitch
//! canvas and the tables read.

use serde::Serialize;

use super::chain::build_pass_chain;
use super::geometry::{normalize_passes, NormalizedPass};
use super::metrics::{pass_distance, PassDirection, PlayMetrics};
use super::zone::{pitch_zones_covered, zones_covered, PitchThird};
use crate::config::ViewConfig;
use crate::models::{Play, PlayId};

/// One drawable pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassView {
    pub index: usize,
    #[serde(flatten)]
    pub normalized: NormalizedPass,
    pub origin_zone: PitchThird,
    pub destination_zone: PitchThird,
    /// Zones of the raw coordinates against `ViewConfig::pitch_length`
    pub origin_pitch_zone: PitchThird,
    pub destination_pitch_zone: PitchThird,
    pub distance: f64,
    pub direction: PassDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayView {
    pub play_id: PlayId,
    pub team: Option<String>,
    pub passes: Vec<PassView>,
    pub metrics: PlayMetrics,
    pub zones: Vec<PitchThird>,
    pub pitch_zones: Vec<PitchThird>,
}

impl PlayView {
    pub fn build(play: &Play, config: &ViewConfig) -> Self {
        let chained = build_pass_chain(&play.passes);
        let normalized = normalize_passes(&chained);
        let zones = zones_covered(&normalized, config.normalized_length, config.max_zone_labels);
        let pitch_zones = pitch_zones_covered(&chained, config.pitch_length, config.max_zone_labels);
        let metrics = PlayMetrics::from_passes(&chained, play.duration_secs());

        let passes = normalized
            .into_iter()
            .enumerate()
            .map(|(index, normalized)| {
                let pass = &normalized.pass;
                PassView {
                    index,
                    origin_zone: PitchThird::classify(
                        normalized.passer_x_norm,
                        config.normalized_length,
                    ),
                    destination_zone: PitchThird::classify(
                        normalized.receiver_x_norm,
                        config.normalized_length,
                    ),
                    origin_pitch_zone: PitchThird::classify(pass.passer_x, config.pitch_length),
                    destination_pitch_zone: PitchThird::classify(
                        pass.receiver_x,
                        config.pitch_length,
                    ),
                    distance: pass_distance(pass),
                    direction: PassDirection::of_pass(pass),
                    normalized,
                }
            })
            .collect();

        Self {
            play_id: play.play_id,
            team: play.team.clone(),
            passes,
            metrics,
            zones,
            pitch_zones,
        }
    }

    /// Zone labels joined for a table cell.
    pub fn zone_summary(&self) -> String {
        self.zones
            .iter()
            .map(|z| z.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Polyline vertices in normalized space: first origin, then every destination.
    pub fn polyline(&self) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.passes.len() + 1);
        if let Some(first) = self.passes.first() {
            points.push(first.normalized.origin_norm());
        }
        points.extend(self.passes.iter().map(|p| p.normalized.destination_norm()));
        points
    }
}
