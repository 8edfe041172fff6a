//! # Zone Classifier
//!
//! Three equal longitudinal thirds: `[0, L/3)` defensive, `[L/3, 2L/3)`
//! middle, `[2L/3, L]` attacking. `L` is 105 for raw metre coordinates and
//! 100 for normalized percentages; callers pick one scale and stick to it.

use serde::{Deserialize, Serialize};

use super::geometry::NormalizedPass;
use crate::models::PassEvent;

/// Default length for raw metre coordinates.
pub const DEFAULT_PITCH_LENGTH: f64 = 105.0;

/// Length of the normalized 0-100 space.
pub const NORMALIZED_LENGTH: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchThird {
    Defensive,
    Middle,
    Attacking,
}

impl PitchThird {
    /// Classify `x` against a pitch of `length`.
    pub fn classify(x: f64, length: f64) -> Self {
        let third = length / 3.0;
        if x < third {
            PitchThird::Defensive
        } else if x < 2.0 * third {
            PitchThird::Middle
        } else {
            PitchThird::Attacking
        }
    }

    /// Classify an already-normalized 0-100 value.
    pub fn of_normalized(x: f64) -> Self {
        Self::classify(x, NORMALIZED_LENGTH)
    }

    pub fn key(self) -> &'static str {
        match self {
            PitchThird::Defensive => "defensive",
            PitchThird::Middle => "middle",
            PitchThird::Attacking => "attacking",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            PitchThird::Defensive => "Defensive",
            PitchThird::Middle => "Midfield",
            PitchThird::Attacking => "Attack",
        }
    }
}

impl std::fmt::Display for PitchThird {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Distinct zones touched by a play, in order of first appearance, capped at `limit`.
///
/// Each pass contributes its origin zone then its destination zone. `length`
/// is the normalized scale, normally `NORMALIZED_LENGTH`.
pub fn zones_covered(passes: &[NormalizedPass], length: f64, limit: usize) -> Vec<PitchThird> {
    first_seen(
        passes
            .iter()
            .flat_map(|p| [p.passer_x_norm, p.receiver_x_norm]),
        length,
        limit,
    )
}

/// Same as [`zones_covered`] on raw coordinates against a pitch of `pitch_length`.
pub fn pitch_zones_covered(passes: &[PassEvent], pitch_length: f64, limit: usize) -> Vec<PitchThird> {
    first_seen(
        passes.iter().flat_map(|p| [p.passer_x, p.receiver_x]),
        pitch_length,
        limit,
    )
}

fn first_seen(xs: impl Iterator<Item = f64>, length: f64, limit: usize) -> Vec<PitchThird> {
    let mut zones: Vec<PitchThird> = Vec::with_capacity(3);
    for x in xs {
        let zone = PitchThird::classify(x, length);
        if !zones.contains(&zone) {
            zones.push(zone);
        }
    }
    zones.truncate(limit);
    zones
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::geometry::normalize_passes;

    #[test]
    fn test_boundaries() {
        let l = DEFAULT_PITCH_LENGTH;
        assert_eq!(PitchThird::classify(0.0, l), PitchThird::Defensive);
        assert_eq!(PitchThird::classify(l / 3.0, l), PitchThird::Middle);
        assert_eq!(PitchThird::classify(2.0 * l / 3.0, l), PitchThird::Attacking);
        assert_eq!(PitchThird::classify(l, l), PitchThird::Attacking);

        assert_eq!(PitchThird::classify(34.9, l), PitchThird::Defensive);
        assert_eq!(PitchThird::classify(35.0, l), PitchThird::Middle);
        assert_eq!(PitchThird::of_normalized(100.0), PitchThird::Attacking);
        assert_eq!(PitchThird::of_normalized(33.3), PitchThird::Defensive);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PitchThird::Defensive.label(), "Defensive");
        assert_eq!(PitchThird::Middle.label(), "Midfield");
        assert_eq!(PitchThird::Attacking.label(), "Attack");
        assert_eq!(PitchThird::Middle.key(), "middle");
        assert_eq!(PitchThird::Attacking.to_string(), "Attack");
    }

    #[test]
    fn test_zones_covered_order_and_cap() {
        // x goes 50 -> 100 -> 0: middle, attacking, defensive
        let passes = vec![
            PassEvent::new((50.0, 0.0), (100.0, 0.0)),
            PassEvent::new((100.0, 0.0), (0.0, 0.0)),
        ];
        let norm = normalize_passes(&passes);
        assert_eq!(
            zones_covered(&norm, NORMALIZED_LENGTH, 3),
            vec![PitchThird::Middle, PitchThird::Attacking, PitchThird::Defensive]
        );
        assert_eq!(zones_covered(&norm, NORMALIZED_LENGTH, 1), vec![PitchThird::Middle]);
        assert!(zones_covered(&[], NORMALIZED_LENGTH, 3).is_empty());
    }

    #[test]
    fn test_pitch_zones_depend_on_length() {
        let passes = vec![
            PassEvent::new((10.0, 0.0), (50.0, 0.0)),
            PassEvent::new((50.0, 0.0), (90.0, 0.0)),
        ];
        assert_eq!(
            pitch_zones_covered(&passes, DEFAULT_PITCH_LENGTH, 3),
            vec![PitchThird::Defensive, PitchThird::Middle, PitchThird::Attacking]
        );
        assert_eq!(
            pitch_zones_covered(&passes, 1000.0, 3),
            vec![PitchThird::Defensive]
        );
    }
}
