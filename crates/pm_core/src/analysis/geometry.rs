//! # Geometry Normalizer
//!
//! Rescales a play's raw coordinates into a 0-100 percentage space, per axis,
//! using the bounding extent of every origin and destination in that play.
//! Two plays are never normalized against a shared extent.

use serde::{Deserialize, Serialize};

use crate::models::PassEvent;

/// Value used on an axis whose raw range is zero.
pub const AXIS_MIDPOINT: f64 = 50.0;

/// Per-axis extent of a pass set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    /// Bounding box over both endpoints of every pass. `None` for no passes.
    pub fn of_passes(passes: &[PassEvent]) -> Option<Self> {
        let first = passes.first()?;
        let mut extent = Extent {
            min_x: first.passer_x,
            max_x: first.passer_x,
            min_y: first.passer_y,
            max_y: first.passer_y,
        };
        for pass in passes {
            extent.include(pass.passer_x, pass.passer_y);
            extent.include(pass.receiver_x, pass.receiver_y);
        }
        Some(extent)
    }

    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn normalize_x(&self, x: f64) -> f64 {
        scale(x, self.min_x, self.max_x)
    }

    pub fn normalize_y(&self, y: f64) -> f64 {
        scale(y, self.min_y, self.max_y)
    }
}

fn scale(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 {
        return AXIS_MIDPOINT;
    }
    // clamp guards rounding at the extremes
    ((value - min) / range * 100.0).clamp(0.0, 100.0)
}

/// A pass with its 0-100 coordinates. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPass {
    pub pass: PassEvent,
    pub passer_x_norm: f64,
    pub passer_y_norm: f64,
    pub receiver_x_norm: f64,
    pub receiver_y_norm: f64,
}

impl NormalizedPass {
    pub fn origin_norm(&self) -> (f64, f64) {
        (self.passer_x_norm, self.passer_y_norm)
    }

    pub fn destination_norm(&self) -> (f64, f64) {
        (self.receiver_x_norm, self.receiver_y_norm)
    }
}

/// Normalize one play's passes against their own extent.
pub fn normalize_passes(passes: &[PassEvent]) -> Vec<NormalizedPass> {
    let Some(extent) = Extent::of_passes(passes) else {
        return Vec::new();
    };

    log::debug!(
        "normalize: {} passes, x [{:.2}, {:.2}], y [{:.2}, {:.2}]",
        passes.len(),
        extent.min_x,
        extent.max_x,
        extent.min_y,
        extent.max_y
    );

    passes
        .iter()
        .map(|pass| NormalizedPass {
            pass: pass.clone(),
            passer_x_norm: extent.normalize_x(pass.passer_x),
            passer_y_norm: extent.normalize_y(pass.passer_y),
            receiver_x_norm: extent.normalize_x(pass.receiver_x),
            receiver_y_norm: extent.normalize_y(pass.receiver_y),
        })
        .collect()
}
