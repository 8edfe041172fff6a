//! # Analysis Module
//!
//! Pure, synchronous play pipeline. Nothing here performs I/O or fails;
//! edge cases have defined values instead (midpoint on a zero range, zero
//! average on no passes, empty selection on no records).
//!
//! - `chain` - repair passes into one continuous polyline
//! - `geometry` - per-play rescale into 0-100 space
//! - `zone` - pitch thirds and zone coverage
//! - `metrics` - distances, direction, per-play and per-pair statistics
//! - `similarity` - top-K candidate selection from the similarity matrix
//! - `view` - the combined per-play model the views draw from

pub mod chain;
pub mod geometry;
pub mod metrics;
pub mod similarity;
pub mod view;
pub mod zone;

pub use chain::build_pass_chain;
pub use geometry::{normalize_passes, Extent, NormalizedPass};
pub use metrics::{
    average_distance, max_distance, pass_distance, total_distance, ComparisonMetrics,
    PassDirection, PlayMetrics,
};
pub use similarity::{find_record, rank_records, select_candidates, Candidate};
pub use view::{PassView, PlayView};
pub use zone::{pitch_zones_covered, zones_covered, PitchThird};
