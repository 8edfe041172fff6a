//! # pm_core - Play Comparison and Humming Match Core
//!
//! Client-side logic for two backend-driven views:
//! tactical play comparison between two matches, and humming-based song
//! identification. The backend does the signal processing; this crate turns
//! its results into something a view can draw and keeps the views in sync.
//!
//! ## Features
//! - Per-play pass chaining and 0-100 normalization
//! - Pitch-third zone tagging, distance/direction metrics
//! - Top-K similarity candidate selection with stable tie order
//! - Shared publish/subscribe selection store
//! - Capture/upload state machine for humming submissions

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod analysis;
pub mod api;
pub mod capture;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod workspace;

pub use analysis::{
    build_pass_chain, normalize_passes, select_candidates, Candidate, ComparisonMetrics,
    PassDirection, PitchThird, PlayMetrics, PlayView,
};
pub use capture::{CaptureDevice, CaptureOrchestrator, CaptureState, Submission};
pub use config::ViewConfig;
pub use error::{AnalysisError, ErrorKind, Result};
pub use models::{MatchSide, PassEvent, Play, PlayId, SimilarityRecord, TacticalAnalysis};
pub use state::{SelectionState, SelectionStore, SelectionUpdate, Subscription};
pub use workspace::TacticalWorkspace;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
