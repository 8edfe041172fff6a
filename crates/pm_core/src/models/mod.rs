//! # Models
//!
//! Data shapes crossing the backend boundary.
//!
//! - `play` - pass events and plays
//! - `similarity` - play-to-play similarity records
//! - `analysis` - full tactical analysis response
//! - `song` - humming match results and song library entries

pub mod analysis;
pub mod play;
pub mod similarity;
pub mod song;

pub use analysis::{AnalysisConfiguration, MatchAnalysis, PlaysBlock, TacticalAnalysis};
pub use play::{MatchSide, PassEvent, Play, PlayId};
pub use similarity::SimilarityRecord;
pub use song::{Confidence, QueryInfo, SongListResponse, SongMatch, SongMatchResponse, SongSummary};
