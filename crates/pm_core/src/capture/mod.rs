//! # Capture Module
//!
//! Humming capture and upload lifecycle.

pub mod device;
pub mod orchestrator;

pub use device::{CaptureDevice, MemoryDevice};
pub use orchestrator::{
    CaptureOrchestrator, CaptureState, MatchResults, SongMatcher, Submission, SubmissionTicket,
};
