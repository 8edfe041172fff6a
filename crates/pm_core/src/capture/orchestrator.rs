//! Capture/Upload Orchestrator
//!
//! `Idle -> Recording -> Submitting -> Idle`, plus `Idle -> Submitting` for a
//! file upload. The host performs the request for each `Submission` and
//! reports back through `complete` with the submission's ticket.
//!
//! Only one submission is tracked. `start` and `upload` while submitting are
//! rejected with `Busy`, and a completion whose ticket is not the pending one
//! is dropped without touching the displayed results.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::device::CaptureDevice;
use crate::api::{parse_response, SongMatchRequest, UploadedFile};
use crate::config::ViewConfig;
use crate::error::{AnalysisError, Result};
use crate::models::SongMatchResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
    Submitting,
}

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

/// Work handed to the host: send `request`, then call `complete` with `ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub request: SongMatchRequest,
}

/// Backend seam for hosts that run the request inline.
pub trait SongMatcher {
    fn match_humming(&mut self, request: &SongMatchRequest) -> Result<SongMatchResponse>;
}

/// Last successful ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResults {
    pub response: SongMatchResponse,
    pub received_at: DateTime<Utc>,
}

pub struct CaptureOrchestrator<D: CaptureDevice> {
    device: D,
    top_k: usize,
    tick_interval: Duration,
    state: CaptureState,
    elapsed_secs: u64,
    next_ticket: u64,
    pending: Option<SubmissionTicket>,
    results: Option<MatchResults>,
    last_error: Option<AnalysisError>,
}

impl<D: CaptureDevice> CaptureOrchestrator<D> {
    pub fn new(device: D, config: &ViewConfig) -> Self {
        Self {
            device,
            top_k: config.top_k,
            tick_interval: Duration::from_secs(config.tick_interval_secs),
            state: CaptureState::Idle,
            elapsed_secs: 0,
            next_ticket: 0,
            pending: None,
            results: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state == CaptureState::Submitting
    }

    /// Period at which the host should call `tick` while recording.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Seconds recorded in the current (or last) recording.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn results(&self) -> Option<&MatchResults> {
        self.results.as_ref()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Pending notification, cleared once read.
    pub fn take_error(&mut self) -> Option<AnalysisError> {
        self.last_error.take()
    }

    pub fn last_error(&self) -> Option<&AnalysisError> {
        self.last_error.as_ref()
    }

    /// `Idle -> Recording`. Resets the elapsed counter.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            CaptureState::Idle => {}
            CaptureState::Recording => {
                return Err(AnalysisError::InvalidState("already recording".into()))
            }
            CaptureState::Submitting => return Err(AnalysisError::Busy),
        }

        if let Err(err) = self.device.acquire() {
            log::warn!("capture: device acquisition failed: {}", err);
            self.last_error = Some(err.clone());
            return Err(err);
        }

        self.elapsed_secs = 0;
        self.state = CaptureState::Recording;
        log::info!("capture: recording started");
        Ok(())
    }

    /// One timer period elapsed. Counts only while recording.
    pub fn tick(&mut self) -> u64 {
        if self.state == CaptureState::Recording {
            self.elapsed_secs += self.tick_interval.as_secs();
        }
        self.elapsed_secs
    }

    /// `Recording -> Submitting`. Outside `Recording` this does nothing.
    pub fn stop(&mut self) -> Option<Submission> {
        if self.state != CaptureState::Recording {
            log::debug!("capture: stop ignored in {:?}", self.state);
            return None;
        }

        let clip = self.device.finish();
        let file = UploadedFile::new(self.device.clip_name(), clip);
        log::info!(
            "capture: recording stopped after {}s ({} bytes)",
            self.elapsed_secs,
            file.bytes.len()
        );

        match SongMatchRequest::new(file, self.top_k) {
            Ok(request) => Some(self.begin_submission(request)),
            Err(err) => {
                // nothing captured; back to idle with a notification
                log::warn!("capture: recording unusable: {}", err);
                self.last_error = Some(err);
                self.state = CaptureState::Idle;
                None
            }
        }
    }

    /// `Idle -> Submitting` with a user-chosen file.
    pub fn upload(&mut self, file: UploadedFile) -> Result<Submission> {
        match self.state {
            CaptureState::Idle => {}
            CaptureState::Recording => {
                return Err(AnalysisError::InvalidState("recording in progress".into()))
            }
            CaptureState::Submitting => return Err(AnalysisError::Busy),
        }

        let request = SongMatchRequest::new(file, self.top_k).map_err(|err| {
            self.last_error = Some(err.clone());
            err
        })?;
        log::info!("capture: uploading {}", request.file.name);
        Ok(self.begin_submission(request))
    }

    fn begin_submission(&mut self, request: SongMatchRequest) -> Submission {
        self.next_ticket += 1;
        let ticket = SubmissionTicket(self.next_ticket);
        self.pending = Some(ticket);
        self.state = CaptureState::Submitting;
        Submission { ticket, request }
    }

    /// Apply the outcome of a submission. Returns false when `ticket` is not
    /// the pending submission and the outcome was dropped.
    pub fn complete(&mut self, ticket: SubmissionTicket, outcome: Result<SongMatchResponse>) -> bool {
        if self.pending != Some(ticket) {
            log::warn!("capture: dropping stale completion {:?}", ticket);
            return false;
        }

        self.pending = None;
        self.state = CaptureState::Idle;

        match outcome {
            Ok(response) => {
                let response = response.truncate(self.top_k);
                log::info!("capture: {} match(es) received", response.matches.len());
                self.results = Some(MatchResults {
                    response,
                    received_at: Utc::now(),
                });
                self.last_error = None;
            }
            Err(err) => {
                log::warn!("capture: submission failed: {}", err);
                self.last_error = Some(err);
            }
        }
        true
    }

    /// `complete` from a raw HTTP status and body.
    pub fn complete_with_body(&mut self, ticket: SubmissionTicket, status: u16, body: &str) -> bool {
        let outcome = parse_response(status, body, SongMatchResponse::from_json);
        self.complete(ticket, outcome)
    }

    /// Run `submission` through `matcher` and apply the result.
    pub fn run_submission<M: SongMatcher>(&mut self, submission: Submission, matcher: &mut M) -> bool {
        let outcome = matcher.match_humming(&submission.request);
        self.complete(submission.ticket, outcome)
    }
}
