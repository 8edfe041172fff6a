//! Client-side validation of everything submitted to the backend.
//!
//! Failures here are reported before any request is built.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Extensions the humming matcher and song library accept.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "m4a", "mp4"];

/// Extensions the tactical analysis accepts.
pub const TACTICAL_EXTENSIONS: &[&str] = &["json"];

/// Request body limit of the humming service.
pub const MAX_AUDIO_BYTES: usize = 16 * 1024 * 1024;

/// Request body limit of the tactical service, shared by both match files.
pub const MAX_TACTICAL_BYTES: usize = 50 * 1024 * 1024;

/// A file picked by the user or produced by a recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Lower-cased extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            Some("ogg") => "audio/ogg",
            Some("flac") => "audio/flac",
            Some("m4a") | Some("mp4") => "audio/mp4",
            Some("json") => "application/json",
            _ => "application/octet-stream",
        }
    }

    /// Reject empty files, files over `max_bytes` and extensions outside `allowed`.
    pub fn check(&self, allowed: &[&str], max_bytes: usize) -> Result<()> {
        if self.name.is_empty() || self.bytes.is_empty() {
            return Err(AnalysisError::MissingFile(if self.name.is_empty() {
                "file".to_string()
            } else {
                self.name.clone()
            }));
        }
        if self.bytes.len() > max_bytes {
            return Err(AnalysisError::FileTooLarge {
                file: self.name.clone(),
                size: self.bytes.len(),
                limit: max_bytes,
            });
        }
        match self.extension() {
            Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
            _ => Err(AnalysisError::UnsupportedFile {
                file: self.name.clone(),
                allowed: allowed.join(", "),
            }),
        }
    }
}

/// The two match files for a tactical comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TacticalUpload {
    pub match1: Option<UploadedFile>,
    pub match2: Option<UploadedFile>,
}

impl TacticalUpload {
    /// Submit is only offered once both files are chosen.
    pub fn is_ready(&self) -> bool {
        self.match1.is_some() && self.match2.is_some()
    }

    /// Both files present, `.json`, parseable and together within
    /// `MAX_TACTICAL_BYTES`. Returns the multipart parts in the order the
    /// backend expects.
    pub fn validate(&self) -> Result<Vec<(&'static str, &UploadedFile)>> {
        let mut parts = Vec::with_capacity(2);
        let mut total = 0;
        for (field, file) in [("match1", &self.match1), ("match2", &self.match2)] {
            let file = file
                .as_ref()
                .ok_or_else(|| AnalysisError::MissingFile(field.to_string()))?;
            file.check(TACTICAL_EXTENSIONS, MAX_TACTICAL_BYTES - total)?;
            total += file.bytes.len();
            serde_json::from_slice::<serde_json::Value>(&file.bytes).map_err(|e| {
                AnalysisError::InvalidJson {
                    file: file.name.clone(),
                    reason: e.to_string(),
                }
            })?;
            parts.push((field, file));
        }
        Ok(parts)
    }
}

/// Humming match submission: `{file, top_k}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMatchRequest {
    pub file: UploadedFile,
    pub top_k: usize,
}

impl SongMatchRequest {
    pub fn new(file: UploadedFile, top_k: usize) -> Result<Self> {
        file.check(AUDIO_EXTENSIONS, MAX_AUDIO_BYTES)?;
        Ok(Self { file, top_k })
    }

    /// Non-file form fields.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![("top_k", self.top_k.to_string())]
    }
}

/// Song library addition: `{file, title, artist, duration}`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddSongRequest {
    pub file: UploadedFile,
    pub title: String,
    pub artist: String,
    /// Seconds of the reference clip to index
    pub duration: Option<f64>,
}

impl AddSongRequest {
    pub fn new(file: UploadedFile, title: &str, artist: &str, duration: Option<f64>) -> Result<Self> {
        file.check(AUDIO_EXTENSIONS, MAX_AUDIO_BYTES)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(AnalysisError::InvalidField {
                field: "title".into(),
                reason: "must not be empty".into(),
            });
        }
        if let Some(d) = duration {
            if d.is_nan() || d <= 0.0 {
                return Err(AnalysisError::InvalidField {
                    field: "duration".into(),
                    reason: "must be positive".into(),
                });
            }
        }
        let artist = match artist.trim() {
            "" => "Unknown",
            a => a,
        };
        Ok(Self {
            file,
            title: title.to_string(),
            artist: artist.to_string(),
            duration,
        })
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("title", self.title.clone()), ("artist", self.artist.clone())];
        if let Some(d) = self.duration {
            fields.push(("duration", d.to_string()));
        }
        fields
    }
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Build a transport error from a non-success response.
pub fn transport_error(status: u16, body: &str) -> AnalysisError {
    let message = match serde_json::from_str::<BackendErrorBody>(body) {
        Ok(BackendErrorBody {
            error,
            details: Some(details),
        }) => format!("{}: {}", error, details),
        Ok(BackendErrorBody { error, .. }) => error,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().chars().take(200).collect(),
    };
    AnalysisError::Transport { status, message }
}

/// Check the status, then hand the body to `parse`.
pub fn parse_response<T>(status: u16, body: &str, parse: impl FnOnce(&str) -> Result<T>) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(transport_error(status, body));
    }
    parse(body)
}
