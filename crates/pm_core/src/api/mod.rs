//! # API Module
//!
//! Request validation and response parsing at the backend boundary.
//! Transport itself belongs to the host application.

pub mod upload;

pub use upload::{
    parse_response, transport_error, AddSongRequest, BackendErrorBody, SongMatchRequest,
    TacticalUpload, UploadedFile, AUDIO_EXTENSIONS, MAX_AUDIO_BYTES, MAX_TACTICAL_BYTES,
    TACTICAL_EXTENSIONS,
};
