//! Capture device seam. The host supplies the real microphone binding.

use crate::error::Result;

/// A microphone-like resource that records one clip at a time.
pub trait CaptureDevice {
    /// Acquire the device and begin buffering.
    ///
    /// Errors are reported as `AnalysisError::DeviceUnavailable`.
    fn acquire(&mut self) -> Result<()>;

    /// Stop buffering, release the device and return the encoded clip.
    fn finish(&mut self) -> Vec<u8>;

    /// File name used when the clip is submitted; its extension must be one
    /// of `api::AUDIO_EXTENSIONS`.
    fn clip_name(&self) -> String {
        "recording.wav".to_string()
    }
}

/// In-memory device for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryDevice {
    pub available: bool,
    pub clip: Vec<u8>,
    pub acquired: bool,
    pub acquire_count: usize,
}

impl MemoryDevice {
    pub fn with_clip(clip: Vec<u8>) -> Self {
        Self {
            available: true,
            clip,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

impl CaptureDevice for MemoryDevice {
    fn acquire(&mut self) -> Result<()> {
        if !self.available {
            return Err(crate::AnalysisError::DeviceUnavailable(
                "permission denied".to_string(),
            ));
        }
        self.acquired = true;
        self.acquire_count += 1;
        Ok(())
    }

    fn finish(&mut self) -> Vec<u8> {
        self.acquired = false;
        self.clip.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{UploadedFile, AUDIO_EXTENSIONS, MAX_AUDIO_BYTES};

    #[test]
    fn test_default_clip_name_is_accepted_upload() {
        let mut device = MemoryDevice::with_clip(vec![1, 2, 3]);
        device.acquire().unwrap();
        let file = UploadedFile::new(device.clip_name(), device.finish());
        assert!(file.check(AUDIO_EXTENSIONS, MAX_AUDIO_BYTES).is_ok());
        assert!(!device.acquired);
    }

    #[test]
    fn test_unavailable_device() {
        let mut device = MemoryDevice::unavailable();
        assert!(matches!(
            device.acquire(),
            Err(crate::AnalysisError::DeviceUnavailable(_))
        ));
        assert_eq!(device.acquire_count, 0);
    }
}
