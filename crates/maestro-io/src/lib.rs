//! WAV file I/O for the maestro mastering engine.
//!
//! - [`read_wav`] loads a WAV file (integer or float samples at any
//!   supported bit depth) into a normalized planar [`AudioSignal`]
//! - [`write_wav`] writes a signal back out as 32-bit float WAV
//! - [`read_wav_info`] reads header metadata without touching samples
//!
//! [`AudioSignal`]: maestro_core::AudioSignal

mod wav;

pub use wav::{WavFormat, WavInfo, read_wav, read_wav_info, write_wav};

/// Error types for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file decodes but cannot be used (no channels, no frames).
    #[error("Unusable WAV file: {0}")]
    EmptyFile(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio file operations.
pub type Result<T> = std::result::Result<T, Error>;
