//! Maestro Mastering - The batch mastering chain
//!
//! A fixed four-stage offline chain:
//!
//! 1. [`EqStage`] - subsonic highpass plus corrective shelves
//! 2. [`CompressorStage`] - feed-forward compression with shared detection
//! 3. [`LoudnessNormalizer`] - static gain to the integrated loudness target
//! 4. [`LimiterStage`] - brick-wall ceiling with lookahead
//!
//! [`MasteringPipeline::master`] runs the chain in either standard mode
//! (caller-supplied loudness target, default dynamics) or reference mode
//! (every target derived from a profiled reference track).
//!
//! Everything here is stateless between requests: stages build their
//! filter and envelope state inside each call, so one pipeline value can
//! serve any number of threads without locks.
//!
//! # Example
//!
//! ```rust
//! use maestro_core::AudioSignal;
//! use maestro_mastering::{MasteringPipeline, Mode};
//!
//! let samples: Vec<f32> = (0..44100)
//!     .map(|i| 0.3 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! let signal = AudioSignal::from_mono(samples, 44100);
//!
//! let result = MasteringPipeline::new()
//!     .master(&signal, &Mode::Standard { target_lufs: -14.0 })
//!     .unwrap();
//! assert!(result.signal.peak() <= 0.95 + 1e-6);
//! ```

pub mod compressor;
pub mod config;
pub mod eq;
pub mod error;
pub mod limiter;
pub mod normalizer;
pub mod pipeline;
pub mod stage;

pub use compressor::CompressorStage;
pub use config::{
    DEFAULT_COMPRESSION_RATIO, DEFAULT_COMPRESSION_THRESHOLD, DEFAULT_LIMITER_CEILING,
    DEFAULT_TARGET_LUFS, MasteringConfig,
};
pub use eq::EqStage;
pub use error::MasteringError;
pub use limiter::LimiterStage;
pub use normalizer::{LoudnessNormalizer, NormalizeOutcome};
pub use pipeline::{MasteringPipeline, MasteringResult, Mode, ModeKind};
pub use stage::MasterStage;
