//! Maestro Analysis - Measurement tools for the mastering pipeline
//!
//! This crate provides the analyzers that drive adaptive mastering:
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`spectrum`] - Spectral descriptors (centroid, rolloff, band ratios)
//! - [`dynamics`] - Peak, dynamic range, and compression-ratio estimation
//! - [`loudness`] - ITU-R BS.1770 gated integrated loudness
//! - [`profile`] - Reference profiling, composing the above
//!
//! All analyzers are pure functions of their input buffers: no state is
//! retained across calls, so repeated analysis of the same signal yields
//! bit-identical results and concurrent analysis needs no coordination.
//!
//! # Example
//!
//! ```rust
//! use maestro_analysis::ReferenceProfiler;
//! use maestro_core::AudioSignal;
//!
//! let sine: Vec<f32> = (0..44100)
//!     .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! let reference = AudioSignal::from_mono(sine, 44100);
//!
//! let profile = ReferenceProfiler::new().profile(&reference);
//! assert!(profile.target_lufs < 0.0);
//! ```

pub mod dynamics;
pub mod fft;
pub mod loudness;
pub mod profile;
pub mod spectrum;

pub use dynamics::{DynamicsAnalyzer, DynamicsProfile, rms, rms_envelope_db};
pub use fft::{Fft, Window};
pub use loudness::{LoudnessMeter, SILENCE_FLOOR_LUFS};
pub use profile::{ReferenceProfile, ReferenceProfiler};
pub use spectrum::{
    SpectralAnalyzer, SpectralProfile, band_energy_ratio, spectral_centroid, spectral_rolloff,
};
