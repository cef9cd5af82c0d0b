//! Reference profiling: one immutable record describing a reference track.

use crate::dynamics::DynamicsAnalyzer;
use crate::loudness::LoudnessMeter;
use crate::spectrum::SpectralAnalyzer;
use maestro_core::AudioSignal;
use serde::Serialize;

/// Everything the mastering pipeline needs to know about a reference
/// track, measured once and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceProfile {
    /// Integrated loudness of the reference in LUFS; becomes the mastering
    /// target when the profile is applied.
    pub target_lufs: f32,
    /// Short-term dynamic range in dB.
    pub dynamic_range_db: f32,
    /// Peak sample magnitude (linear).
    pub peak_level: f32,
    /// Spectral centroid in Hz.
    pub spectral_centroid_hz: f32,
    /// Spectral rolloff (85 % energy) in Hz.
    pub spectral_rolloff_hz: f32,
    /// Fraction of energy above 4 kHz.
    pub high_freq_energy_ratio: f32,
    /// Fraction of energy below 250 Hz.
    pub low_freq_energy_ratio: f32,
    /// Heuristic compression-ratio estimate, in [1, 10].
    pub estimated_compression_ratio: f32,
}

/// Composes the loudness, spectral, and dynamics analyzers over one
/// reference buffer.
///
/// Pure orchestration: no side effects, and deterministic given identical
/// decoded samples.
#[derive(Debug, Clone, Default)]
pub struct ReferenceProfiler {
    loudness: LoudnessMeter,
    spectral: SpectralAnalyzer,
    dynamics: DynamicsAnalyzer,
}

impl ReferenceProfiler {
    /// Create a profiler with the standard analyzer configurations.
    pub fn new() -> Self {
        Self {
            loudness: LoudnessMeter::new(),
            spectral: SpectralAnalyzer::new(),
            dynamics: DynamicsAnalyzer::new(),
        }
    }

    /// Measure a reference signal into an immutable profile.
    pub fn profile(&self, reference: &AudioSignal) -> ReferenceProfile {
        let lufs = self.loudness.measure(reference);
        let spectral = self.spectral.analyze(reference);
        let dynamics = self.dynamics.analyze(reference);

        ReferenceProfile {
            target_lufs: lufs,
            dynamic_range_db: dynamics.dynamic_range_db,
            peak_level: dynamics.peak_level,
            spectral_centroid_hz: spectral.centroid_hz,
            spectral_rolloff_hz: spectral.rolloff_hz,
            high_freq_energy_ratio: spectral.high_energy_ratio,
            low_freq_energy_ratio: spectral.low_energy_ratio,
            estimated_compression_ratio: dynamics.estimated_compression_ratio,
        }
    }
}
