//! Per-request mastering configuration.
//!
//! [`MasteringConfig`] is an explicit value struct built once per request
//! by exactly one of two constructors — [`standard`](MasteringConfig::standard)
//! with caller-supplied loudness target and fixed defaults, or
//! [`from_reference`](MasteringConfig::from_reference) with every field
//! derived from a measured [`ReferenceProfile`]. There are no process-wide
//! mutable settings, so concurrent requests cannot affect each other.

use crate::error::MasteringError;
use maestro_analysis::{ReferenceProfile, SpectralProfile};
use maestro_core::{db_to_linear, power_to_db};
use serde::Serialize;

/// Default loudness target (streaming-platform convention).
pub const DEFAULT_TARGET_LUFS: f32 = -14.0;
/// Default compressor threshold, linear amplitude.
pub const DEFAULT_COMPRESSION_THRESHOLD: f32 = 0.7;
/// Default compression ratio.
pub const DEFAULT_COMPRESSION_RATIO: f32 = 3.0;
/// Default brick-wall ceiling, linear amplitude.
pub const DEFAULT_LIMITER_CEILING: f32 = 0.95;

/// Largest corrective shelf gain derived from a reference, in dB.
/// Keeps extreme spectral mismatches from producing audible artifacts.
const MAX_EQ_GAIN_DB: f32 = 6.0;

/// Parameters for one mastering request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MasteringConfig {
    /// Integrated loudness target in LUFS.
    pub target_lufs: f32,
    /// Compressor threshold, linear amplitude in (0, 1].
    pub compression_threshold: f32,
    /// Compression ratio, ≥ 1.
    pub compression_ratio: f32,
    /// Brick-wall output ceiling, linear amplitude in (0, 1].
    pub limiter_ceiling: f32,
    /// Low-shelf gain in dB.
    pub eq_low_gain_db: f32,
    /// High-shelf gain in dB.
    pub eq_high_gain_db: f32,
}

impl MasteringConfig {
    /// Standard mode: caller-supplied loudness target, fixed defaults for
    /// everything else, flat EQ.
    pub fn standard(target_lufs: f32) -> Self {
        Self {
            target_lufs,
            compression_threshold: DEFAULT_COMPRESSION_THRESHOLD,
            compression_ratio: DEFAULT_COMPRESSION_RATIO,
            limiter_ceiling: DEFAULT_LIMITER_CEILING,
            eq_low_gain_db: 0.0,
            eq_high_gain_db: 0.0,
        }
    }

    /// Reference mode: every field derived from the reference profile and
    /// the input's own spectral balance. Any caller-supplied loudness
    /// target is structurally absent here — the reference's measured
    /// loudness is the target.
    ///
    /// Derivations (engineering choices, clamped to conservative ranges):
    ///
    /// - `target_lufs`: the reference's integrated loudness, clamped to
    ///   [-30, -6] to keep degenerate references from producing useless
    ///   targets.
    /// - `compression_ratio`: the profile's heuristic estimate, clamped
    ///   to [1.5, 8].
    /// - `compression_threshold`: a quarter of the reference's dynamic
    ///   range below full scale — more dynamic references compress from a
    ///   lower threshold — clamped to [0.4, 0.9] linear.
    /// - `limiter_ceiling`: the reference's peak, clamped to [0.85, 0.98].
    /// - EQ shelf gains: the dB difference between the reference's and the
    ///   input's band energy ratios, clamped to ±6 dB.
    pub fn from_reference(profile: &ReferenceProfile, input_spectrum: &SpectralProfile) -> Self {
        let threshold_db = -(profile.dynamic_range_db / 4.0);

        Self {
            target_lufs: profile.target_lufs.clamp(-30.0, -6.0),
            compression_threshold: db_to_linear(threshold_db).clamp(0.4, 0.9),
            compression_ratio: profile.estimated_compression_ratio.clamp(1.5, 8.0),
            limiter_ceiling: profile.peak_level.clamp(0.85, 0.98),
            eq_low_gain_db: shelf_gain_db(
                profile.low_freq_energy_ratio,
                input_spectrum.low_energy_ratio,
            ),
            eq_high_gain_db: shelf_gain_db(
                profile.high_freq_energy_ratio,
                input_spectrum.high_energy_ratio,
            ),
        }
    }

    /// Validate every field, failing fast before any processing.
    pub fn validate(&self) -> Result<(), MasteringError> {
        if !self.target_lufs.is_finite() || !(-70.0..=0.0).contains(&self.target_lufs) {
            return Err(MasteringError::invalid_config(
                "target_lufs",
                format!("must be within [-70, 0] LUFS, got {}", self.target_lufs),
            ));
        }
        if !self.compression_threshold.is_finite()
            || self.compression_threshold <= 0.0
            || self.compression_threshold > 1.0
        {
            return Err(MasteringError::invalid_config(
                "compression_threshold",
                format!("must be within (0, 1], got {}", self.compression_threshold),
            ));
        }
        if !self.compression_ratio.is_finite() || self.compression_ratio < 1.0 {
            return Err(MasteringError::invalid_config(
                "compression_ratio",
                format!("must be >= 1, got {}", self.compression_ratio),
            ));
        }
        if !self.limiter_ceiling.is_finite()
            || self.limiter_ceiling <= 0.0
            || self.limiter_ceiling > 1.0
        {
            return Err(MasteringError::invalid_config(
                "limiter_ceiling",
                format!("must be within (0, 1], got {}", self.limiter_ceiling),
            ));
        }
        for (field, gain) in [
            ("eq_low_gain_db", self.eq_low_gain_db),
            ("eq_high_gain_db", self.eq_high_gain_db),
        ] {
            if !gain.is_finite() || gain.abs() > 12.0 {
                return Err(MasteringError::invalid_config(
                    field,
                    format!("must be within [-12, 12] dB, got {gain}"),
                ));
            }
        }
        Ok(())
    }
}

impl Default for MasteringConfig {
    fn default() -> Self {
        Self::standard(DEFAULT_TARGET_LUFS)
    }
}

/// Corrective shelf gain from an energy-ratio mismatch, in dB.
///
/// Positive when the reference has proportionally more energy in the band
/// than the input. Degenerate ratios (near-zero on either side) yield a
/// flat shelf rather than a huge correction.
fn shelf_gain_db(reference_ratio: f32, input_ratio: f32) -> f32 {
    if reference_ratio < 1e-6 || input_ratio < 1e-6 {
        return 0.0;
    }
    power_to_db(reference_ratio / input_ratio).clamp(-MAX_EQ_GAIN_DB, MAX_EQ_GAIN_DB)
}
