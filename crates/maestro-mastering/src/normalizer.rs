//! Integrated-loudness normalization stage.
//!
//! Measures gated integrated loudness, then applies the single static
//! gain that moves it to the config's target. A static gain keeps the
//! signal's dynamics intact; only the overall level shifts.

use crate::config::MasteringConfig;
use crate::error::MasteringError;
use maestro_analysis::{LoudnessMeter, SILENCE_FLOOR_LUFS};
use maestro_core::{AudioSignal, db_to_linear};

/// Result of normalizing one signal.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    /// The normalized (or passed-through) signal.
    pub signal: AudioSignal,
    /// Gain that was applied, in dB. Zero when the input was silent.
    pub gain_db: f32,
    /// True when the input measured at the silence floor and was passed
    /// through untouched.
    pub silent: bool,
}

/// Loudness normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoudnessNormalizer;

impl LoudnessNormalizer {
    /// Create the normalizer.
    pub fn new() -> Self {
        Self
    }

    /// The gain in dB that would bring `signal` to the config's target.
    ///
    /// Fails with [`MasteringError::SilentSignal`] when the signal
    /// measures at the silence floor, where a correction gain is
    /// undefined.
    pub fn gain_db(
        &self,
        signal: &AudioSignal,
        config: &MasteringConfig,
    ) -> Result<f32, MasteringError> {
        let measured = LoudnessMeter::new().measure(signal);
        if measured <= SILENCE_FLOOR_LUFS {
            return Err(MasteringError::SilentSignal);
        }
        Ok(config.target_lufs - measured)
    }

    /// Normalize the signal, downgrading silence to a warned pass-through.
    pub fn apply(&self, signal: &AudioSignal, config: &MasteringConfig) -> NormalizeOutcome {
        let Ok(gain_db) = self.gain_db(signal, config) else {
            tracing::warn!("input measures at the silence floor; passing through unchanged");
            return NormalizeOutcome {
                signal: signal.clone(),
                gain_db: 0.0,
                silent: true,
            };
        };

        tracing::debug!(gain_db, target_lufs = config.target_lufs, "normalizing");
        NormalizeOutcome {
            signal: signal.scaled(db_to_linear(gain_db)),
            gain_db,
            silent: false,
        }
    }
}
