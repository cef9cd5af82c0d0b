//! Corrective equalizer stage.
//!
//! Three fixed-frequency filters: a highpass that always runs to clear
//! subsonic rumble, plus optional low and high shelves whose gains come
//! from the config (flat in standard mode, derived from the reference
//! spectrum in reference mode).

use crate::config::MasteringConfig;
use crate::stage::MasterStage;
use maestro_core::{
    AudioSignal, Biquad, high_shelf_coefficients, highpass_coefficients, low_shelf_coefficients,
};

/// Subsonic highpass corner frequency.
const HIGHPASS_HZ: f32 = 80.0;
/// Low shelf corner frequency.
const LOW_SHELF_HZ: f32 = 250.0;
/// High shelf corner frequency.
const HIGH_SHELF_HZ: f32 = 4000.0;
/// Butterworth Q for all three filters.
const FILTER_Q: f32 = 0.7071;

/// Shelf gains below this are inaudible; skip the filter entirely.
const MIN_AUDIBLE_GAIN_DB: f32 = 0.01;

/// Equalizer stage: subsonic highpass plus corrective shelves.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqStage;

impl EqStage {
    /// Create the EQ stage.
    pub fn new() -> Self {
        Self
    }
}

impl MasterStage for EqStage {
    fn name(&self) -> &'static str {
        "eq"
    }

    fn apply(&self, signal: &AudioSignal, config: &MasteringConfig) -> AudioSignal {
        let sample_rate = signal.sample_rate() as f32;
        let (mut channels, rate) = signal.clone().into_parts();

        for channel in &mut channels {
            // Fresh filter state per channel so channels never bleed.
            let mut highpass =
                Biquad::from_coefficients(highpass_coefficients(HIGHPASS_HZ, FILTER_Q, sample_rate));
            highpass.process_buffer(channel);

            if config.eq_low_gain_db.abs() >= MIN_AUDIBLE_GAIN_DB {
                let mut shelf = Biquad::from_coefficients(low_shelf_coefficients(
                    LOW_SHELF_HZ,
                    FILTER_Q,
                    config.eq_low_gain_db,
                    sample_rate,
                ));
                shelf.process_buffer(channel);
            }

            if config.eq_high_gain_db.abs() >= MIN_AUDIBLE_GAIN_DB {
                let mut shelf = Biquad::from_coefficients(high_shelf_coefficients(
                    HIGH_SHELF_HZ,
                    FILTER_Q,
                    config.eq_high_gain_db,
                    sample_rate,
                ));
                shelf.process_buffer(channel);
            }
        }

        AudioSignal::new(channels, rate)
    }
}
