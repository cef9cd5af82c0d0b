//! Feed-forward dynamics compressor stage.
//!
//! Detection runs on a mono mix of all channels, so stereo imaging is
//! preserved: every channel at a given frame receives the identical gain.
//! The gain computer works in dB with a hard knee, and the computed gain
//! is smoothed with a short one-pole filter to avoid zipper noise.

use crate::config::MasteringConfig;
use crate::stage::MasterStage;
use maestro_core::{AudioSignal, EnvelopeFollower, db_to_linear, linear_to_db};

/// Detector attack time.
const ATTACK_MS: f32 = 5.0;
/// Detector release time.
const RELEASE_MS: f32 = 50.0;
/// Gain smoothing time constant.
const GAIN_SMOOTHING_MS: f32 = 10.0;

/// Compressor stage with shared mono detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressorStage;

impl CompressorStage {
    /// Create the compressor stage.
    pub fn new() -> Self {
        Self
    }

    /// Per-frame linear gains for the whole signal.
    fn gain_curve(&self, signal: &AudioSignal, config: &MasteringConfig) -> Vec<f32> {
        let sample_rate = signal.sample_rate() as f32;
        let threshold_db = linear_to_db(config.compression_threshold);
        let slope = 1.0 - 1.0 / config.compression_ratio;

        let mut detector = EnvelopeFollower::with_times(sample_rate, ATTACK_MS, RELEASE_MS);
        let smoothing = (-1.0 / (GAIN_SMOOTHING_MS * sample_rate / 1000.0)).exp();
        let mut smoothed_gain = 1.0_f32;

        signal
            .mono_mix()
            .iter()
            .map(|&sample| {
                let envelope = detector.process(sample);
                let envelope_db = linear_to_db(envelope);

                let excess_db = envelope_db - threshold_db;
                let target_gain = if excess_db > 0.0 {
                    db_to_linear(-excess_db * slope)
                } else {
                    1.0
                };

                smoothed_gain = target_gain + smoothing * (smoothed_gain - target_gain);
                smoothed_gain
            })
            .collect()
    }
}

impl MasterStage for CompressorStage {
    fn name(&self) -> &'static str {
        "compressor"
    }

    fn apply(&self, signal: &AudioSignal, config: &MasteringConfig) -> AudioSignal {
        if config.compression_ratio <= 1.0 || signal.frames() == 0 {
            return signal.clone();
        }

        let gains = self.gain_curve(signal, config);
        let (mut channels, rate) = signal.clone().into_parts();
        for channel in &mut channels {
            for (sample, &gain) in channel.iter_mut().zip(&gains) {
                *sample *= gain;
            }
        }
        AudioSignal::new(channels, rate)
    }
}
