//! Brick-wall lookahead limiter stage.
//!
//! The final safety stage: no sample in the output exceeds the ceiling,
//! exactly. Offline processing lets the limiter look ahead without
//! delaying the output — the gain for frame `i` is derived from the peak
//! over `[i, i + lookahead]`, which includes frame `i` itself, so the
//! ceiling is a hard guarantee rather than an approximation.
//!
//! Attack is instantaneous (the windowed minimum drops the moment a peak
//! enters the lookahead horizon); recovery follows a one-pole exponential
//! release so gain never snaps back audibly.

use crate::config::MasteringConfig;
use crate::stage::MasterStage;
use maestro_core::{AudioSignal, ms_to_samples};

/// Lookahead horizon.
const LOOKAHEAD_MS: f32 = 5.0;
/// Gain recovery time constant.
const RELEASE_MS: f32 = 50.0;

/// Brick-wall limiter stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimiterStage;

impl LimiterStage {
    /// Create the limiter stage.
    pub fn new() -> Self {
        Self
    }

    /// Per-frame peak across all channels.
    fn frame_peaks(signal: &AudioSignal) -> Vec<f32> {
        let mut peaks = vec![0.0_f32; signal.frames()];
        for channel in signal.channels() {
            for (peak, &sample) in peaks.iter_mut().zip(channel) {
                *peak = peak.max(sample.abs());
            }
        }
        peaks
    }

    /// Per-frame linear gains that keep the signal at or below `ceiling`.
    fn gain_curve(peaks: &[f32], ceiling: f32, lookahead: usize, release_coeff: f32) -> Vec<f32> {
        let mut gains = Vec::with_capacity(peaks.len());
        let mut gain = 1.0_f32;

        for i in 0..peaks.len() {
            let horizon_end = (i + lookahead + 1).min(peaks.len());
            let window_peak = peaks[i..horizon_end]
                .iter()
                .fold(0.0_f32, |acc, &p| acc.max(p));

            let required = if window_peak > ceiling {
                ceiling / window_peak
            } else {
                1.0
            };

            if required < gain {
                // Instant attack: the upcoming peak dictates the gain now.
                gain = required;
            } else {
                gain = required + release_coeff * (gain - required);
            }
            gains.push(gain);
        }
        gains
    }
}

impl MasterStage for LimiterStage {
    fn name(&self) -> &'static str {
        "limiter"
    }

    fn apply(&self, signal: &AudioSignal, config: &MasteringConfig) -> AudioSignal {
        if signal.frames() == 0 {
            return signal.clone();
        }

        let sample_rate = signal.sample_rate() as f32;
        let lookahead = ms_to_samples(LOOKAHEAD_MS, sample_rate);
        let release_coeff = (-1.0 / (RELEASE_MS * sample_rate / 1000.0)).exp();

        let peaks = Self::frame_peaks(signal);
        let gains = Self::gain_curve(&peaks, config.limiter_ceiling, lookahead, release_coeff);

        let (mut channels, rate) = signal.clone().into_parts();
        for channel in &mut channels {
            for (sample, &gain) in channel.iter_mut().zip(&gains) {
                *sample *= gain;
            }
        }
        AudioSignal::new(channels, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const SAMPLE_RATE: u32 = 44100;

    fn config_with_ceiling(ceiling: f32) -> MasteringConfig {
        MasteringConfig {
            limiter_ceiling: ceiling,
            ..MasteringConfig::default()
        }
    }

    fn sine(freq: f32, amplitude: f32, secs: f32) -> Vec<f32> {
        let n = (secs * SAMPLE_RATE as f32) as usize;
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f32 / SAMPLE_RATE as f32).sin())
            .collect()
    }

    #[test]
    fn output_never_exceeds_the_ceiling() {
        let signal = AudioSignal::from_mono(sine(440.0, 1.4, 1.0), SAMPLE_RATE);
        let out = LimiterStage::new().apply(&signal, &config_with_ceiling(0.95));
        assert!(out.peak() <= 0.95 + 1e-6, "peak {} above ceiling", out.peak());
    }

    #[test]
    fn isolated_spike_is_caught() {
        let mut samples = sine(440.0, 0.3, 0.5);
        let mid = samples.len() / 2;
        samples[mid] = 2.0;
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE);

        let out = LimiterStage::new().apply(&signal, &config_with_ceiling(0.9));
        assert!(out.peak() <= 0.9 + 1e-6);
    }

    #[test]
    fn below_ceiling_signal_is_untouched() {
        let signal = AudioSignal::from_mono(sine(440.0, 0.5, 0.5), SAMPLE_RATE);
        let out = LimiterStage::new().apply(&signal, &config_with_ceiling(0.95));
        assert_eq!(out.channel(0), signal.channel(0));
    }

    #[test]
    fn no_latency_is_introduced() {
        let signal = AudioSignal::from_mono(sine(440.0, 1.2, 0.5), SAMPLE_RATE);
        let out = LimiterStage::new().apply(&signal, &config_with_ceiling(0.95));
        assert_eq!(out.frames(), signal.frames());

        // Zero crossings stay aligned: the limiter scales, never delays.
        for i in 0..signal.frames() {
            if signal.channel(0)[i] == 0.0 {
                assert_eq!(out.channel(0)[i], 0.0);
            }
        }
    }

    #[test]
    fn stereo_image_is_preserved() {
        let left = sine(440.0, 1.5, 0.5);
        let right: Vec<f32> = left.iter().map(|s| s * 0.5).collect();
        let signal = AudioSignal::new(vec![left.clone(), right], SAMPLE_RATE);

        let out = LimiterStage::new().apply(&signal, &config_with_ceiling(0.9));

        // The same gain applies to both channels, so the L/R ratio holds.
        for i in 0..signal.frames() {
            if left[i].abs() > 1e-3 {
                let ratio = out.channel(1)[i] / out.channel(0)[i];
                assert!((ratio - 0.5).abs() < 1e-4, "frame {i}: ratio {ratio}");
            }
        }
    }

    #[test]
    fn gain_recovers_after_a_peak() {
        let mut samples = vec![0.2_f32; SAMPLE_RATE as usize];
        samples[1000] = 1.8;
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE);

        let out = LimiterStage::new().apply(&signal, &config_with_ceiling(0.9));
        // Long after the spike the limiter should be back near unity.
        let tail = out.channel(0)[SAMPLE_RATE as usize - 1];
        assert!((tail - 0.2).abs() < 0.01, "tail {tail} should recover to 0.2");
    }

    #[test]
    fn empty_signal_is_a_noop() {
        let signal = AudioSignal::from_mono(vec![], SAMPLE_RATE);
        let out = LimiterStage::new().apply(&signal, &config_with_ceiling(0.95));
        assert_eq!(out.frames(), 0);
    }
}
