//! Spectral analysis: frequency-domain descriptors of a signal.
//!
//! Produces the [`SpectralProfile`] used for reference matching: spectral
//! centroid, rolloff, and low/high band energy ratios. All computations are
//! pure functions of the input buffer — analyzing the same signal twice
//! yields bit-identical descriptors.

use crate::fft::{Fft, Window};
use maestro_core::AudioSignal;
use serde::Serialize;

/// Frequency-domain descriptors of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectralProfile {
    /// Energy-weighted mean frequency in Hz.
    pub centroid_hz: f32,
    /// Lowest frequency at which cumulative energy reaches the rolloff
    /// fraction (85 % by default) of total energy.
    pub rolloff_hz: f32,
    /// Energy above the high-band edge divided by total energy.
    pub high_energy_ratio: f32,
    /// Energy below the low-band edge divided by total energy.
    pub low_energy_ratio: f32,
}

/// STFT-based spectral analyzer.
///
/// Windows the mono mix into Hann frames, averages the magnitude spectra,
/// and derives the profile descriptors from the mean spectrum.
///
/// # Example
///
/// ```rust
/// use maestro_analysis::SpectralAnalyzer;
/// use maestro_core::AudioSignal;
///
/// let sine: Vec<f32> = (0..44100)
///     .map(|i| (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / 44100.0).sin())
///     .collect();
/// let signal = AudioSignal::from_mono(sine, 44100);
///
/// let profile = SpectralAnalyzer::new().analyze(&signal);
/// assert!((profile.centroid_hz - 1000.0).abs() < 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct SpectralAnalyzer {
    fft_size: usize,
    hop_size: usize,
    window: Window,
    low_band_hz: f32,
    high_band_hz: f32,
    rolloff_fraction: f32,
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralAnalyzer {
    /// Create an analyzer with the standard configuration:
    /// 2048-sample Hann frames, 512-sample hop, low band below 250 Hz,
    /// high band above 4 kHz, 85 % rolloff.
    pub fn new() -> Self {
        Self {
            fft_size: 2048,
            hop_size: 512,
            window: Window::Hann,
            low_band_hz: 250.0,
            high_band_hz: 4000.0,
            rolloff_fraction: 0.85,
        }
    }

    /// Low-band upper edge in Hz.
    pub fn low_band_hz(&self) -> f32 {
        self.low_band_hz
    }

    /// High-band lower edge in Hz.
    pub fn high_band_hz(&self) -> f32 {
        self.high_band_hz
    }

    /// Analyze a signal and return its spectral profile.
    ///
    /// Stateless: no analysis state is retained between calls.
    pub fn analyze(&self, signal: &AudioSignal) -> SpectralProfile {
        let mono = signal.mono_mix();
        let sample_rate = signal.sample_rate() as f32;
        let spectrum = self.mean_spectrum(&mono);

        SpectralProfile {
            centroid_hz: spectral_centroid(&spectrum, sample_rate),
            rolloff_hz: spectral_rolloff(&spectrum, sample_rate, self.rolloff_fraction),
            high_energy_ratio: band_energy_ratio(
                &spectrum,
                sample_rate,
                self.high_band_hz,
                sample_rate / 2.0,
            ),
            low_energy_ratio: band_energy_ratio(&spectrum, sample_rate, 0.0, self.low_band_hz),
        }
    }

    /// Average magnitude spectrum across all analysis frames.
    ///
    /// Signals shorter than one frame are analyzed as a single
    /// zero-padded frame.
    fn mean_spectrum(&self, mono: &[f32]) -> Vec<f32> {
        let fft = Fft::new(self.fft_size);
        let coeffs = self.window.coefficients(self.fft_size);
        let mut mean = vec![0.0_f32; self.fft_size / 2 + 1];
        let mut frame = vec![0.0_f32; self.fft_size];
        let mut num_frames = 0usize;

        let mut offset = 0;
        loop {
            let end = (offset + self.fft_size).min(mono.len());
            let chunk = &mono[offset..end];

            frame[..chunk.len()].copy_from_slice(chunk);
            frame[chunk.len()..].fill(0.0);
            for (sample, &w) in frame.iter_mut().zip(coeffs.iter()) {
                *sample *= w;
            }

            for (acc, mag) in mean.iter_mut().zip(fft.magnitude(&frame)) {
                *acc += mag;
            }
            num_frames += 1;

            offset += self.hop_size;
            if offset + self.fft_size > mono.len() {
                break;
            }
        }

        let scale = 1.0 / num_frames as f32;
        for mag in mean.iter_mut() {
            *mag *= scale;
        }
        mean
    }
}

/// Energy-weighted mean frequency of a magnitude spectrum, in Hz.
pub fn spectral_centroid(spectrum: &[f32], sample_rate: f32) -> f32 {
    let fft_size = (spectrum.len() - 1) * 2;
    let bin_width = sample_rate / fft_size as f32;

    let mut weighted_sum = 0.0;
    let mut energy_sum = 0.0;

    for (i, &mag) in spectrum.iter().enumerate() {
        let energy = mag * mag;
        weighted_sum += i as f32 * bin_width * energy;
        energy_sum += energy;
    }

    if energy_sum > 1e-10 {
        weighted_sum / energy_sum
    } else {
        0.0
    }
}

/// Lowest frequency below which `rolloff_fraction` of the total spectral
/// energy is contained.
pub fn spectral_rolloff(spectrum: &[f32], sample_rate: f32, rolloff_fraction: f32) -> f32 {
    let fft_size = (spectrum.len() - 1) * 2;
    let bin_width = sample_rate / fft_size as f32;

    let total_energy: f32 = spectrum.iter().map(|&m| m * m).sum();
    if total_energy <= 1e-10 {
        return 0.0;
    }
    let threshold = total_energy * rolloff_fraction;

    let mut cumulative = 0.0;
    for (i, &mag) in spectrum.iter().enumerate() {
        cumulative += mag * mag;
        if cumulative >= threshold {
            return i as f32 * bin_width;
        }
    }

    sample_rate / 2.0 // Nyquist
}

/// Fraction of total spectral energy within `[low_hz, high_hz]`.
pub fn band_energy_ratio(spectrum: &[f32], sample_rate: f32, low_hz: f32, high_hz: f32) -> f32 {
    let fft_size = (spectrum.len() - 1) * 2;
    let bin_width = sample_rate / fft_size as f32;

    let mut band_energy = 0.0;
    let mut total_energy = 0.0;

    for (i, &mag) in spectrum.iter().enumerate() {
        let freq = i as f32 * bin_width;
        let energy = mag * mag;
        total_energy += energy;
        if freq >= low_hz && freq <= high_hz {
            band_energy += energy;
        }
    }

    if total_energy > 1e-10 {
        band_energy / total_energy
    } else {
        0.0
    }
}
