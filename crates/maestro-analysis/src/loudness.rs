//! Integrated loudness measurement (ITU-R BS.1770 style).
//!
//! K-weighting followed by gated integration over 400 ms blocks:
//!
//! 1. Each channel is filtered by a two-stage K-weighting chain — a
//!    high-frequency shelving pre-filter and the RLB high-pass — both
//!    second-order sections.
//! 2. The filtered signal is cut into 400 ms blocks with 75 % overlap;
//!    each block's mean square is summed across channels with the
//!    BS.1770 channel weights.
//! 3. Block loudness is `-0.691 + 10*log10(mean_square)` LUFS.
//! 4. Absolute gating discards blocks below −70 LUFS; relative gating
//!    discards blocks more than 10 LU below the mean of the survivors;
//!    the integrated loudness is the energy mean of what remains.
//!
//! The BS.1770 filter tables only cover 48 kHz, so the two sections are
//! redesigned from RBJ formulas at the signal's own sample rate using the
//! published parametric description of the K-weighting curve (high shelf
//! +3.99984 dB at 1681.97 Hz, Q 0.70718; high-pass at 38.135 Hz,
//! Q 0.5003). The deviation from the reference tables is far below the
//! gating tolerances.

use maestro_core::{AudioSignal, Biquad, high_shelf_coefficients, highpass_coefficients};

/// Loudness reported for effective silence, and the absolute gate
/// threshold. Blocks quieter than this never contribute.
pub const SILENCE_FLOOR_LUFS: f32 = -70.0;

/// Relative gate: blocks more than this many LU below the first-pass mean
/// are discarded.
const RELATIVE_GATE_LU: f64 = 10.0;

/// Gating block length in milliseconds.
const BLOCK_MS: f32 = 400.0;

/// Block overlap fraction (75 % overlap = 100 ms hop).
const BLOCK_OVERLAP: f32 = 0.75;

/// The `-0.691` calibration offset from BS.1770.
const LOUDNESS_OFFSET: f64 = -0.691;

/// Two-stage K-weighting filter chain for one channel.
#[derive(Debug, Clone)]
struct KWeighting {
    shelf: Biquad,
    highpass: Biquad,
}

impl KWeighting {
    fn new(sample_rate: f32) -> Self {
        Self {
            shelf: Biquad::from_coefficients(high_shelf_coefficients(
                1681.97, 0.7071752, 3.99984, sample_rate,
            )),
            highpass: Biquad::from_coefficients(highpass_coefficients(
                38.135, 0.5003, sample_rate,
            )),
        }
    }

    fn process_buffer(&mut self, buffer: &mut [f32]) {
        self.shelf.process_buffer(buffer);
        self.highpass.process_buffer(buffer);
    }
}

/// Integrated loudness meter.
///
/// Stateless across calls: every [`measure`](Self::measure) builds fresh
/// filter state, so measuring is a pure function of the input buffer.
///
/// # Example
///
/// ```rust
/// use maestro_analysis::{LoudnessMeter, SILENCE_FLOOR_LUFS};
/// use maestro_core::AudioSignal;
///
/// let silence = AudioSignal::silence(2, 48000, 48000);
/// let lufs = LoudnessMeter::new().measure(&silence);
/// assert_eq!(lufs, SILENCE_FLOOR_LUFS);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoudnessMeter;

impl LoudnessMeter {
    /// Create a meter.
    pub fn new() -> Self {
        Self
    }

    /// Integrated loudness of the signal in LUFS, or
    /// [`SILENCE_FLOOR_LUFS`] when no block survives the absolute gate.
    pub fn measure(&self, signal: &AudioSignal) -> f32 {
        if signal.frames() == 0 || signal.sample_rate() == 0 {
            return SILENCE_FLOOR_LUFS;
        }

        let sample_rate = signal.sample_rate() as f32;
        let num_channels = signal.num_channels();

        // K-weight every channel independently.
        let mut filtered: Vec<Vec<f32>> = Vec::with_capacity(num_channels);
        for ch in signal.channels() {
            let mut buffer = ch.clone();
            KWeighting::new(sample_rate).process_buffer(&mut buffer);
            filtered.push(buffer);
        }

        // Weighted per-block mean-square energies.
        let block_len = ((BLOCK_MS / 1000.0) * sample_rate) as usize;
        let hop = ((block_len as f32) * (1.0 - BLOCK_OVERLAP)).max(1.0) as usize;
        let energies = block_energies(&filtered, num_channels, block_len, hop);

        integrate_gated(&energies)
    }
}

/// Weighted mean-square energy of each gating block.
///
/// Signals shorter than one block are measured as a single block covering
/// the whole signal.
fn block_energies(
    filtered: &[Vec<f32>],
    num_channels: usize,
    block_len: usize,
    hop: usize,
) -> Vec<f64> {
    let frames = filtered.first().map_or(0, |ch| ch.len());

    if frames < block_len {
        return vec![weighted_mean_square(filtered, num_channels, 0, frames)];
    }

    let mut energies = Vec::new();
    let mut start = 0;
    while start + block_len <= frames {
        energies.push(weighted_mean_square(
            filtered,
            num_channels,
            start,
            start + block_len,
        ));
        start += hop;
    }
    energies
}

/// Channel-weighted mean square of one block.
fn weighted_mean_square(
    filtered: &[Vec<f32>],
    num_channels: usize,
    start: usize,
    end: usize,
) -> f64 {
    if end == start {
        return 0.0;
    }
    let mut sum = 0.0_f64;
    for (index, ch) in filtered.iter().enumerate() {
        let mut channel_sum = 0.0_f64;
        for &sample in &ch[start..end] {
            channel_sum += f64::from(sample) * f64::from(sample);
        }
        sum += channel_weight(index, num_channels) * channel_sum;
    }
    sum / (end - start) as f64
}

/// BS.1770 channel weights.
///
/// Front channels weigh 1.0. For a 5.1 layout (L R C LFE Ls Rs) the LFE
/// channel is excluded and the surrounds weigh ~1.41 (+1.5 dB). Other
/// channel counts have no defined layout here and weigh uniformly.
fn channel_weight(index: usize, num_channels: usize) -> f64 {
    if num_channels == 6 {
        match index {
            3 => 0.0,
            4 | 5 => 1.41,
            _ => 1.0,
        }
    } else {
        1.0
    }
}

fn energy_to_lufs(energy: f64) -> f64 {
    LOUDNESS_OFFSET + 10.0 * energy.max(1e-12).log10()
}

/// Two-pass gated integration over block energies.
fn integrate_gated(energies: &[f64]) -> f32 {
    // Absolute gate at -70 LUFS.
    let absolute: Vec<f64> = energies
        .iter()
        .copied()
        .filter(|&z| energy_to_lufs(z) > f64::from(SILENCE_FLOOR_LUFS))
        .collect();

    if absolute.is_empty() {
        return SILENCE_FLOOR_LUFS;
    }

    // Relative gate 10 LU below the energy mean of the survivors.
    let mean_energy = absolute.iter().sum::<f64>() / absolute.len() as f64;
    let relative_threshold = energy_to_lufs(mean_energy) - RELATIVE_GATE_LU;

    let gated: Vec<f64> = absolute
        .iter()
        .copied()
        .filter(|&z| energy_to_lufs(z) > relative_threshold)
        .collect();

    // All blocks equal loudness always pass the relative gate, so an empty
    // set only happens in pathological float corner cases.
    let final_set = if gated.is_empty() { &absolute } else { &gated };
    let integrated = final_set.iter().sum::<f64>() / final_set.len() as f64;

    energy_to_lufs(integrated) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, amplitude: f32, secs: f32, sample_rate: u32) -> Vec<f32> {
        let n = (secs * sample_rate as f32) as usize;
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_sine_reference_level() {
        // A 1 kHz sine at amplitude 0.5 has mean square 0.125;
        // K-weighting is ~unity at 1 kHz, so the integrated loudness is
        // close to -0.691 + 10*log10(0.125) = -9.72 LUFS.
        let signal = AudioSignal::from_mono(sine(1000.0, 0.5, 2.0, 44100), 44100);
        let lufs = LoudnessMeter::new().measure(&signal);

        assert!(
            (lufs - (-9.72)).abs() < 0.5,
            "1 kHz sine at 0.5 should measure ~-9.72 LUFS, got {lufs}"
        );
    }

    #[test]
    fn test_full_scale_sine_reference() {
        // ITU reference: a ~1 kHz 0 dBFS sine reads about -3.01 LKFS.
        let signal = AudioSignal::from_mono(sine(997.0, 1.0, 2.0, 48000), 48000);
        let lufs = LoudnessMeter::new().measure(&signal);

        assert!(
            (lufs - (-3.01)).abs() < 0.5,
            "full-scale 997 Hz sine should measure ~-3.01 LUFS, got {lufs}"
        );
    }

    #[test]
    fn test_stereo_sums_channel_energy() {
        let mono = AudioSignal::from_mono(sine(1000.0, 0.4, 2.0, 48000), 48000);
        let stereo = AudioSignal::new(
            vec![sine(1000.0, 0.4, 2.0, 48000), sine(1000.0, 0.4, 2.0, 48000)],
            48000,
        );

        let meter = LoudnessMeter::new();
        let mono_lufs = meter.measure(&mono);
        let stereo_lufs = meter.measure(&stereo);

        // Identical content on both channels doubles the energy: +3.01 LU.
        assert!(
            (stereo_lufs - mono_lufs - 3.01).abs() < 0.1,
            "stereo {} vs mono {} should differ by ~3 LU",
            stereo_lufs,
            mono_lufs
        );
    }

    #[test]
    fn test_silence_hits_floor() {
        let signal = AudioSignal::silence(2, 96000, 48000);
        assert_eq!(LoudnessMeter::new().measure(&signal), SILENCE_FLOOR_LUFS);
    }

    #[test]
    fn test_empty_signal_hits_floor() {
        let signal = AudioSignal::from_mono(Vec::new(), 48000);
        assert_eq!(LoudnessMeter::new().measure(&signal), SILENCE_FLOOR_LUFS);
    }

    #[test]
    fn test_gating_ignores_silent_tail() {
        // 2 s of tone followed by 6 s of digital silence. Without gating
        // the silence would drag the mean down by ~6 dB; with gating the
        // result should stay close to the tone-only measurement.
        let mut samples = sine(1000.0, 0.5, 2.0, 44100);
        let tone_only = AudioSignal::from_mono(samples.clone(), 44100);
        samples.extend(std::iter::repeat(0.0).take(6 * 44100));
        let padded = AudioSignal::from_mono(samples, 44100);

        let meter = LoudnessMeter::new();
        let tone_lufs = meter.measure(&tone_only);
        let padded_lufs = meter.measure(&padded);

        assert!(
            (padded_lufs - tone_lufs).abs() < 0.5,
            "gated loudness {} should track tone loudness {}",
            padded_lufs,
            tone_lufs
        );
    }

    #[test]
    fn test_short_signal_measured_as_single_block() {
        // 100 ms is shorter than one 400 ms gating block.
        let signal = AudioSignal::from_mono(sine(1000.0, 0.5, 0.1, 44100), 44100);
        let lufs = LoudnessMeter::new().measure(&signal);

        assert!(
            (lufs - (-9.72)).abs() < 1.0,
            "short tone should still measure near -9.72, got {lufs}"
        );
    }

    #[test]
    fn test_quieter_is_lower() {
        let meter = LoudnessMeter::new();
        let loud = meter.measure(&AudioSignal::from_mono(sine(1000.0, 0.5, 1.0, 44100), 44100));
        let quiet =
            meter.measure(&AudioSignal::from_mono(sine(1000.0, 0.05, 1.0, 44100), 44100));

        // 20 dB amplitude difference
        assert!(
            (loud - quiet - 20.0).abs() < 0.5,
            "expected 20 LU difference, got {} vs {}",
            loud,
            quiet
        );
    }

    #[test]
    fn test_measure_is_deterministic() {
        let signal = AudioSignal::from_mono(sine(440.0, 0.3, 1.0, 48000), 48000);
        let meter = LoudnessMeter::new();
        assert_eq!(
            meter.measure(&signal).to_bits(),
            meter.measure(&signal).to_bits()
        );
    }

    #[test]
    fn test_lfe_excluded_in_5_1() {
        // 5.1 signal with content only on the LFE channel measures silent.
        let frames = 48000;
        let mut channels = vec![vec![0.0_f32; frames]; 6];
        channels[3] = sine(60.0, 0.8, 1.0, 48000);
        let signal = AudioSignal::new(channels, 48000);

        assert_eq!(LoudnessMeter::new().measure(&signal), SILENCE_FLOOR_LUFS);
    }
}
