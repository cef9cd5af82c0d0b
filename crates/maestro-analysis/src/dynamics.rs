//! Dynamics analysis: peak level, dynamic range, and an estimated
//! compression ratio.
//!
//! The dynamic range is measured as the spread of a short-term RMS
//! envelope; the compression ratio estimate is a heuristic described on
//! [`DynamicsAnalyzer::analyze`], not an inverse of any real compressor.

use maestro_core::{AudioSignal, linear_to_db};
use serde::Serialize;

/// Dynamics descriptors of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DynamicsProfile {
    /// Maximum absolute sample value across all channels (linear).
    pub peak_level: f32,
    /// Spread between the 95th and 10th percentile of the short-term RMS
    /// envelope, in dB.
    pub dynamic_range_db: f32,
    /// Heuristic estimate of how compressed the material already is,
    /// clamped to [1, 10].
    pub estimated_compression_ratio: f32,
}

/// Windowed RMS dynamics analyzer.
#[derive(Debug, Clone)]
pub struct DynamicsAnalyzer {
    window_ms: f32,
}

impl Default for DynamicsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicsAnalyzer {
    /// Create an analyzer with the standard 50 ms envelope window.
    pub fn new() -> Self {
        Self { window_ms: 50.0 }
    }

    /// Analyze a signal and return its dynamics profile.
    ///
    /// The compression ratio estimate splits the dB envelope at the
    /// midpoint of its [P10, P95] range and compares the mean deviation
    /// below the midpoint to the mean deviation above it. Heavily
    /// compressed material has its loud half squashed against the
    /// midpoint, so the quotient grows with compression. This is a
    /// documented approximation — adequate for deriving a matching
    /// compressor setting, nothing more.
    pub fn analyze(&self, signal: &AudioSignal) -> DynamicsProfile {
        let peak_level = signal.peak();

        let window =
            ((self.window_ms / 1000.0) * signal.sample_rate() as f32).max(1.0) as usize;
        let envelope = rms_envelope_db(&signal.mono_mix(), window);

        if envelope.len() < 2 {
            return DynamicsProfile {
                peak_level,
                dynamic_range_db: 0.0,
                estimated_compression_ratio: 1.0,
            };
        }

        let mut sorted = envelope.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let p95 = percentile(&sorted, 0.95);
        let p10 = percentile(&sorted, 0.10);
        let dynamic_range_db = (p95 - p10).max(0.0);

        DynamicsProfile {
            peak_level,
            dynamic_range_db,
            estimated_compression_ratio: estimate_compression_ratio(&envelope, p10, p95),
        }
    }
}

/// RMS (root mean square) level of a buffer, linear scale.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = signal.iter().map(|&x| x * x).sum();
    (sum_sq / signal.len() as f32).sqrt()
}

/// Short-term RMS envelope over non-overlapping windows, in dB.
///
/// A trailing partial window shorter than half the window size is dropped.
pub fn rms_envelope_db(signal: &[f32], window_size: usize) -> Vec<f32> {
    signal
        .chunks(window_size)
        .filter(|chunk| chunk.len() >= window_size / 2)
        .map(|chunk| linear_to_db(rms(chunk)))
        .collect()
}

/// Linear-interpolated percentile of an ascending-sorted slice.
fn percentile(sorted: &[f32], fraction: f32) -> f32 {
    let position = fraction * (sorted.len() - 1) as f32;
    let below = position.floor() as usize;
    let above = (below + 1).min(sorted.len() - 1);
    let t = position - below as f32;
    sorted[below] * (1.0 - t) + sorted[above] * t
}

/// Ratio of mean envelope deviation below vs. above the range midpoint.
fn estimate_compression_ratio(envelope: &[f32], p10: f32, p95: f32) -> f32 {
    let midpoint = (p95 + p10) / 2.0;

    let mut above_sum = 0.0_f32;
    let mut above_count = 0usize;
    let mut below_sum = 0.0_f32;
    let mut below_count = 0usize;

    for &level in envelope {
        if level > midpoint {
            above_sum += level - midpoint;
            above_count += 1;
        } else {
            below_sum += midpoint - level;
            below_count += 1;
        }
    }

    if above_count == 0 || below_count == 0 {
        return 1.0;
    }

    let above_spread = above_sum / above_count as f32;
    let below_spread = below_sum / below_count as f32;

    if above_spread < 0.1 {
        // Loud half flattened against the midpoint: treat as fully compressed
        // unless the quiet half is equally flat (steady-state signal).
        if below_spread < 0.1 { 1.0 } else { 10.0 }
    } else {
        (below_spread / above_spread).clamp(1.0, 10.0)
    }
}
