//! Planar multi-channel audio buffer.
//!
//! [`AudioSignal`] is the unit of work for the whole mastering pipeline:
//! decoded by the I/O layer, consumed by each stage, and returned as a new
//! signal. Samples are expected to lie in [-1, 1] at pipeline boundaries;
//! intermediate stages may transiently exceed that range before the limiter
//! restores the ceiling.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Decoded audio: one `Vec<f32>` per channel plus the sample rate.
///
/// Channels are stored planar (not interleaved) so per-channel filtering
/// never has to stride. All channels have the same length.
///
/// # Example
///
/// ```rust
/// use maestro_core::AudioSignal;
///
/// let signal = AudioSignal::from_mono(vec![0.0, 0.5, -0.5], 44100);
/// assert_eq!(signal.num_channels(), 1);
/// assert_eq!(signal.frames(), 3);
/// assert!((signal.peak() - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl AudioSignal {
    /// Create a signal from planar channel buffers.
    ///
    /// Channels of unequal length are truncated to the shortest one so the
    /// planar invariant always holds.
    pub fn new(mut channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        let frames = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);
        for ch in channels.iter_mut() {
            ch.truncate(frames);
        }
        Self {
            channels,
            sample_rate,
        }
    }

    /// Create a mono signal from a single sample buffer.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Create an all-zero signal with the given shape.
    pub fn silence(num_channels: usize, frames: usize, sample_rate: u32) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; num_channels.max(1)],
            sample_rate,
        }
    }

    /// Deinterleave a frame-major sample buffer (as WAV decoders produce)
    /// into planar channels. `num_channels` of 0 is treated as mono.
    pub fn from_interleaved(samples: &[f32], num_channels: usize, sample_rate: u32) -> Self {
        let num_channels = num_channels.max(1);
        let frames = samples.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(frames); num_channels];

        for frame in samples.chunks_exact(num_channels) {
            for (ch, &sample) in channels.iter_mut().zip(frame.iter()) {
                ch.push(sample);
            }
        }

        Self {
            channels,
            sample_rate,
        }
    }

    /// Interleave the planar channels back into a frame-major buffer.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let frames = self.frames();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for i in 0..frames {
            for ch in &self.channels {
                out.push(ch[i]);
            }
        }
        out
    }

    /// Borrow all channel buffers.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Borrow one channel's samples.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Consume the signal, yielding the channel buffers and sample rate.
    pub fn into_parts(self) -> (Vec<Vec<f32>>, u32) {
        (self.channels, self.sample_rate)
    }

    /// Number of channels (≥ 1 for any signal built by the constructors).
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of sample frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, |ch| ch.len())
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// Maximum absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        let mut peak = 0.0_f32;
        for ch in &self.channels {
            for &sample in ch {
                let mag = sample.abs();
                if mag > peak {
                    peak = mag;
                }
            }
        }
        peak
    }

    /// Mix all channels down to mono by averaging per frame.
    ///
    /// Used by the analyzers, which operate on a single detection signal.
    pub fn mono_mix(&self) -> Vec<f32> {
        if self.channels.len() == 1 {
            return self.channels[0].clone();
        }
        let frames = self.frames();
        let scale = 1.0 / self.channels.len() as f32;
        let mut mix = vec![0.0_f32; frames];
        for ch in &self.channels {
            for (acc, &sample) in mix.iter_mut().zip(ch.iter()) {
                *acc += sample;
            }
        }
        for sample in mix.iter_mut() {
            *sample *= scale;
        }
        mix
    }

    /// True if every sample in every channel is finite (no NaN/Inf).
    pub fn is_finite(&self) -> bool {
        self.channels
            .iter()
            .all(|ch| ch.iter().all(|s| s.is_finite()))
    }

    /// Apply a uniform linear gain, returning a new signal.
    pub fn scaled(&self, gain: f32) -> Self {
        let channels = self
            .channels
            .iter()
            .map(|ch| ch.iter().map(|&s| s * gain).collect())
            .collect();
        Self {
            channels,
            sample_rate: self.sample_rate,
        }
    }
}
