//! Mathematical utility functions for DSP.
//!
//! Level conversions between decibels and linear gain, plus small
//! time-domain helpers. All functions are allocation-free and suitable
//! for `no_std`.

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use maestro_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Input is floored at 1e-10 so silence maps to -200 dB instead of -inf.
///
/// # Example
/// ```rust
/// use maestro_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert a power (energy) quantity to decibels: `10 * log10(power)`.
///
/// Used for energy-ratio comparisons, where the quantity is already a
/// squared magnitude and the 20-dB amplitude scale would double-count.
#[inline]
pub fn power_to_db(power: f32) -> f32 {
    const FACTOR: f32 = 10.0 / core::f32::consts::LN_10;
    logf(power.max(1e-10)) * FACTOR
}

/// Convert milliseconds to a sample count at the given sample rate.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> usize {
    ((ms * sample_rate) / 1000.0) as usize
}
