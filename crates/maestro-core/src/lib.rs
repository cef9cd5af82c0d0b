//! Maestro Core - DSP primitives and the signal model for batch mastering.
//!
//! This crate provides the foundational building blocks shared by the
//! analysis and mastering crates:
//!
//! - [`AudioSignal`] - Planar multi-channel sample buffer, the unit of work
//!   for every pipeline stage
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook coefficients
//!   (high-pass and shelving designs used by the EQ and K-weighting stages)
//! - [`EnvelopeFollower`] - Amplitude envelope detection with separate
//!   attack and release ballistics
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`power_to_db`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! maestro-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod envelope;
pub mod math;
pub mod signal;

pub use biquad::{
    Biquad, high_shelf_coefficients, highpass_coefficients, low_shelf_coefficients,
};
pub use envelope::EnvelopeFollower;
pub use math::{db_to_linear, linear_to_db, ms_to_samples, power_to_db};
pub use signal::AudioSignal;
