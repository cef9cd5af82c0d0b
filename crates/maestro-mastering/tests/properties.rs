//! Property-based tests for the mastering chain.
//!
//! Uses proptest to verify the invariants that must hold for any input:
//! finite output, a hard ceiling, and shape preservation.

use maestro_core::AudioSignal;
use maestro_mastering::{LimiterStage, MasterStage, MasteringConfig, MasteringPipeline, Mode};
use proptest::prelude::*;

const SAMPLE_RATE: u32 = 44100;

/// Arbitrary finite audio buffers, including hot ones well over 0 dBFS.
fn audio_buffer() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-2.0f32..=2.0, 256..4096)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The limiter's ceiling is a hard guarantee for any input and any
    /// valid ceiling.
    #[test]
    fn limiter_ceiling_always_holds(
        samples in audio_buffer(),
        ceiling in 0.5f32..=1.0,
    ) {
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE);
        let config = MasteringConfig {
            limiter_ceiling: ceiling,
            ..MasteringConfig::default()
        };

        let out = LimiterStage::new().apply(&signal, &config);
        prop_assert!(
            out.peak() <= ceiling + 1e-5,
            "peak {} exceeded ceiling {}",
            out.peak(),
            ceiling
        );
    }

    /// The full chain never produces NaN or infinity and never changes
    /// the signal's shape.
    #[test]
    fn pipeline_output_is_finite_and_shaped(
        samples in audio_buffer(),
        target_lufs in -40.0f32..=-8.0,
    ) {
        let frames = samples.len();
        let signal = AudioSignal::new(vec![samples.clone(), samples], SAMPLE_RATE);

        let result = MasteringPipeline::new()
            .master(&signal, &Mode::Standard { target_lufs })
            .unwrap();

        prop_assert!(result.signal.is_finite());
        prop_assert_eq!(result.signal.num_channels(), 2);
        prop_assert_eq!(result.signal.frames(), frames);
        prop_assert!(result.signal.peak() <= result.config.limiter_ceiling + 1e-5);
    }
}
