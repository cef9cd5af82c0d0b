//! Property-based tests for the analyzers.

use maestro_analysis::{
    DynamicsAnalyzer, LoudnessMeter, ReferenceProfiler, SILENCE_FLOOR_LUFS, SpectralAnalyzer,
};
use maestro_core::AudioSignal;
use proptest::prelude::*;

const SAMPLE_RATE: u32 = 44100;

fn loud_buffer() -> impl Strategy<Value = Vec<f32>> {
    // One second of material, always well above the silence floor.
    prop::collection::vec(-0.8f32..=0.8, 44100..=44100).prop_filter(
        "needs non-trivial energy",
        |v| v.iter().map(|x| x * x).sum::<f32>() / v.len() as f32 > 1e-4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Scaling a signal by a known gain shifts its integrated loudness by
    /// the same number of dB.
    #[test]
    fn loudness_tracks_applied_gain(
        samples in loud_buffer(),
        gain_db in -12.0f32..=6.0,
    ) {
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE);
        let scaled = signal.scaled(maestro_core::db_to_linear(gain_db));

        let meter = LoudnessMeter::new();
        let base = meter.measure(&signal);
        let shifted = meter.measure(&scaled);

        prop_assert!(base > SILENCE_FLOOR_LUFS);
        prop_assert!(
            ((shifted - base) - gain_db).abs() < 0.3,
            "gain {gain_db} dB moved loudness by {}",
            shifted - base
        );
    }

    /// Every descriptor is finite and within its documented range for any
    /// bounded input.
    #[test]
    fn descriptors_stay_in_range(samples in loud_buffer()) {
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE);
        let profile = ReferenceProfiler::new().profile(&signal);

        prop_assert!(profile.target_lufs.is_finite());
        prop_assert!(profile.peak_level >= 0.0 && profile.peak_level <= 0.8 + 1e-6);
        prop_assert!(profile.dynamic_range_db >= 0.0);
        prop_assert!(
            profile.estimated_compression_ratio >= 1.0
                && profile.estimated_compression_ratio <= 10.0
        );
        prop_assert!(
            profile.spectral_centroid_hz >= 0.0
                && profile.spectral_centroid_hz <= SAMPLE_RATE as f32 / 2.0
        );
        prop_assert!(
            profile.spectral_rolloff_hz >= 0.0
                && profile.spectral_rolloff_hz <= SAMPLE_RATE as f32 / 2.0
        );
        prop_assert!(
            (0.0..=1.0).contains(&profile.high_freq_energy_ratio)
        );
        prop_assert!(
            (0.0..=1.0).contains(&profile.low_freq_energy_ratio)
        );
    }

    /// Analyzers are pure: two runs over the same buffer agree bit for bit.
    #[test]
    fn analysis_is_deterministic(samples in loud_buffer()) {
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE);

        let spectral = SpectralAnalyzer::new();
        let dynamics = DynamicsAnalyzer::new();

        let s1 = spectral.analyze(&signal);
        let s2 = spectral.analyze(&signal);
        prop_assert_eq!(s1.centroid_hz.to_bits(), s2.centroid_hz.to_bits());

        let d1 = dynamics.analyze(&signal);
        let d2 = dynamics.analyze(&signal);
        prop_assert_eq!(d1.dynamic_range_db.to_bits(), d2.dynamic_range_db.to_bits());
    }
}
