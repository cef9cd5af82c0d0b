//! Cross-analyzer integration tests on synthesized program material.

use maestro_analysis::{
    DynamicsAnalyzer, LoudnessMeter, ReferenceProfiler, SpectralAnalyzer,
};
use maestro_core::AudioSignal;
use std::f32::consts::PI;

const SAMPLE_RATE: u32 = 48000;

fn tone_mix(low_amp: f32, high_amp: f32, secs: f32) -> AudioSignal {
    let n = (secs * SAMPLE_RATE as f32) as usize;
    let samples: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            low_amp * (2.0 * PI * 100.0 * t).sin() + high_amp * (2.0 * PI * 8000.0 * t).sin()
        })
        .collect();
    AudioSignal::from_mono(samples, SAMPLE_RATE)
}

/// Tremolo-modulated tone: high dynamic range on a simple carrier.
fn pumping_tone(secs: f32) -> AudioSignal {
    let n = (secs * SAMPLE_RATE as f32) as usize;
    let samples: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let depth = 0.5 + 0.5 * (2.0 * PI * 2.0 * t).sin();
            (0.05 + 0.75 * depth) * (2.0 * PI * 440.0 * t).sin()
        })
        .collect();
    AudioSignal::from_mono(samples, SAMPLE_RATE)
}

#[test]
fn brighter_material_scores_higher_centroid() {
    let dark = tone_mix(0.5, 0.05, 2.0);
    let bright = tone_mix(0.05, 0.5, 2.0);

    let analyzer = SpectralAnalyzer::new();
    let dark_profile = analyzer.analyze(&dark);
    let bright_profile = analyzer.analyze(&bright);

    assert!(bright_profile.centroid_hz > dark_profile.centroid_hz * 2.0);
    assert!(bright_profile.high_energy_ratio > dark_profile.high_energy_ratio);
    assert!(dark_profile.low_energy_ratio > bright_profile.low_energy_ratio);
}

#[test]
fn steady_tone_has_less_dynamic_range_than_pumping_tone() {
    let steady = tone_mix(0.5, 0.0, 3.0);
    let pumping = pumping_tone(3.0);

    let analyzer = DynamicsAnalyzer::new();
    let steady_dr = analyzer.analyze(&steady).dynamic_range_db;
    let pumping_dr = analyzer.analyze(&pumping).dynamic_range_db;

    assert!(steady_dr < 1.0, "steady tone DR should be tiny, got {steady_dr}");
    assert!(
        pumping_dr > steady_dr + 6.0,
        "pumping tone should show much more DR: {pumping_dr} vs {steady_dr}"
    );
}

#[test]
fn profile_agrees_with_the_individual_analyzers() {
    let signal = pumping_tone(3.0);
    let profile = ReferenceProfiler::new().profile(&signal);

    let loudness = LoudnessMeter::new().measure(&signal);
    let dynamics = DynamicsAnalyzer::new().analyze(&signal);
    let spectrum = SpectralAnalyzer::new().analyze(&signal);

    assert_eq!(profile.target_lufs, loudness);
    assert_eq!(profile.peak_level, dynamics.peak_level);
    assert_eq!(profile.dynamic_range_db, dynamics.dynamic_range_db);
    assert_eq!(profile.spectral_centroid_hz, spectrum.centroid_hz);
    assert_eq!(profile.high_freq_energy_ratio, spectrum.high_energy_ratio);
}

#[test]
fn profile_serializes_to_json() {
    let profile = ReferenceProfiler::new().profile(&pumping_tone(2.0));
    let json = serde_json::to_string(&profile).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["target_lufs"].is_number());
    assert!(value["dynamic_range_db"].is_number());
    assert!(value["estimated_compression_ratio"].is_number());
}
