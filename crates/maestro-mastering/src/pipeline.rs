//! The fixed mastering chain: EQ, compression, normalization, limiting.

use crate::compressor::CompressorStage;
use crate::config::MasteringConfig;
use crate::eq::EqStage;
use crate::error::MasteringError;
use crate::limiter::LimiterStage;
use crate::normalizer::LoudnessNormalizer;
use crate::stage::MasterStage;
use maestro_analysis::{ReferenceProfile, SpectralAnalyzer};
use maestro_core::AudioSignal;
use serde::Serialize;

/// How the mastering targets were chosen for a request.
#[derive(Debug, Clone, Copy)]
pub enum Mode {
    /// Fixed defaults with a caller-supplied loudness target.
    Standard {
        /// Integrated loudness target in LUFS.
        target_lufs: f32,
    },
    /// Every target derived from a profiled reference track. The
    /// reference wins completely: no caller-supplied loudness target
    /// participates in this variant.
    Reference {
        /// Profile measured from the reference track.
        profile: ReferenceProfile,
    },
}

/// Which mode produced a result, without the mode's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// Standard mode.
    Standard,
    /// Reference mode.
    Reference,
}

impl ModeKind {
    /// Stable lowercase name for logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ModeKind::Standard => "standard",
            ModeKind::Reference => "reference",
        }
    }
}

/// Output of one mastering request.
#[derive(Debug, Clone)]
pub struct MasteringResult {
    /// The mastered signal.
    pub signal: AudioSignal,
    /// Which mode was used.
    pub mode: ModeKind,
    /// True when the targets came from a reference profile.
    pub reference_used: bool,
    /// The fully resolved config the chain ran with.
    pub config: MasteringConfig,
    /// Gain applied by the normalization stage, in dB.
    pub normalization_gain_db: f32,
    /// True when the input measured silent and was passed through the
    /// normalizer unchanged.
    pub silent: bool,
}

/// The mastering pipeline.
///
/// Stage order is fixed: EQ first so tonal correction happens before
/// level decisions, compression before normalization so the loudness
/// target is measured on the compressed signal, and the limiter last so
/// nothing after it can push a sample back over the ceiling.
///
/// The pipeline is stateless between requests; a single instance can
/// serve many threads concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasteringPipeline;

impl MasteringPipeline {
    /// Create the pipeline.
    pub fn new() -> Self {
        Self
    }

    /// Master `signal` according to `mode`.
    ///
    /// Config validation happens before any audio is touched; a
    /// non-finite sample after any stage aborts the request with
    /// [`MasteringError::NumericInstability`] rather than returning
    /// corrupt audio.
    pub fn master(
        &self,
        signal: &AudioSignal,
        mode: &Mode,
    ) -> Result<MasteringResult, MasteringError> {
        let (config, kind) = match mode {
            Mode::Standard { target_lufs } => {
                (MasteringConfig::standard(*target_lufs), ModeKind::Standard)
            }
            Mode::Reference { profile } => {
                let input_spectrum = SpectralAnalyzer::new().analyze(signal);
                (
                    MasteringConfig::from_reference(profile, &input_spectrum),
                    ModeKind::Reference,
                )
            }
        };
        config.validate()?;

        tracing::info!(
            mode = kind.as_str(),
            target_lufs = config.target_lufs,
            frames = signal.frames(),
            channels = signal.num_channels(),
            sample_rate = signal.sample_rate(),
            "mastering"
        );

        let eq = EqStage::new();
        let compressor = CompressorStage::new();

        let current = Self::run_stage(&eq, signal, &config)?;
        let current = Self::run_stage(&compressor, &current, &config)?;

        let outcome = LoudnessNormalizer::new().apply(&current, &config);
        if !outcome.signal.is_finite() {
            return Err(MasteringError::NumericInstability {
                stage: "normalizer",
            });
        }

        let limited = Self::run_stage(&LimiterStage::new(), &outcome.signal, &config)?;

        Ok(MasteringResult {
            signal: limited,
            mode: kind,
            reference_used: kind == ModeKind::Reference,
            config,
            normalization_gain_db: outcome.gain_db,
            silent: outcome.silent,
        })
    }

    fn run_stage(
        stage: &dyn MasterStage,
        signal: &AudioSignal,
        config: &MasteringConfig,
    ) -> Result<AudioSignal, MasteringError> {
        let out = stage.apply(signal, config);
        if !out.is_finite() {
            return Err(MasteringError::NumericInstability { stage: stage.name() });
        }
        tracing::debug!(stage = stage.name(), peak = out.peak(), "stage complete");
        Ok(out)
    }
}
