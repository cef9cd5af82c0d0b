//! The stage abstraction for the mastering chain.

use crate::config::MasteringConfig;
use maestro_core::AudioSignal;

/// One link of the mastering chain.
///
/// Stages are pure: they read the signal and the request's config and
/// produce a new signal, holding no state between requests. Filter and
/// envelope state is created fresh inside each `apply` call, which is
/// what makes whole requests safely parallel.
pub trait MasterStage {
    /// Short stable name, used in logs and error reports.
    fn name(&self) -> &'static str;

    /// Process the entire signal offline.
    fn apply(&self, signal: &AudioSignal, config: &MasteringConfig) -> AudioSignal;
}
