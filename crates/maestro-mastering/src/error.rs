//! Error types for the mastering pipeline.

use thiserror::Error;

/// Errors that can occur while mastering a signal.
///
/// Failures are terminal for the whole request: the pipeline never
/// returns partial output and never retries — retries belong to the
/// caller.
#[derive(Debug, Error)]
pub enum MasteringError {
    /// A configuration field is out of range. Rejected before any
    /// processing starts.
    #[error("invalid config: {field}: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// The signal measures at the silence floor, so a loudness gain is
    /// undefined. The pipeline downgrades this to a pass-through with a
    /// warning rather than failing the request.
    #[error("signal is at the loudness silence floor; normalization gain is undefined")]
    SilentSignal,

    /// A stage produced a non-finite sample. No output is returned.
    #[error("non-finite samples after the {stage} stage")]
    NumericInstability {
        /// Name of the stage that produced the bad samples.
        stage: &'static str,
    },
}

impl MasteringError {
    /// Create an invalid-config error.
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        MasteringError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_display() {
        let err = MasteringError::invalid_config("compression_ratio", "must be >= 1");
        assert_eq!(
            err.to_string(),
            "invalid config: compression_ratio: must be >= 1"
        );
    }

    #[test]
    fn numeric_instability_names_stage() {
        let err = MasteringError::NumericInstability { stage: "limiter" };
        assert!(err.to_string().contains("limiter"), "got: {err}");
    }

    #[test]
    fn silent_signal_display() {
        let msg = MasteringError::SilentSignal.to_string();
        assert!(msg.contains("silence floor"), "got: {msg}");
    }
}
