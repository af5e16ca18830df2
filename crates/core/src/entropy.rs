//! Entropy estimation seam.
//!
//! The statistical quality of the packed artifact is judged by an external
//! program (`ent` in the measurement setup). The core only needs "artifact
//! in, report text out", so the estimator is a capability the caller
//! injects. Tests use in-memory stubs and never spawn a process.

use std::path::Path;

use crate::error::EntropyError;

/// Produces a human-readable statistics report for a packed artifact.
///
/// Implementations receive the artifact path because the real estimator is
/// an external program that reads the file itself. Callers must have
/// written and flushed the artifact before invoking this.
pub trait EntropyEstimator {
    /// Return the estimator's report text for the artifact.
    fn report(&self, artifact: &Path) -> std::result::Result<String, EntropyError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct EchoEstimator;

    impl EntropyEstimator for EchoEstimator {
        fn report(&self, artifact: &Path) -> Result<String, EntropyError> {
            Ok(format!("report for {}", artifact.display()))
        }
    }

    struct MissingEstimator;

    impl EntropyEstimator for MissingEstimator {
        fn report(&self, _artifact: &Path) -> Result<String, EntropyError> {
            Err(EntropyError::ToolMissing {
                program: "ent".to_string(),
            })
        }
    }

    #[test]
    fn test_stub_estimator() {
        let report = EchoEstimator.report(&PathBuf::from("out.bin")).unwrap();
        assert_eq!(report, "report for out.bin");
    }

    #[test]
    fn test_estimator_errors_propagate() {
        let err = MissingEstimator.report(&PathBuf::from("out.bin")).unwrap_err();
        assert!(matches!(err, EntropyError::ToolMissing { .. }));
    }
}
