//! External entropy tool invocation.
//!
//! The measurement pipeline judges artifact quality with `ent`, which takes
//! the artifact path and prints statistics to stdout. Any program with the
//! same calling convention can be substituted via --entropy-tool. The tool's
//! output is captured verbatim for the log; its internals are opaque here.

use std::io;
use std::path::Path;
use std::process::Command;

use bitpack_core::entropy::EntropyEstimator;
use bitpack_core::error::EntropyError;

/// Runs the configured external program on the artifact path and captures
/// its standard output.
#[derive(Debug, Clone)]
pub struct ExternalEntropyTool {
    program: String,
}

impl ExternalEntropyTool {
    /// Create a runner for the given program name or path.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl EntropyEstimator for ExternalEntropyTool {
    fn report(&self, artifact: &Path) -> Result<String, EntropyError> {
        let output = Command::new(&self.program)
            .arg(artifact)
            .output()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => EntropyError::ToolMissing {
                    program: self.program.clone(),
                },
                _ => EntropyError::Io(err),
            })?;

        if !output.status.success() {
            return Err(EntropyError::ToolFailed {
                program: self.program.clone(),
                status: output.status,
            });
        }

        String::from_utf8(output.stdout).map_err(|_| EntropyError::InvalidOutput {
            program: self.program.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_program() {
        let tool = ExternalEntropyTool::new("bitpack-no-such-entropy-tool");
        let err = tool.report(&PathBuf::from("out.bin")).unwrap_err();
        assert!(matches!(err, EntropyError::ToolMissing { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        // echo stands in for the entropy tool: prints its argument
        let tool = ExternalEntropyTool::new("echo");
        let report = tool.report(&PathBuf::from("out.bin")).unwrap();
        assert_eq!(report.trim_end(), "out.bin");
    }
}
