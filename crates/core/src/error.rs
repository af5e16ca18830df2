//! Error types for the bitpack toolkit.
//!
//! All operations return structured errors rather than panicking.
//! This keeps a bad capture file from producing a malformed artifact
//! and gives the operator a precise message instead.

use thiserror::Error;

/// Top-level error type for all operations in the toolkit.
///
/// Each variant corresponds to a specific failure domain:
/// - Symbol: a capture character that is not a bit-symbol
/// - Encode: stream-to-bytes packing failures
/// - Entropy: external entropy tool failures
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Capture text contained a character other than '0' or '1'
    #[error("symbol error: {0}")]
    Symbol(#[from] SymbolError),

    /// Packing the stream into bytes failed
    #[error("encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// Entropy estimation failed
    #[error("entropy error: {0}")]
    Entropy(#[from] EntropyError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-symbol validation errors.
#[derive(Debug, Error)]
pub enum SymbolError {
    /// A character other than '0' or '1' in the capture text.
    ///
    /// Line and column are 1-based and refer to the raw text, before
    /// newline stripping.
    #[error("invalid symbol {symbol:?} at line {line}, column {column}: expected '0' or '1'")]
    InvalidSymbol {
        symbol: char,
        line: usize,
        column: usize,
    },
}

/// Stream packing errors.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Stream length is not a multiple of 8 under the `Reject` policy
    #[error("stream of {length} symbols leaves {remainder} trailing bits (not a multiple of 8)")]
    TrailingBits { length: usize, remainder: usize },
}

/// Entropy estimation errors.
#[derive(Debug, Error)]
pub enum EntropyError {
    /// The external tool is not installed or not on PATH
    #[error("entropy tool {program:?} not found")]
    ToolMissing { program: String },

    /// The external tool ran but reported failure
    #[error("entropy tool {program:?} failed with {status}")]
    ToolFailed {
        program: String,
        status: std::process::ExitStatus,
    },

    /// The external tool printed something that is not UTF-8
    #[error("entropy tool {program:?} produced non-UTF-8 output")]
    InvalidOutput { program: String },

    /// Spawning or talking to the external tool failed
    #[error("I/O error while running entropy tool: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
