//! bitpack-core: Bit-capture packing and statistics for TRNG measurement runs
//!
//! This library provides the core components for turning a text capture of
//! '0'/'1' symbols into a packed binary artifact plus a statistics report:
//! - Parses and validates bit-symbol streams
//! - Packs consecutive 8-symbol groups into bytes (MSB first)
//! - Counts per-character and per-block frequencies over the raw text
//! - Applies Von Neumann family conditioning transforms
//! - Renders the per-run log report
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `stream`: validated bit-symbol streams
//! - `encoder`: stream-to-bytes packing with an explicit trailing-bits policy
//! - `frequency`: character and fixed-width block frequency tables
//! - `conditioning`: bias-reduction transforms over bit pairs
//! - `entropy`: the injected entropy-estimator seam
//! - `report`: log report assembly and table rendering
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Pure transformations**: Every analysis is a named function of its input
//! - **Process-free**: The external entropy tool sits behind a trait, so the
//!   core is testable without spawning anything

pub mod conditioning;
pub mod encoder;
pub mod entropy;
pub mod error;
pub mod frequency;
pub mod report;
pub mod stream;

// Re-export commonly used types
pub use error::{Error, Result};
