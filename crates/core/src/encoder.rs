//! Packing bit-symbol streams into bytes.
//!
//! Eight consecutive symbols form one byte, most significant bit first, in
//! stream order. "01001000" therefore packs to 0x48, and a stream of 8*N
//! symbols packs to exactly N bytes.
//!
//! # Trailing Bits
//!
//! A stream whose length is not a multiple of 8 ends in a partial group of
//! 1-7 symbols. What happens to it is an explicit policy:
//!
//! - `Reject`: fail with a structured error (default)
//! - `ZeroPad`: left-align the leftover symbols, fill the low bits with 0
//! - `Drop`: discard the partial group
//!
//! Silently parsing the short group as a smaller binary number would shift
//! its positional value and corrupt the artifact for downstream entropy
//! analysis, so that behavior is not offered.

use std::io::Write;

use crate::error::{EncodeError, Result};
use crate::stream::BitStream;

/// Policy for a final group of fewer than 8 symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingBits {
    /// Fail with `EncodeError::TrailingBits`
    Reject,
    /// Left-align the leftover symbols and pad the low bits with zeros
    ZeroPad,
    /// Discard the partial group
    Drop,
}

impl Default for TrailingBits {
    fn default() -> Self {
        TrailingBits::Reject
    }
}

impl std::str::FromStr for TrailingBits {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "reject" => Ok(TrailingBits::Reject),
            "pad" => Ok(TrailingBits::ZeroPad),
            "drop" => Ok(TrailingBits::Drop),
            other => Err(format!(
                "unknown trailing-bits policy {:?} (expected reject, pad, or drop)",
                other
            )),
        }
    }
}

/// Packs a bit-symbol stream into a byte artifact.
///
/// The encoder is a pure function of the stream plus its trailing-bits
/// policy; encoding the same stream twice yields byte-identical output.
#[derive(Debug, Clone, Copy)]
pub struct BitStreamEncoder {
    trailing: TrailingBits,
}

impl BitStreamEncoder {
    /// Create an encoder with the given trailing-bits policy.
    pub fn new(trailing: TrailingBits) -> Self {
        Self { trailing }
    }

    /// Pack the stream into a byte vector.
    ///
    /// Output length is len/8 bytes exactly for whole-byte streams; for a
    /// partial final group it is ceil(len/8) under `ZeroPad` and
    /// floor(len/8) under `Drop`.
    ///
    /// # Errors
    /// Returns `EncodeError::TrailingBits` under the `Reject` policy when
    /// the stream length is not a multiple of 8.
    pub fn encode(&self, stream: &BitStream) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(stream.len() / 8 + 1);

        // MSB-first accumulator, flushed on every full byte
        let mut acc = 0u8;
        let mut filled = 0u32;

        for bit in stream.bits() {
            acc = (acc << 1) | bit;
            filled += 1;
            if filled == 8 {
                bytes.push(acc);
                acc = 0;
                filled = 0;
            }
        }

        if filled > 0 {
            match self.trailing {
                TrailingBits::Reject => {
                    return Err(EncodeError::TrailingBits {
                        length: stream.len(),
                        remainder: filled as usize,
                    }
                    .into());
                }
                TrailingBits::ZeroPad => bytes.push(acc << (8 - filled)),
                TrailingBits::Drop => {}
            }
        }

        Ok(bytes)
    }

    /// Pack the stream and write the artifact to a sink.
    ///
    /// The sink is flushed before returning, so a downstream reader (the
    /// entropy tool) sees the complete artifact.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn encode_to_writer<W: Write>(&self, stream: &BitStream, sink: &mut W) -> Result<usize> {
        let bytes = self.encode(stream)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(bytes.len())
    }
}

impl Default for BitStreamEncoder {
    fn default() -> Self {
        Self::new(TrailingBits::default())
    }
}
