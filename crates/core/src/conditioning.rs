//! Bias-reduction transforms for raw TRNG captures.
//!
//! Raw hardware bits are rarely uniform. These transforms consume the
//! stream as non-overlapping bit pairs (a trailing odd bit is ignored) and
//! emit a shorter, better-conditioned stream:
//!
//! | pair | von neumann | xor | residual |
//! |------|-------------|-----|----------|
//! | 00   | (nothing)   | 0   | 0        |
//! | 01   | 1           | 1   | (nothing)|
//! | 10   | 0           | 1   | (nothing)|
//! | 11   | (nothing)   | 0   | 1        |
//!
//! The iterated Von Neumann cascade emits, per pair, whichever of the
//! von-neumann, xor, and residual bits exist, in that order. The xor bit
//! always exists, so the cascade emits exactly 2 bits per pair and loses
//! no information relative to the three separate streams.
//!
//! Output length laws for n input bits: xor emits floor(n/2) bits, von
//! neumann and residual together emit floor(n/2) bits, and the cascade
//! emits 2*floor(n/2) bits.

use std::str::FromStr;

use crate::stream::BitStream;

/// Von Neumann extraction: '10' emits '0', '01' emits '1', equal pairs
/// emit nothing. Removes bias from independent samples at the cost of
/// discarding at least half the input.
pub fn von_neumann(stream: &BitStream) -> BitStream {
    let mut out = String::with_capacity(stream.len() / 2);
    for (a, b) in bit_pairs(stream) {
        if a != b {
            out.push(symbol(b));
        }
    }
    BitStream::from_symbols(out)
}

/// XOR of each pair: one output bit per pair.
pub fn xor(stream: &BitStream) -> BitStream {
    let mut out = String::with_capacity(stream.len() / 2);
    for (a, b) in bit_pairs(stream) {
        out.push(symbol(a ^ b));
    }
    BitStream::from_symbols(out)
}

/// Residual extraction: '11' emits '1', '00' emits '0', unequal pairs
/// emit nothing. Complements Von Neumann, keeping the pairs it discards.
pub fn residual(stream: &BitStream) -> BitStream {
    let mut out = String::with_capacity(stream.len() / 2);
    for (a, b) in bit_pairs(stream) {
        if a == b {
            out.push(symbol(a));
        }
    }
    BitStream::from_symbols(out)
}

/// Iterated Von Neumann cascade: per pair, the von-neumann bit (if any),
/// then the xor bit, then the residual bit (if any).
pub fn iterated_von_neumann(stream: &BitStream) -> BitStream {
    let mut out = String::with_capacity(stream.len());
    for (a, b) in bit_pairs(stream) {
        if a != b {
            out.push(symbol(b));
        }
        out.push(symbol(a ^ b));
        if a == b {
            out.push(symbol(a));
        }
    }
    BitStream::from_symbols(out)
}

/// A selectable conditioning transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conditioner {
    VonNeumann,
    Xor,
    Residual,
    IteratedVonNeumann,
}

impl Conditioner {
    /// Every transform, in cascade order.
    pub const ALL: [Conditioner; 4] = [
        Conditioner::VonNeumann,
        Conditioner::Xor,
        Conditioner::Residual,
        Conditioner::IteratedVonNeumann,
    ];

    /// Apply this transform to a stream.
    pub fn apply(self, stream: &BitStream) -> BitStream {
        match self {
            Conditioner::VonNeumann => von_neumann(stream),
            Conditioner::Xor => xor(stream),
            Conditioner::Residual => residual(stream),
            Conditioner::IteratedVonNeumann => iterated_von_neumann(stream),
        }
    }

    /// Human-readable name for log sections and status lines.
    pub fn label(self) -> &'static str {
        match self {
            Conditioner::VonNeumann => "von neumann",
            Conditioner::Xor => "xor",
            Conditioner::Residual => "residual",
            Conditioner::IteratedVonNeumann => "iterated von neumann",
        }
    }

    /// Short suffix for derived artifact file names.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Conditioner::VonNeumann => "vn",
            Conditioner::Xor => "xor",
            Conditioner::Residual => "sr",
            Conditioner::IteratedVonNeumann => "ivn",
        }
    }
}

impl FromStr for Conditioner {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "vn" | "von-neumann" => Ok(Conditioner::VonNeumann),
            "xor" => Ok(Conditioner::Xor),
            "sr" | "residual" => Ok(Conditioner::Residual),
            "ivn" | "iterated" => Ok(Conditioner::IteratedVonNeumann),
            other => Err(format!(
                "unknown conditioner {:?} (expected vn, xor, sr, ivn, or all)",
                other
            )),
        }
    }
}

/// Iterate non-overlapping bit-value pairs; a trailing odd bit is dropped.
fn bit_pairs(stream: &BitStream) -> impl Iterator<Item = (u8, u8)> + '_ {
    stream
        .as_str()
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (pair[0] - b'0', pair[1] - b'0'))
}

fn symbol(bit: u8) -> char {
    if bit == 1 {
        '1'
    } else {
        '0'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> BitStream {
        BitStream::parse(text).unwrap()
    }

    #[test]
    fn test_von_neumann_pairs() {
        // pairs: 01 10 01 11 00
        let out = von_neumann(&stream("0110011100"));
        assert_eq!(out.as_str(), "101");
    }

    #[test]
    fn test_von_neumann_constant_stream_is_empty() {
        assert!(von_neumann(&stream("00000000")).is_empty());
        assert!(von_neumann(&stream("11111111")).is_empty());
    }

    #[test]
    fn test_xor_pairs() {
        // pairs: 01 10 01 11 00
        let out = xor(&stream("0110011100"));
        assert_eq!(out.as_str(), "11100");
    }

    #[test]
    fn test_xor_alternating_stream_is_all_ones() {
        let out = xor(&stream("01010101"));
        assert_eq!(out.as_str(), "1111");
    }

    #[test]
    fn test_residual_pairs() {
        // pairs: 01 10 01 11 00
        let out = residual(&stream("0110011100"));
        assert_eq!(out.as_str(), "10");
    }

    #[test]
    fn test_iterated_cascade_pairs() {
        // 01 -> vn 1, xor 1; 10 -> vn 0, xor 1; 11 -> xor 0, sr 1;
        // 00 -> xor 0, sr 0
        let out = iterated_von_neumann(&stream("01101100"));
        assert_eq!(out.as_str(), "11010100");
    }

    #[test]
    fn test_trailing_odd_bit_ignored() {
        assert_eq!(xor(&stream("011")).as_str(), "1");
        assert_eq!(von_neumann(&stream("1")).len(), 0);
        assert_eq!(iterated_von_neumann(&stream("001")).as_str(), "00");
    }

    #[test]
    fn test_length_laws() {
        let input = stream("01101110010010110100111000101101");
        let n = input.len();
        assert_eq!(xor(&input).len(), n / 2);
        assert_eq!(von_neumann(&input).len() + residual(&input).len(), n / 2);
        assert_eq!(iterated_von_neumann(&input).len(), 2 * (n / 2));
    }

    #[test]
    fn test_outputs_are_valid_streams() {
        let input = stream("0110111001001011");
        for conditioner in Conditioner::ALL {
            let out = conditioner.apply(&input);
            assert!(out.as_str().bytes().all(|b| b == b'0' || b == b'1'));
            // Reparsing must accept the output unchanged
            assert_eq!(BitStream::parse(out.as_str()).unwrap(), out);
        }
    }

    #[test]
    fn test_empty_stream() {
        for conditioner in Conditioner::ALL {
            assert!(conditioner.apply(&stream("")).is_empty());
        }
    }

    #[test]
    fn test_conditioner_from_str() {
        assert_eq!("vn".parse::<Conditioner>().unwrap(), Conditioner::VonNeumann);
        assert_eq!("xor".parse::<Conditioner>().unwrap(), Conditioner::Xor);
        assert_eq!("sr".parse::<Conditioner>().unwrap(), Conditioner::Residual);
        assert_eq!(
            "ivn".parse::<Conditioner>().unwrap(),
            Conditioner::IteratedVonNeumann
        );
        assert!("foo".parse::<Conditioner>().is_err());
    }
}
