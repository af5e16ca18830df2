//! Synthetic capture generation for exercising the pipeline.
//!
//! Real captures come from the measurement rig. For development the tool
//! can synthesize a '0'/'1' text with a chosen ones-bias, so the frequency
//! tables and the conditioning transforms have something visible to
//! correct.
//!
//! All randomness comes from a seeded ChaCha8 RNG: the same seed always
//! produces the same capture.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `bits` bit-symbols of capture text.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `bits`: number of symbols to generate
/// - `bias`: probability of emitting '1', in [0.0, 1.0]
pub fn generate_capture(seed: u64, bits: usize, bias: f64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(bits);
    for _ in 0..bits {
        text.push(if rng.gen_bool(bias) { '1' } else { '0' });
    }
    text
}

/// Generate a capture and write it to a file.
pub fn write_capture_file(
    path: &Path,
    seed: u64,
    bits: usize,
    bias: f64,
) -> std::io::Result<()> {
    std::fs::write(path, generate_capture(seed, bits, bias))
}
