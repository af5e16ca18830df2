//! bitpack: pack a TRNG bit capture into bytes and log its statistics.
//!
//! Pipeline per run:
//! 1. (optional) synthesize the capture file
//! 2. read the capture and parse the bit-symbol stream
//! 3. pack the stream into the binary artifact
//! 4. run the external entropy tool on the artifact
//! 5. count per-character and per-block frequencies over the raw text
//! 6. apply any requested conditioning transforms
//! 7. append the run report to the log file
//!
//! A usage error exits 1 before any file is touched. A missing entropy
//! tool is logged and skipped; everything else is fatal.

mod config;
mod entropy_tool;
mod sample_gen;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use bitpack_core::encoder::BitStreamEncoder;
use bitpack_core::entropy::EntropyEstimator;
use bitpack_core::error::{EntropyError, Error};
use bitpack_core::frequency::{self, BLOCK_WIDTH};
use bitpack_core::report::{render_block_table, render_char_table, Report};
use bitpack_core::stream::BitStream;

use config::Config;
use entropy_tool::ExternalEntropyTool;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            config::print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Error> {
    if let Some(gen) = &config.gen {
        sample_gen::write_capture_file(&config.input_file, gen.seed, gen.bits, gen.bias)?;
        println!(
            "Generated {} sample bits (seed {}, bias {}) -> {}",
            gen.bits,
            gen.seed,
            gen.bias,
            config.input_file.display()
        );
    }

    let raw = std::fs::read_to_string(&config.input_file)?;
    let stream = BitStream::parse(&raw)?;
    println!(
        "Read {} characters, {} bit symbols from {}",
        raw.chars().count(),
        stream.len(),
        config.input_file.display()
    );

    let mut report = Report::new(
        &config.input_file.display().to_string(),
        &config.output_file.display().to_string(),
        &chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string(),
    );

    // Pack and close the artifact before the entropy tool reads it
    let encoder = BitStreamEncoder::new(config.trailing);
    let byte_count = {
        let mut artifact = File::create(&config.output_file)?;
        encoder.encode_to_writer(&stream, &mut artifact)?
    };
    println!("Packed {} bytes -> {}", byte_count, config.output_file.display());
    report.section(
        "binary artifact",
        &format!(
            "{} bytes written to {}",
            byte_count,
            config.output_file.display()
        ),
    );

    match &config.entropy_tool {
        Some(program) => {
            let tool = ExternalEntropyTool::new(program.clone());
            match tool.report(&config.output_file) {
                Ok(text) => report.section("entropy", &text),
                Err(err @ EntropyError::ToolMissing { .. }) => {
                    // The packing and counts stand on their own
                    println!("warning: {}, skipping entropy step", err);
                    report.section("entropy", &format!("skipped: {}", err));
                }
                Err(err) => return Err(err.into()),
            }
        }
        None => report.section("entropy", "skipped: disabled with --no-entropy"),
    }

    let bit_table = frequency::count_symbols(&raw);
    report.section("bit counts (raw)", &render_char_table(&bit_table));

    let block_table = frequency::count_blocks(&raw, BLOCK_WIDTH);
    report.section("byte-block counts (raw)", &render_block_table(&block_table));

    for conditioner in &config.conditioners {
        let conditioned = conditioner.apply(&stream);
        let path = conditioned_path(&config.output_file, conditioner.file_suffix());
        std::fs::write(&path, conditioned.as_str())?;
        println!(
            "Conditioned ({}) {} bits -> {}",
            conditioner.label(),
            conditioned.len(),
            path.display()
        );
        report.section(
            &format!("conditioning: {}", conditioner.label()),
            &format!(
                "{} bits in, {} bits out, written to {}",
                stream.len(),
                conditioned.len(),
                path.display()
            ),
        );
    }

    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    log.write_all(report.render().as_bytes())?;
    log.flush()?;
    println!("Report appended -> {}", config.log_file.display());

    Ok(())
}

/// Derived artifact name for a conditioned stream: the output file's stem
/// plus the transform suffix, as text.
fn conditioned_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("capture");
    output.with_file_name(format!("{}_{}.txt", stem, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditioned_path() {
        assert_eq!(
            conditioned_path(Path::new("runs/run7.bin"), "vn"),
            PathBuf::from("runs/run7_vn.txt")
        );
        assert_eq!(
            conditioned_path(Path::new("capture.bin"), "ivn"),
            PathBuf::from("capture_ivn.txt")
        );
    }
}
