//! `rangecodec` command-line compressor/decompressor.
//!
//! Filename and mode can be passed as arguments; whichever is missing
//! is prompted for on stdin. Compression always writes `encoded.bin`,
//! decompression always writes `decoded.bin`. Diagnostics (entropy,
//! sizes, ratio, timing) are reported after coding completes and never
//! feed back into the coder.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use thiserror::Error;

use rangecodec_core::{compress, decompress, shannon_entropy, CodecError, Histogram};

const COMPRESSED_OUTPUT: &str = "encoded.bin";
const DECOMPRESSED_OUTPUT: &str = "decoded.bin";

#[derive(Parser)]
#[command(
    name = "rangecodec",
    about = "Static-model range coder for byte streams"
)]
struct Args {
    /// Input file; prompted for when omitted.
    input: Option<PathBuf>,

    /// Mode selector: 1 = compress, 2 = decompress; prompted for when
    /// omitted.
    #[arg(short, long)]
    mode: Option<String>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("cannot open '{path}': {source}")]
    InputOpen {
        path: String,
        source: io::Error,
    },
    #[error("cannot create '{path}': {source}")]
    OutputCreate {
        path: String,
        source: io::Error,
    },
    #[error("invalid mode '{0}': enter '1' to compress or '2' to decompress")]
    InvalidMode(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Mode {
    Compress,
    Decompress,
}

fn parse_mode(selector: &str) -> Result<Mode, CliError> {
    match selector.trim() {
        "1" => Ok(Mode::Compress),
        "2" => Ok(Mode::Decompress),
        other => Err(CliError::InvalidMode(other.to_string())),
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

struct CompressReport {
    original_size: usize,
    compressed_size: usize,
    entropy: f64,
    elapsed: Duration,
}

struct DecompressReport {
    decompressed_size: usize,
    elapsed: Duration,
}

fn compress_file(input_path: &Path, output_path: &Path) -> Result<CompressReport, CliError> {
    let input = fs::read(input_path).map_err(|source| CliError::InputOpen {
        path: input_path.display().to_string(),
        source,
    })?;

    let start = Instant::now();
    let artifact = compress(&input)?;
    let elapsed = start.elapsed();

    fs::write(output_path, &artifact).map_err(|source| CliError::OutputCreate {
        path: output_path.display().to_string(),
        source,
    })?;

    // Diagnostic only; computed after encoding completes.
    let entropy = shannon_entropy(&Histogram::from_bytes(&input));

    Ok(CompressReport {
        original_size: input.len(),
        compressed_size: artifact.len(),
        entropy,
        elapsed,
    })
}

fn decompress_file(input_path: &Path, output_path: &Path) -> Result<DecompressReport, CliError> {
    let artifact = fs::read(input_path).map_err(|source| CliError::InputOpen {
        path: input_path.display().to_string(),
        source,
    })?;

    let start = Instant::now();
    let output = decompress(&artifact)?;
    let elapsed = start.elapsed();

    fs::write(output_path, &output).map_err(|source| CliError::OutputCreate {
        path: output_path.display().to_string(),
        source,
    })?;

    Ok(DecompressReport {
        decompressed_size: output.len(),
        elapsed,
    })
}

fn print_compress_report(report: &CompressReport) {
    println!(
        "Shannon entropy: {:.4} bits per symbol",
        report.entropy
    );
    println!("\nCompression results:");
    println!("Original size: {} bytes", report.original_size);
    println!("Compressed size: {} bytes", report.compressed_size);
    if report.original_size > 0 {
        let ratio =
            (1.0 - report.compressed_size as f64 / report.original_size as f64) * 100.0;
        println!("Compression ratio: {:.2}%", ratio);
    }
    println!("Time taken: {} ms", report.elapsed.as_millis());
}

fn print_decompress_report(report: &DecompressReport) {
    println!("\nDecompression results:");
    println!("Decompressed size: {} bytes", report.decompressed_size);
    println!("Time taken: {} ms", report.elapsed.as_millis());
}

fn run(args: Args) -> Result<(), CliError> {
    let input_path = match args.input {
        Some(path) => path,
        None => PathBuf::from(prompt("Enter filename: ")?),
    };
    let mode = match args.mode {
        Some(selector) => parse_mode(&selector)?,
        None => parse_mode(&prompt("Enter '1' to compress or '2' to decompress: ")?)?,
    };

    match mode {
        Mode::Compress => {
            println!("Compressing...");
            let report = compress_file(&input_path, Path::new(COMPRESSED_OUTPUT))?;
            print_compress_report(&report);
        }
        Mode::Decompress => {
            println!("Decompressing...");
            let report = decompress_file(&input_path, Path::new(DECOMPRESSED_OUTPUT))?;
            print_decompress_report(&report);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
