//! Encodes a short sample containing characters Shift_JIS cannot represent
//! and writes the bytes to a file.
//!
//! Run with
//!
//! ```bash
//! cargo run -p ncr-fallback --example write_sjis -- out.txt
//! ```
//!
//! Set `RUST_LOG=ncr_fallback=debug` to see each substitution.

use std::{env, fs, process::ExitCode};

use ncr_fallback::{FallbackEncoder, FallbackOptions};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "\u{3251}\u{1f600}\u{29e3d}";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: write_sjis <output-file>");
        return ExitCode::from(2);
    };

    // Built once; every encode call borrows it.
    let encoder = FallbackEncoder::new(FallbackOptions::default());

    let bytes = match encoder.encode(SAMPLE) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("encoding failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = fs::write(&path, &bytes) {
        eprintln!("cannot write {path}: {err}");
        return ExitCode::FAILURE;
    }
    println!("wrote {} bytes to {path}", bytes.len());
    ExitCode::SUCCESS
}
