//! Convenience helpers shared across command handlers.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use papertape::{Tape, TapeWidth};

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Load a tape from `path`, or from stdin when it is omitted or `-`.
pub fn read_tape(path: Option<&Path>) -> Result<Tape> {
    match path {
        Some(path) if !is_stdio(path) => Tape::load(path),
        _ => {
            info!("reading from stdin");
            read_stdin().map(Tape::from_bytes)
        }
    }
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist bytes either to a file or to stdout when the path is omitted or `-`.
pub fn write_output(path: Option<&Path>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) if !is_stdio(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content)
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")
        }
    }
}

/// Buffered writer over a file, or over stdout when the path is omitted or `-`.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if !is_stdio(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Write a finished tape and log its length.
pub fn write_tape(path: Option<&Path>, tape: &Tape) -> Result<()> {
    write_output(path, tape.as_bytes())?;
    info!("output {} rows", tape.len());
    Ok(())
}

/// Clap-friendly tape width parser for bit counts such as `5` or `8`.
pub fn parse_width(input: &str) -> Result<TapeWidth, String> {
    let bits: u32 = input
        .parse()
        .map_err(|_| format!("tape width '{input}' is not a number of bits"))?;
    TapeWidth::from_bits(bits).map_err(|err| err.to_string())
}
