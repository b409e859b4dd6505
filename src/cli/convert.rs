//! Code conversion commands (`papertape convert ...`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use log::{info, warn};
use papertape::{Ita2, Tape, TapeEncoding};

use crate::cli::utils::{read_tape, write_output, write_tape};

/// Available conversion subcommands.
#[derive(Subcommand, Debug)]
pub enum ConvertCommand {
    /// Punch ASCII text as 5-level ITA2 code, inserting shifts as needed.
    Asc2baudot(ConvertArgs),
    /// Read a 5-level ITA2 tape back as ASCII text.
    Baudot2asc(ConvertArgs),
    /// Turn an 8-level ASCII source tape into plain text (NULs dropped, MSB cleared).
    Tape2txt(ConvertArgs),
}

/// Args shared by the conversion commands.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input file (default: stdin).
    pub input: Option<PathBuf>,
    /// Output file (`-` or omitted for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Execute a conversion command.
pub fn handle(command: ConvertCommand) -> Result<()> {
    match command {
        ConvertCommand::Asc2baudot(args) => asc2baudot(args),
        ConvertCommand::Baudot2asc(args) => baudot2asc(args),
        ConvertCommand::Tape2txt(args) => tape2txt(args),
    }
}

fn asc2baudot(args: ConvertArgs) -> Result<()> {
    let text = read_tape(args.input.as_deref())?;
    let encoder = Ita2;
    let skipped = text
        .as_bytes()
        .iter()
        .filter(|&&ch| !encoder.is_supported(ch))
        .count();
    if skipped > 0 {
        warn!("skipped {skipped} characters with no {} code", encoder.name());
    }
    let tape = Tape::encode(&encoder, text.as_bytes());
    info!("encoded {} characters as {} {} rows", text.len(), tape.len(), encoder.name());
    write_tape(args.output.as_deref(), &tape)
}

fn baudot2asc(args: ConvertArgs) -> Result<()> {
    let tape = read_tape(args.input.as_deref())?;
    let text = tape.decode_ita2();
    info!("decoded {} rows to {} characters", tape.len(), text.len());
    write_output(args.output.as_deref(), &text)
}

fn tape2txt(args: ConvertArgs) -> Result<()> {
    let tape = read_tape(args.input.as_deref())?;
    let text = tape.to_text();
    info!("output {} characters", text.len());
    write_output(args.output.as_deref(), &text)
}
