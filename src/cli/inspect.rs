//! Read-only tape inspection (`papertape inspect ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use papertape::TapeWidth;

use crate::cli::utils::{parse_width, read_tape, write_output};

/// Available inspection subcommands.
#[derive(Subcommand, Debug)]
pub enum InspectCommand {
    /// Print a hex dump with the 7-bit ASCII reading of each row.
    Hexdump(HexdumpArgs),
    /// Summarise length, holes punched and content digest.
    Info(InfoArgs),
}

/// Args for `papertape inspect hexdump`.
#[derive(Args, Debug)]
pub struct HexdumpArgs {
    /// Input tape (default: stdin).
    pub input: Option<PathBuf>,
}

/// Args for `papertape inspect info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Input tape (default: stdin).
    pub input: Option<PathBuf>,
    /// Tape width in data bits.
    #[arg(short = 'w', long = "width", default_value = "8", value_parser = parse_width)]
    pub width: TapeWidth,
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute an inspection command.
pub fn handle(command: InspectCommand) -> Result<()> {
    match command {
        InspectCommand::Hexdump(args) => hexdump(args),
        InspectCommand::Info(args) => info(args),
    }
}

fn hexdump(args: HexdumpArgs) -> Result<()> {
    let tape = read_tape(args.input.as_deref())?;
    write_output(None, tape.hexdump().as_bytes())
}

fn info(args: InfoArgs) -> Result<()> {
    let tape = read_tape(args.input.as_deref())?;
    let summary = tape.summary(args.width);
    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("failed to serialise summary")?;
        println!("{json}");
        return Ok(());
    }
    println!("Rows:          {}", summary.rows);
    println!("Width:         {}-level", summary.level);
    println!("Length:        {:.1} in", summary.length_inches);
    println!("Holes punched: {}", summary.punched_holes);
    println!("SHA-256:       {}", summary.sha256);
    Ok(())
}
