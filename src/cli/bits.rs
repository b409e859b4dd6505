//! Bit-level transforms (`papertape bits ...`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use papertape::{Tape, TapeWidth};

use crate::cli::utils::{parse_width, read_tape, write_tape};

/// Available bit transform subcommands.
#[derive(Subcommand, Debug)]
pub enum BitsCommand {
    /// Invert every bit, swapping punched and unpunched positions.
    Invert(BitsArgs),
    /// Combine two tapes with a bitwise OR, stopping at the shorter one.
    Or(OrArgs),
    /// Set the MSB of every row except NUL leader and trailer.
    SetMsb(BitsArgs),
    /// Clear the MSB of every row.
    ClearMsb(BitsArgs),
    /// Keep only the low five bits of every row.
    Mask5(BitsArgs),
    /// Put even parity in the top data bit.
    Parity(WidthArgs),
    /// Reverse the order of the data bits in every row.
    Reverse(WidthArgs),
}

/// Args for the single-input transforms.
#[derive(Args, Debug)]
pub struct BitsArgs {
    /// Input tape (default: stdin).
    pub input: Option<PathBuf>,
    /// Output file (`-` or omitted for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Args for transforms that depend on the tape width.
#[derive(Args, Debug)]
pub struct WidthArgs {
    #[command(flatten)]
    pub io: BitsArgs,
    /// Tape width in data bits.
    #[arg(short = 'w', long = "width", default_value = "8", value_parser = parse_width)]
    pub width: TapeWidth,
}

/// Args for `papertape bits or`.
#[derive(Args, Debug)]
pub struct OrArgs {
    /// First tape.
    pub first: PathBuf,
    /// Second tape.
    pub second: PathBuf,
    /// Output file (`-` or omitted for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Execute a bit transform command.
pub fn handle(command: BitsCommand) -> Result<()> {
    match command {
        BitsCommand::Invert(args) => transform(args, Tape::invert),
        BitsCommand::Or(args) => or(args),
        BitsCommand::SetMsb(args) => transform(args, Tape::set_msb_except_nul),
        BitsCommand::ClearMsb(args) => transform(args, Tape::clear_msb),
        BitsCommand::Mask5(args) => transform(args, Tape::mask5),
        BitsCommand::Parity(args) => {
            let width = args.width;
            transform(args.io, |tape| tape.apply_even_parity(width))
        }
        BitsCommand::Reverse(args) => {
            let bits = args.width.data_bits();
            transform(args.io, |tape| tape.reverse_bits(bits))
        }
    }
}

fn transform(args: BitsArgs, apply: impl FnOnce(&mut Tape)) -> Result<()> {
    let mut tape = read_tape(args.input.as_deref())?;
    apply(&mut tape);
    write_tape(args.output.as_deref(), &tape)
}

fn or(args: OrArgs) -> Result<()> {
    let first = read_tape(Some(args.first.as_path()))?;
    let second = read_tape(Some(args.second.as_path()))?;
    let combined = first.or_with(&second);
    write_tape(args.output.as_deref(), &combined)
}
