//! Rendering commands (`papertape render ...`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::info;
use papertape::{NUL, RenderOptions, Tape, TapeWidth};

use crate::cli::utils::{open_output, parse_width, read_tape, write_output};

/// Available render subcommands.
#[derive(Subcommand, Debug)]
pub enum RenderCommand {
    /// Render an ECMA-10 tape image as a binary PBM (P4) bitmap.
    Pbm(RenderArgs),
    /// Render an ECMA-10 tape image as a PNG file.
    Png(RenderPngArgs),
    /// Draw the tape as ASCII art.
    Ascii(RenderArgs),
}

/// Tape preparation shared by every renderer.
#[derive(Args, Debug)]
pub struct TapeArgs {
    /// Tape file to render (default: stdin).
    pub input: Option<PathBuf>,
    /// Tape width in data bits.
    #[arg(short = 'w', long = "width", default_value = "8", value_parser = parse_width)]
    pub width: TapeWidth,
    /// Include even parity in the top data bit.
    #[arg(short = 'p', long)]
    pub parity: bool,
    /// Blank leader rows.
    #[arg(short = 'l', long, default_value_t = 0)]
    pub leader: usize,
    /// Blank trailer rows.
    #[arg(short = 't', long, default_value_t = 0)]
    pub trailer: usize,
    /// Show the tape from the opposite face.
    #[arg(long)]
    pub mirror: bool,
}

/// Args for `papertape render pbm` and `papertape render ascii`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub tape: TapeArgs,
    /// Output file (`-` or omitted for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Args for `papertape render png`.
#[derive(Args, Debug)]
pub struct RenderPngArgs {
    #[command(flatten)]
    pub tape: TapeArgs,
    /// PNG file to write.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

/// Execute a render command.
pub fn handle(command: RenderCommand) -> Result<()> {
    match command {
        RenderCommand::Pbm(args) => pbm(args),
        RenderCommand::Png(args) => png(args),
        RenderCommand::Ascii(args) => ascii(args),
    }
}

impl TapeArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            mirror: self.mirror,
        }
    }

    /// Load the tape, then add parity, leader and trailer.
    fn prepare(&self) -> Result<Tape> {
        let mut tape = read_tape(self.input.as_deref())?;
        let width = self.width;
        if self.parity {
            tape.apply_even_parity(width);
        }
        tape.add_leader(self.leader, NUL);
        tape.add_trailer(self.trailer, NUL);
        info!("rendering {} rows of {width} tape", tape.len());
        Ok(tape)
    }
}

fn pbm(args: RenderArgs) -> Result<()> {
    let tape = args.tape.prepare()?;
    let mut out = open_output(args.output.as_deref())?;
    tape.render_pbm(&mut out, &args.tape.options())
        .and_then(|()| out.flush())
        .context("failed to write PBM image")
}

fn png(args: RenderPngArgs) -> Result<()> {
    let tape = args.tape.prepare()?;
    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    tape.render_png(&mut out, &args.tape.options())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("wrote {}", args.output.display());
    Ok(())
}

fn ascii(args: RenderArgs) -> Result<()> {
    let tape = args.tape.prepare()?;
    let art = tape.render_ascii(&args.tape.options());
    write_output(args.output.as_deref(), art.as_bytes())
}
