//! Command-line interface wiring for the `papertape` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family. Every
//! stream command reads a tape from a file or stdin and writes its result
//! to a file or stdout.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod bits;
pub mod convert;
pub mod edit;
pub mod inspect;
pub mod random;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `papertape` binary.
#[derive(Parser, Debug)]
#[command(name = "papertape", version, about = "Punched paper tape toolkit")]
pub struct Cli {
    /// Log progress to stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Render(render::RenderCommand),
    #[command(subcommand)]
    Convert(convert::ConvertCommand),
    #[command(subcommand)]
    Bits(bits::BitsCommand),
    /// Clean up and decorate a tape.
    Edit(edit::EditArgs),
    #[command(subcommand)]
    Inspect(inspect::InspectCommand),
    /// Punch a tape of pseudo-random rows.
    Random(random::RandomArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(cmd) => render::handle(cmd),
        Command::Convert(cmd) => convert::handle(cmd),
        Command::Bits(cmd) => bits::handle(cmd),
        Command::Edit(args) => edit::handle(args),
        Command::Inspect(cmd) => inspect::handle(cmd),
        Command::Random(args) => random::handle(args),
    }
}
