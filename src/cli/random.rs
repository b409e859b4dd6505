//! Pseudo-random tape generation (`papertape random`).

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use log::info;
use papertape::random::random_tape;

use crate::cli::utils::write_tape;

/// Args for `papertape random`.
#[derive(Args, Debug)]
pub struct RandomArgs {
    /// Number of rows to punch.
    pub len: usize,
    /// Seed for a repeatable tape (default: current time).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output file (`-` or omitted for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Execute `papertape random`.
pub fn handle(args: RandomArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(time_seed);
    info!("random seed {seed}");
    let tape = random_tape(args.len, seed);
    write_tape(args.output.as_deref(), &tape)
}

fn time_seed() -> u64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros()) as u64
}
