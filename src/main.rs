use anyhow::Result;
use clap::Parser;
use env_logger::Env;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
    cli::run(cli)
}
