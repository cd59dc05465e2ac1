use clap::Parser;

mod cli;
pub mod result;

pub use crate::cli::*;
pub(crate) mod commands;

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    commands::exec(args)?;

    Ok(())
}
