use std::path::Path;

use clap::{Parser, Subcommand};
use ledger_config::LedgerConfig;

use crate::result::{CliError, Result};

fn remove(path: &Path) -> Result<()> {
    let removed = storage_utils::remove_dir_if_exists(path).map_err(|err| {
        CliError::Other(format!("failed to remove {}: {err}", path.display()))
    })?;

    if removed {
        telemetry::info!("removed {}", path.display());
    }

    Ok(())
}

#[derive(Debug, Subcommand)]
pub enum ConfigCmd {
    /// Prints the resolved configuration
    Info,

    /// Removes the ledger's data directory and its database
    Clean,
}

#[derive(Parser, Debug)]
pub struct ConfigOpts {
    #[clap(subcommand)]
    pub subcommand: ConfigCmd,
}

pub fn exec(config: &LedgerConfig, opts: ConfigOpts) -> Result<()> {
    match opts.subcommand {
        ConfigCmd::Info => {
            println!("data_dir: {}", config.data_dir().display());
            println!("db_path: {}", config.db_path().display());
            println!("in_memory: {}", config.in_memory);
            println!("environment: {}", config.environment);
            println!("pretty_print_logs: {}", config.pretty_print_logs);
        },
        ConfigCmd::Clean => {
            let data_dir = config.data_dir();
            let db_path = config.db_path();

            remove(data_dir)?;
            if !db_path.starts_with(data_dir) {
                remove(db_path)?;
            }
        },
    }

    Ok(())
}
