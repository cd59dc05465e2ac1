use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    config::ConfigOpts,
    keygen::KeygenCmd,
    ledger::{AddressOpts, CheckOpts, RateOpts},
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help(true))]
pub struct Args {
    /// Sets a custom config file
    #[clap(short, long, value_parser, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[clap(short, long)]
    pub debug: bool,

    /// Overrides the ledger database path from the config
    #[clap(long, value_parser, value_name = "DIR")]
    pub db_path: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rate an account from 1 to 5
    Rate(RateOpts),

    /// Print the truncated average reputation of an account
    Reputation(AddressOpts),

    /// Print the raw score and rating count of an account
    Details(AddressOpts),

    /// Check whether one account has rated another
    Check(CheckOpts),

    /// Print ledger-wide statistics
    Stats,

    /// Print the whole ledger as JSON
    Dump,

    /// Generate a fresh account address
    Keygen(KeygenCmd),

    /// Manage configuration for this CLI tool
    Config(ConfigOpts),
}
