pub mod config;
pub mod keygen;
pub mod ledger;

use ledger_config::LedgerConfig;
use telemetry::custom_subscriber::TelemetrySubscriber;

use crate::{
    cli::{Args, Commands},
    result::{CliError, Result},
};

pub fn exec(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    if args.debug {
        std::env::set_var("RUST_LOG", "debug");
    }

    // stdout is reserved for command output
    TelemetrySubscriber::init_with(
        std::io::stderr,
        config.environment,
        config.pretty_print_logs,
    )?;

    telemetry::debug!("args: {:?}", args);

    match args.command {
        Some(Commands::Rate(opts)) => ledger::rate(&config, opts),
        Some(Commands::Reputation(opts)) => ledger::reputation(&config, opts),
        Some(Commands::Details(opts)) => ledger::details(&config, opts),
        Some(Commands::Check(opts)) => ledger::check(&config, opts),
        Some(Commands::Stats) => ledger::stats(&config),
        Some(Commands::Dump) => ledger::dump(&config),
        Some(Commands::Keygen(opts)) => keygen::exec(opts),
        Some(Commands::Config(opts)) => config::exec(&config, opts),
        None => Err(CliError::NoSubcommand),
    }
}

fn load_config(args: &Args) -> Result<LedgerConfig> {
    let mut config = match &args.config {
        Some(path) => LedgerConfig::from_file(path)?,
        None => LedgerConfig::from_env()?,
    };

    if let Some(db_path) = &args.db_path {
        config.db_path = db_path.clone();
    }

    Ok(config)
}
