use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no subcommand provided")]
    NoSubcommand,

    #[error("unable to setup telemetry subscriber: {0}")]
    Telemetry(#[from] telemetry::custom_subscriber::TelemetryError),

    #[error("config error: {0}")]
    Config(#[from] ledger_config::LedgerConfigError),

    #[error("{0}")]
    Ledger(#[from] ledgerdb::LedgerDbError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
