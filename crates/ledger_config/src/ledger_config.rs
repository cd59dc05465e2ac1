use std::path::{Path, PathBuf};

use config::{Config, File};
use derive_builder::Builder;
use ledgerdb::LedgerDbConfig;
use primitives::{Environment, DEFAULT_DATA_DIR_PATH, DEFAULT_LEDGER_DB_PATH};
use serde::Deserialize;
use thiserror::Error;

/// Prefix of environment variables overriding file values, e.g.
/// `REPUTATION_IN_MEMORY=true`.
pub const CONFIG_ENV_PREFIX: &str = "REPUTATION";

#[derive(Debug, Error)]
pub enum LedgerConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, LedgerConfigError>;

#[derive(Builder, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LedgerConfig {
    /// Directory used to persist all ledger information to disk
    #[builder(default = "default_data_dir()")]
    pub data_dir: PathBuf,

    /// Path where the ledger database resides on disk
    #[builder(default = "default_db_path()")]
    pub db_path: PathBuf,

    /// Keeps the ledger in memory only, nothing is written to `db_path`
    #[builder(default = "false")]
    pub in_memory: bool,

    #[builder(default)]
    pub environment: Environment,

    #[builder(default = "false")]
    pub pretty_print_logs: bool,
}

impl LedgerConfig {
    /// Layers defaults, then the file at `config_path`, then `REPUTATION_*`
    /// environment variables.
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self> {
        let s = Self::base_builder()?
            .add_source(File::from(config_path.as_ref()))
            .add_source(config::Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Defaults overridden by `REPUTATION_*` environment variables only.
    pub fn from_env() -> Result<Self> {
        let s = Self::base_builder()?
            .add_source(config::Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn base_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("data_dir", path_value(default_data_dir()))?
            .set_default("db_path", path_value(default_db_path()))?
            .set_default("in_memory", false)?
            .set_default("environment", Environment::default().to_string())?
            .set_default("pretty_print_logs", false)?)
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn ledger_db_config(&self) -> LedgerDbConfig {
        LedgerDbConfig {
            path: self.db_path.clone(),
            in_memory: self.in_memory,
            read_only: false,
        }
    }

    /// Same as [`LedgerConfig::ledger_db_config`] but opens the database for
    /// queries only. Falls back to a writable open when nothing exists at
    /// `db_path` yet.
    pub fn read_only_db_config(&self) -> LedgerDbConfig {
        LedgerDbConfig {
            read_only: !self.in_memory && self.db_path.exists(),
            ..self.ledger_db_config()
        }
    }
}

/// Data dir named by `REPUTATION_DATA_DIR`, or the default one.
fn default_data_dir() -> PathBuf {
    storage_utils::get_data_dir().unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR_PATH))
}

fn default_db_path() -> PathBuf {
    storage_utils::get_ledger_db_path().unwrap_or_else(|_| PathBuf::from(DEFAULT_LEDGER_DB_PATH))
}

fn path_value(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_path: default_db_path(),
            in_memory: false,
            environment: Environment::default(),
            pretty_print_logs: false,
        }
    }
}
