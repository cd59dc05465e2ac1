use std::path::{Path, PathBuf};

use primitives::{get_environment, Address, Environment};
use reputation_core::{
    GlobalStats,
    RatingKey,
    RatingTransition,
    ReputationEntry,
    ReputationLedger,
};
use rocksdb::{ColumnFamily, IteratorMode, WriteBatch, DB};
use serde::{de::DeserializeOwned, Serialize};
use storage_utils::{Result, StorageError};
use telemetry::{debug, error};

pub const RATINGS_COLUMN: &str = "ratings";
pub const REPUTATIONS_COLUMN: &str = "reputations";
pub const STATS_COLUMN: &str = "stats";

/// Fixed key of the single global stats row.
pub const GLOBAL_STATS_KEY: &[u8] = b"global";

const COLUMNS: [&str; 3] = [RATINGS_COLUMN, REPUTATIONS_COLUMN, STATS_COLUMN];

/// Persists ledger rows into three column families, one per entity kind.
pub struct RocksDbAdapter {
    db: DB,
    path: PathBuf,
}

fn base_db_options() -> rocksdb::Options {
    let mut options = rocksdb::Options::default();

    if matches!(get_environment(), Environment::Local) {
        options.set_keep_log_file_num(3);
    }

    options.set_error_if_exists(false);
    options.create_if_missing(true);
    options.create_missing_column_families(true);

    options
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|err| StorageError::Serialization(err.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|err| StorageError::Serialization(err.to_string()))
}

impl RocksDbAdapter {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let options = base_db_options();

        let db = DB::open_cf(&options, &path, COLUMNS).map_err(|err| {
            error!("could not open ledger database at {}: {}", path.display(), err);
            StorageError::Database(err.into_string())
        })?;

        Ok(Self { db, path })
    }

    /// Opens an existing database without taking its write lock. Every write
    /// through the returned adapter fails.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let options = base_db_options();

        let db = DB::open_cf_for_read_only(&options, &path, COLUMNS, false).map_err(|err| {
            error!("could not open ledger database at {} read-only: {}", path.display(), err);
            StorageError::Database(err.into_string())
        })?;

        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn column(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::MissingColumnFamily(name.to_string()))
    }

    /// Writes every row touched by `transition` in a single batch.
    pub fn persist(&self, transition: &RatingTransition) -> Result<()> {
        let ratings = self.column(RATINGS_COLUMN)?;
        let reputations = self.column(REPUTATIONS_COLUMN)?;
        let stats = self.column(STATS_COLUMN)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(ratings, encode(transition.key())?, b"");
        batch.put_cf(
            reputations,
            transition.key().target.as_bytes(),
            encode(transition.entry())?,
        );
        batch.put_cf(stats, GLOBAL_STATS_KEY, encode(transition.stats())?);

        self.db
            .write(batch)
            .map_err(|err| StorageError::Database(err.into_string()))
    }

    /// Rebuilds the ledger from disk. Fails when the persisted rows disagree
    /// with each other.
    pub fn load(&self) -> Result<ReputationLedger> {
        let mut ratings = Vec::new();
        for item in self.db.iterator_cf(self.column(RATINGS_COLUMN)?, IteratorMode::Start) {
            let (key, _) = item.map_err(|err| StorageError::Database(err.into_string()))?;
            ratings.push(decode::<RatingKey>(&key)?);
        }

        let mut reputations = Vec::new();
        for item in self
            .db
            .iterator_cf(self.column(REPUTATIONS_COLUMN)?, IteratorMode::Start)
        {
            let (key, value) = item.map_err(|err| StorageError::Database(err.into_string()))?;
            let target = Address::from_slice(&key)
                .map_err(|err| StorageError::Corrupted(err.to_string()))?;
            reputations.push((target, decode::<ReputationEntry>(&value)?));
        }

        let stats = match self
            .db
            .get_cf(self.column(STATS_COLUMN)?, GLOBAL_STATS_KEY)
            .map_err(|err| StorageError::Database(err.into_string()))?
        {
            Some(bytes) => decode::<GlobalStats>(&bytes)?,
            None => GlobalStats::default(),
        };

        let ledger = ReputationLedger::from_parts(ratings, reputations, stats);
        ledger
            .check_invariants()
            .map_err(|err| StorageError::Corrupted(err.to_string()))?;

        debug!(
            path = %self.path.display(),
            ratings = ledger.len(),
            "loaded ledger from disk"
        );

        Ok(ledger)
    }

    /// Raw write of a global stats row. Only useful for repair tooling and
    /// tests exercising corruption detection.
    pub fn put_global_stats(&self, stats: &GlobalStats) -> Result<()> {
        self.db
            .put_cf(self.column(STATS_COLUMN)?, GLOBAL_STATS_KEY, encode(stats)?)
            .map_err(|err| StorageError::Database(err.into_string()))
    }
}

impl std::fmt::Debug for RocksDbAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksDbAdapter")
            .field("path", &self.path)
            .finish()
    }
}
