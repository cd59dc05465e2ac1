use std::{collections::BTreeMap, fmt::Display, fs, path::PathBuf};

use left_right::WriteHandle;
use primitives::Address;
use reputation_core::{
    GlobalStats,
    RatingKey,
    RatingReceipt,
    ReputationDetails,
    ReputationEntry,
    ReputationLedger,
};
use serde::Serialize;
use storage_utils::StorageError;
use telemetry::{error, info};

use crate::{
    op::LedgerOp,
    LedgerDbReadHandle,
    LedgerDbReadHandleFactory,
    Result,
    RocksDbAdapter,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDbConfig {
    pub path: PathBuf,

    /// Keep everything in memory and never touch `path`
    pub in_memory: bool,

    /// Open an existing database at `path` for queries only. Submissions
    /// fail with a storage error.
    pub read_only: bool,
}

impl LedgerDbConfig {
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            in_memory: false,
            read_only: false,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            in_memory: true,
            read_only: false,
        }
    }
}

/// Single-writer host for a [`ReputationLedger`].
///
/// Mutations go through `&mut self`, so only one submission can be in
/// flight. Readers created from [`LedgerDb::factory`] see a rating either
/// entirely or not at all.
pub struct LedgerDb {
    write_handle: WriteHandle<ReputationLedger, LedgerOp>,
    adapter: Option<RocksDbAdapter>,
}

impl LedgerDb {
    pub fn new(config: LedgerDbConfig) -> Result<Self> {
        if config.in_memory {
            return Ok(Self::in_memory());
        }

        let adapter = if config.read_only {
            RocksDbAdapter::open_read_only(&config.path)?
        } else {
            fs::create_dir_all(&config.path).map_err(StorageError::from)?;
            RocksDbAdapter::new(&config.path)?
        };
        let ledger = adapter.load()?;

        info!(
            path = %config.path.display(),
            total_ratings = ledger.get_contract_stats().total_ratings,
            read_only = config.read_only,
            "opened ledger database"
        );

        Ok(Self::from_ledger(ledger, Some(adapter)))
    }

    pub fn in_memory() -> Self {
        Self::from_ledger(ReputationLedger::default(), None)
    }

    fn from_ledger(ledger: ReputationLedger, adapter: Option<RocksDbAdapter>) -> Self {
        let (write_handle, _read_handle) = left_right::new_from_empty(ledger);

        Self {
            write_handle,
            adapter,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.adapter.is_some()
    }

    /// Produces a reader factory that can be used to generate read handles
    /// into the published ledger.
    pub fn factory(&self) -> LedgerDbReadHandleFactory {
        LedgerDbReadHandleFactory::new(self.write_handle.factory())
    }

    pub fn read_handle(&self) -> LedgerDbReadHandle {
        self.factory().handle()
    }

    fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ReputationLedger) -> R,
    {
        match self.write_handle.enter() {
            Some(guard) => f(&*guard),
            None => f(&ReputationLedger::default()),
        }
    }

    /// Validates, persists and publishes a rating of `target` by `rater`.
    ///
    /// Validation failures and storage failures both leave the ledger, on
    /// disk and in memory, exactly as it was.
    pub fn submit_rating(
        &mut self,
        rater: &Address,
        target: &Address,
        rating: u128,
    ) -> Result<RatingReceipt> {
        let transition = self.with_state(|ledger| ledger.prepare_rating(rater, target, rating))?;

        if let Some(adapter) = &self.adapter {
            if let Err(err) = adapter.persist(&transition) {
                error!(rater = %rater, target = %target, "failed to persist rating: {err}");
                return Err(err.into());
            }
        }

        let receipt = transition.receipt();

        self.write_handle.append(LedgerOp::ApplyRating(transition));
        self.write_handle.publish();

        info!(
            rater = %rater,
            target = %target,
            rating,
            rating_count = receipt.rating_count,
            "rating accepted"
        );

        Ok(receipt)
    }

    pub fn get_reputation(&self, target: &Address) -> u128 {
        self.with_state(|ledger| ledger.get_reputation(target))
    }

    pub fn get_reputation_details(&self, target: &Address) -> ReputationDetails {
        self.with_state(|ledger| ledger.get_reputation_details(target))
    }

    pub fn get_rating_count(&self, target: &Address) -> u128 {
        self.with_state(|ledger| ledger.get_rating_count(target))
    }

    pub fn has_rated(&self, rater: &Address, target: &Address) -> bool {
        self.with_state(|ledger| ledger.has_rated(rater, target))
    }

    pub fn get_contract_stats(&self) -> GlobalStats {
        self.with_state(|ledger| ledger.get_contract_stats())
    }

    pub fn get_average_rating(&self, target: &Address) -> Option<f64> {
        self.with_state(|ledger| ledger.get_average_rating(target))
    }
}

impl std::fmt::Debug for LedgerDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerDb")
            .field("stats", &self.get_contract_stats())
            .field("adapter", &self.adapter)
            .finish()
    }
}

#[derive(Serialize)]
struct LedgerDump {
    stats: GlobalStats,
    reputations: BTreeMap<String, ReputationEntry>,
    ratings: Vec<RatingKey>,
}

impl Display for LedgerDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dump = self.with_state(|ledger| {
            let mut ratings: Vec<RatingKey> = ledger.ratings().copied().collect();
            ratings.sort();

            LedgerDump {
                stats: ledger.get_contract_stats(),
                reputations: ledger
                    .reputations()
                    .map(|(address, entry)| (address.to_string(), *entry))
                    .collect(),
                ratings,
            }
        });

        let out_str = serde_json::to_string_pretty(&dump).map_err(|_| std::fmt::Error)?;

        f.write_str(&out_str)
    }
}
