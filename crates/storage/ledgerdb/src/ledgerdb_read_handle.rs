use left_right::{ReadHandle, ReadHandleFactory};
use primitives::Address;
use reputation_core::{GlobalStats, ReputationDetails, ReputationLedger};

/// Read-only view over the last published ledger state.
///
/// A handle is bound to the thread that created it; share the factory
/// instead.
#[derive(Debug)]
pub struct LedgerDbReadHandle {
    inner: ReadHandle<ReputationLedger>,
}

impl LedgerDbReadHandle {
    pub fn new(inner: ReadHandle<ReputationLedger>) -> Self {
        Self { inner }
    }

    /// Runs `f` against a single published snapshot. Every query made inside
    /// `f` observes the same state. Publishing waits while `f` runs.
    pub fn with_snapshot<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ReputationLedger) -> R,
    {
        match self.inner.enter() {
            Some(guard) => f(&*guard),
            None => f(&ReputationLedger::default()),
        }
    }

    /// Returns an owned copy of the current snapshot.
    pub fn snapshot(&self) -> ReputationLedger {
        self.with_snapshot(|ledger| ledger.clone())
    }

    pub fn get_reputation(&self, target: &Address) -> u128 {
        self.with_snapshot(|ledger| ledger.get_reputation(target))
    }

    pub fn get_reputation_details(&self, target: &Address) -> ReputationDetails {
        self.with_snapshot(|ledger| ledger.get_reputation_details(target))
    }

    pub fn get_rating_count(&self, target: &Address) -> u128 {
        self.with_snapshot(|ledger| ledger.get_rating_count(target))
    }

    pub fn has_rated(&self, rater: &Address, target: &Address) -> bool {
        self.with_snapshot(|ledger| ledger.has_rated(rater, target))
    }

    pub fn get_contract_stats(&self) -> GlobalStats {
        self.with_snapshot(|ledger| ledger.get_contract_stats())
    }

    pub fn get_average_rating(&self, target: &Address) -> Option<f64> {
        self.with_snapshot(|ledger| ledger.get_average_rating(target))
    }

    /// Returns a number of rating records in the ledger
    pub fn len(&self) -> usize {
        self.with_snapshot(|ledger| ledger.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hands out read handles. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct LedgerDbReadHandleFactory {
    inner: ReadHandleFactory<ReputationLedger>,
}

impl LedgerDbReadHandleFactory {
    pub fn new(inner: ReadHandleFactory<ReputationLedger>) -> Self {
        Self { inner }
    }

    pub fn handle(&self) -> LedgerDbReadHandle {
        LedgerDbReadHandle::new(self.inner.handle())
    }
}
