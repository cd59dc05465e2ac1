use left_right::Absorb;
pub use left_right::ReadHandleFactory;
use reputation_core::{RatingTransition, ReputationLedger};
use telemetry::error;

/// Mutations replayed onto both copies of the ledger.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum LedgerOp {
    /// Apply a rating that was validated against the published state
    ApplyRating(RatingTransition),
}

impl Absorb<LedgerOp> for ReputationLedger {
    fn absorb_first(&mut self, operation: &mut LedgerOp, _other: &Self) {
        match operation {
            LedgerOp::ApplyRating(transition) => {
                if let Err(err) = self.apply_transition(transition) {
                    error!(target = %transition.key().target, "dropped ledger op: {err}");
                }
            },
        }
    }

    fn sync_with(&mut self, first: &Self) {
        *self = first.clone();
    }
}
