use std::collections::{HashMap, HashSet};

use primitives::Address;
use telemetry::{debug, info};

use crate::{
    GlobalStats,
    InvariantViolation,
    Rating,
    RatingError,
    RatingKey,
    RatingReceipt,
    ReputationDetails,
    ReputationEntry,
    Result,
    MAX_RATING,
};

/// A validated rating together with the state it produces.
///
/// Built by [`ReputationLedger::prepare_rating`] and only meaningful against
/// the exact ledger state it was prepared from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingTransition {
    key: RatingKey,
    rating: Rating,
    entry: ReputationEntry,
    stats: GlobalStats,
    prior_stats: GlobalStats,
}

impl RatingTransition {
    pub fn key(&self) -> &RatingKey {
        &self.key
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// The target's aggregate once this transition is applied.
    pub fn entry(&self) -> &ReputationEntry {
        &self.entry
    }

    /// Global counters once this transition is applied.
    pub fn stats(&self) -> &GlobalStats {
        &self.stats
    }

    pub fn receipt(&self) -> RatingReceipt {
        RatingReceipt {
            target: self.key.target,
            rating: self.rating,
            new_reputation: self.entry.average(),
            rating_count: self.entry.rating_count,
        }
    }
}

/// Deterministic state machine holding every rating record, per-target
/// aggregate and the global counters.
///
/// It performs no locking: callers are expected to feed it one mutation at a
/// time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReputationLedger {
    ratings: HashSet<RatingKey>,
    reputations: HashMap<Address, ReputationEntry>,
    stats: GlobalStats,
}

impl ReputationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from previously persisted rows. No validation is
    /// performed here, see [`ReputationLedger::check_invariants`].
    pub fn from_parts<R, E>(ratings: R, reputations: E, stats: GlobalStats) -> Self
    where
        R: IntoIterator<Item = RatingKey>,
        E: IntoIterator<Item = (Address, ReputationEntry)>,
    {
        Self {
            ratings: ratings.into_iter().collect(),
            reputations: reputations.into_iter().collect(),
            stats,
        }
    }

    /// Validates a submission and computes its effect without mutating.
    ///
    /// Checks run in order: rating bounds, self rating, duplicate pair.
    pub fn prepare_rating(
        &self,
        rater: &Address,
        target: &Address,
        rating: u128,
    ) -> Result<RatingTransition> {
        let transition = self.build_transition(rater, target, rating);

        if let Err(err) = &transition {
            debug!(
                rater = %rater,
                target = %target,
                rating,
                code = err.code(),
                "rating rejected: {err}"
            );
        }

        transition
    }

    fn build_transition(
        &self,
        rater: &Address,
        target: &Address,
        rating: u128,
    ) -> Result<RatingTransition> {
        let rating = Rating::new(rating)?;

        if rater == target {
            return Err(RatingError::SelfRating);
        }

        let key = RatingKey::new(*rater, *target);
        if self.ratings.contains(&key) {
            return Err(RatingError::AlreadyRated);
        }

        let current = self.entry(target);
        let entry = current.with_rating(rating);

        let prior_stats = self.stats;
        let mut stats = prior_stats;
        stats.total_ratings = stats.total_ratings.saturating_add(1);
        if !current.is_rated() {
            stats.total_users = stats.total_users.saturating_add(1);
        }

        Ok(RatingTransition {
            key,
            rating,
            entry,
            stats,
            prior_stats,
        })
    }

    /// Applies a transition prepared against the current state.
    ///
    /// Fails without mutating when the ledger has moved on since the
    /// transition was prepared, e.g. two transitions prepared from the same
    /// state.
    pub fn apply_transition(
        &mut self,
        transition: &RatingTransition,
    ) -> std::result::Result<RatingReceipt, InvariantViolation> {
        if self.stats != transition.prior_stats || self.ratings.contains(&transition.key) {
            return Err(InvariantViolation::StaleTransition {
                prepared: transition.prior_stats.total_ratings,
                current: self.stats.total_ratings,
            });
        }

        Ok(self.commit(transition))
    }

    fn commit(&mut self, transition: &RatingTransition) -> RatingReceipt {
        self.ratings.insert(transition.key);
        self.reputations
            .insert(transition.key.target, transition.entry);
        self.stats = transition.stats;

        transition.receipt()
    }

    /// Records `rater`'s rating of `target`. Either every effect is applied
    /// or, on error, none is.
    pub fn submit_rating(
        &mut self,
        rater: &Address,
        target: &Address,
        rating: u128,
    ) -> Result<RatingReceipt> {
        let transition = self.prepare_rating(rater, target, rating)?;
        let receipt = self.commit(&transition);

        info!(
            rater = %rater,
            target = %target,
            rating,
            rating_count = receipt.rating_count,
            "rating accepted"
        );

        Ok(receipt)
    }

    /// Truncated integer average of `target`'s ratings, 0 when unrated.
    pub fn get_reputation(&self, target: &Address) -> u128 {
        self.entry(target).average()
    }

    pub fn get_reputation_details(&self, target: &Address) -> ReputationDetails {
        self.entry(target).into()
    }

    pub fn get_rating_count(&self, target: &Address) -> u128 {
        self.entry(target).rating_count
    }

    /// Whether `rater` has rated `target`. The pair is ordered.
    pub fn has_rated(&self, rater: &Address, target: &Address) -> bool {
        self.ratings.contains(&RatingKey::new(*rater, *target))
    }

    pub fn get_contract_stats(&self) -> GlobalStats {
        self.stats
    }

    /// Fractional average, `None` when `target` was never rated.
    pub fn get_average_rating(&self, target: &Address) -> Option<f64> {
        let entry = self.entry(target);
        if !entry.is_rated() {
            return None;
        }

        Some(entry.total_score as f64 / entry.rating_count as f64)
    }

    pub fn ratings(&self) -> impl Iterator<Item = &RatingKey> {
        self.ratings.iter()
    }

    pub fn reputations(&self) -> impl Iterator<Item = (&Address, &ReputationEntry)> {
        self.reputations.iter()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    fn entry(&self, target: &Address) -> ReputationEntry {
        self.reputations.get(target).copied().unwrap_or_default()
    }

    /// Verifies that the stored records, aggregates and counters agree with
    /// each other.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        let mut counts: HashMap<Address, u128> = HashMap::new();

        for key in &self.ratings {
            if key.rater == key.target {
                return Err(InvariantViolation::SelfRatingRecord(key.rater));
            }
            *counts.entry(key.target).or_default() += 1;
        }

        for (target, entry) in &self.reputations {
            let expected = counts.remove(target).unwrap_or_default();
            if entry.rating_count != expected {
                return Err(InvariantViolation::RatingCountMismatch {
                    target: *target,
                    recorded: entry.rating_count,
                    expected,
                });
            }

            let max_score = entry.rating_count.saturating_mul(MAX_RATING);
            if entry.total_score < entry.rating_count || entry.total_score > max_score {
                return Err(InvariantViolation::ScoreOutOfBounds {
                    target: *target,
                    total_score: entry.total_score,
                    rating_count: entry.rating_count,
                });
            }
        }

        // records naming a target that has no aggregate at all
        if let Some((target, expected)) = counts.into_iter().next() {
            return Err(InvariantViolation::RatingCountMismatch {
                target,
                recorded: 0,
                expected,
            });
        }

        let expected = self.ratings.len() as u128;
        if self.stats.total_ratings != expected {
            return Err(InvariantViolation::TotalRatingsMismatch {
                recorded: self.stats.total_ratings,
                expected,
            });
        }

        let expected = self.reputations.values().filter(|e| e.is_rated()).count() as u128;
        if self.stats.total_users != expected {
            return Err(InvariantViolation::TotalUsersMismatch {
                recorded: self.stats.total_users,
                expected,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address([byte; 20])
    }

    #[test]
    fn prepare_does_not_mutate() {
        let ledger = ReputationLedger::new();
        let transition = ledger.prepare_rating(&addr(1), &addr(2), 4).unwrap();

        assert_eq!(transition.entry().rating_count, 1);
        assert_eq!(transition.stats().total_ratings, 1);
        assert!(ledger.is_empty());
        assert_eq!(ledger.get_contract_stats(), GlobalStats::default());
    }

    #[test]
    fn stale_transitions_are_refused() {
        let mut ledger = ReputationLedger::new();
        let first = ledger.prepare_rating(&addr(1), &addr(2), 5).unwrap();
        let second = ledger.prepare_rating(&addr(3), &addr(2), 1).unwrap();

        ledger.apply_transition(&first).unwrap();
        let before = ledger.clone();

        assert_eq!(
            ledger.apply_transition(&second),
            Err(InvariantViolation::StaleTransition {
                prepared: 0,
                current: 1,
            })
        );
        assert_eq!(
            ledger.apply_transition(&first),
            Err(InvariantViolation::StaleTransition {
                prepared: 0,
                current: 1,
            })
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.get_rating_count(&addr(2)), 1);
        assert!(ledger.check_invariants().is_ok());
    }

    #[test]
    fn validation_order_is_bounds_then_self_then_duplicate() {
        let mut ledger = ReputationLedger::new();
        ledger.submit_rating(&addr(1), &addr(2), 3).unwrap();

        // self rating with a bad value reports the bad value first
        assert_eq!(
            ledger.submit_rating(&addr(1), &addr(1), 0),
            Err(RatingError::InvalidRating(0))
        );

        // duplicate with a bad value also reports the bad value first
        assert_eq!(
            ledger.submit_rating(&addr(1), &addr(2), 7),
            Err(RatingError::InvalidRating(7))
        );

        assert_eq!(
            ledger.submit_rating(&addr(2), &addr(2), 3),
            Err(RatingError::SelfRating)
        );
    }

    #[test]
    fn rejected_submissions_leave_state_untouched() {
        let mut ledger = ReputationLedger::new();
        ledger.submit_rating(&addr(1), &addr(2), 5).unwrap();
        let before = ledger.clone();

        let _ = ledger.submit_rating(&addr(1), &addr(2), 1);
        let _ = ledger.submit_rating(&addr(3), &addr(3), 1);
        let _ = ledger.submit_rating(&addr(3), &addr(2), 0);

        assert_eq!(ledger, before);
    }

    #[test]
    fn receipt_reports_new_aggregate() {
        let mut ledger = ReputationLedger::new();
        let receipt = ledger.submit_rating(&addr(1), &addr(2), 5).unwrap();

        assert_eq!(receipt.target, addr(2));
        assert_eq!(receipt.rating.value(), 5);
        assert_eq!(receipt.new_reputation, 5);
        assert_eq!(receipt.rating_count, 1);

        let receipt = ledger.submit_rating(&addr(3), &addr(2), 2).unwrap();
        assert_eq!(receipt.new_reputation, 3);
        assert_eq!(receipt.rating_count, 2);
    }

    #[test]
    fn fractional_average_is_separate() {
        let mut ledger = ReputationLedger::new();
        assert_eq!(ledger.get_average_rating(&addr(2)), None);

        ledger.submit_rating(&addr(1), &addr(2), 3).unwrap();
        ledger.submit_rating(&addr(3), &addr(2), 2).unwrap();

        assert_eq!(ledger.get_average_rating(&addr(2)), Some(2.5));
        assert_eq!(ledger.get_reputation(&addr(2)), 2);
    }

    #[test]
    fn check_invariants_detects_tampered_counters() {
        let mut ledger = ReputationLedger::new();
        ledger.submit_rating(&addr(1), &addr(2), 3).unwrap();
        assert!(ledger.check_invariants().is_ok());

        let stats = GlobalStats {
            total_ratings: 2,
            total_users: 1,
        };
        let tampered = ReputationLedger::from_parts(
            ledger.ratings().copied(),
            ledger.reputations().map(|(k, v)| (*k, *v)),
            stats,
        );

        assert_eq!(
            tampered.check_invariants(),
            Err(InvariantViolation::TotalRatingsMismatch {
                recorded: 2,
                expected: 1,
            })
        );
    }

    #[test]
    fn check_invariants_detects_self_records_and_bad_scores() {
        let self_rated = ReputationLedger::from_parts(
            vec![RatingKey::new(addr(1), addr(1))],
            vec![(
                addr(1),
                ReputationEntry {
                    total_score: 3,
                    rating_count: 1,
                },
            )],
            GlobalStats {
                total_ratings: 1,
                total_users: 1,
            },
        );
        assert_eq!(
            self_rated.check_invariants(),
            Err(InvariantViolation::SelfRatingRecord(addr(1)))
        );

        let overscored = ReputationLedger::from_parts(
            vec![RatingKey::new(addr(1), addr(2))],
            vec![(
                addr(2),
                ReputationEntry {
                    total_score: 6,
                    rating_count: 1,
                },
            )],
            GlobalStats {
                total_ratings: 1,
                total_users: 1,
            },
        );
        assert!(matches!(
            overscored.check_invariants(),
            Err(InvariantViolation::ScoreOutOfBounds { .. })
        ));
    }
}
