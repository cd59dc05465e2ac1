use primitives::Address;
use serde::{Deserialize, Serialize};

use crate::Rating;

/// Aggregate of every rating a target has received.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReputationEntry {
    pub total_score: u128,
    pub rating_count: u128,
}

impl ReputationEntry {
    /// Integer average, truncated towards zero. Unrated entries average to 0.
    pub fn average(&self) -> u128 {
        if self.rating_count == 0 {
            return 0;
        }

        self.total_score / self.rating_count
    }

    pub fn is_rated(&self) -> bool {
        self.rating_count > 0
    }

    pub(crate) fn with_rating(&self, rating: Rating) -> Self {
        Self {
            total_score: self.total_score.saturating_add(rating.value()),
            rating_count: self.rating_count.saturating_add(1),
        }
    }
}

/// Raw counters behind a target's reputation, so callers can derive their
/// own averages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReputationDetails {
    pub total_score: u128,
    pub rating_count: u128,
}

impl From<ReputationEntry> for ReputationDetails {
    fn from(entry: ReputationEntry) -> Self {
        Self {
            total_score: entry.total_score,
            rating_count: entry.rating_count,
        }
    }
}

/// Ledger-wide counters. Both only ever grow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_ratings: u128,
    pub total_users: u128,
}

/// Returned by a successful rating submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingReceipt {
    pub target: Address,
    pub rating: Rating,
    pub new_reputation: u128,
    pub rating_count: u128,
}
