use primitives::Address;
use serde::{Deserialize, Serialize};

use crate::RatingError;

pub const MIN_RATING: u128 = 1;
pub const MAX_RATING: u128 = 5;

/// A rating value known to lie within `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u128", into = "u128")]
pub struct Rating(u128);

impl Rating {
    pub fn new(value: u128) -> Result<Self, RatingError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(RatingError::InvalidRating(value));
        }

        Ok(Rating(value))
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl TryFrom<u128> for Rating {
    type Error = RatingError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u128 {
    fn from(rating: Rating) -> u128 {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered `(rater, target)` pair. Its presence in the ledger is the whole
/// rating record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RatingKey {
    pub rater: Address,
    pub target: Address,
}

impl RatingKey {
    pub fn new(rater: Address, target: Address) -> Self {
        Self { rater, target }
    }
}
