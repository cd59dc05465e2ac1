use primitives::Address;
use thiserror::Error;

/// Reasons a rating submission is rejected. All of them are detected before
/// the ledger is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("rating {0} is outside the accepted range")]
    InvalidRating(u128),

    #[error("rater has already rated this target")]
    AlreadyRated,

    #[error("accounts cannot rate themselves")]
    SelfRating,
}

impl RatingError {
    /// Stable numeric code reported to callers.
    pub fn code(&self) -> u32 {
        match self {
            RatingError::InvalidRating(_) => 101,
            RatingError::AlreadyRated => 102,
            RatingError::SelfRating => 103,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("target {target} has score {total_score} for {rating_count} ratings")]
    ScoreOutOfBounds {
        target: Address,
        total_score: u128,
        rating_count: u128,
    },

    #[error("target {target} counts {recorded} ratings but {expected} records name it")]
    RatingCountMismatch {
        target: Address,
        recorded: u128,
        expected: u128,
    },

    #[error("total_ratings is {recorded} but {expected} rating records exist")]
    TotalRatingsMismatch { recorded: u128, expected: u128 },

    #[error("total_users is {recorded} but {expected} targets have been rated")]
    TotalUsersMismatch { recorded: u128, expected: u128 },

    #[error("{0} rated itself")]
    SelfRatingRecord(Address),

    #[error("transition prepared at {prepared} ratings cannot apply at {current}")]
    StaleTransition { prepared: u128, current: u128 },
}

pub type Result<T> = std::result::Result<T, RatingError>;
