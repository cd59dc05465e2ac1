use reputation_core::RatingError;
use storage_utils::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerDbError {
    #[error("rating rejected ({}): {0}", .0.code())]
    Rating(#[from] RatingError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("ledger writer is no longer running")]
    WriterClosed,
}

impl LedgerDbError {
    /// The validation failure behind this error, if any.
    pub fn rating_error(&self) -> Option<RatingError> {
        match self {
            LedgerDbError::Rating(err) => Some(*err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerDbError>;
