#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(String),

    #[error("failed to encode or decode record: {0}")]
    Serialization(String),

    #[error("persisted state is corrupted: {0}")]
    Corrupted(String),

    #[error("column family {0} not found")]
    MissingColumnFamily(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
