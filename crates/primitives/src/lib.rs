pub mod address;
pub mod base;
pub mod crypto;
pub mod environment;

pub use address::*;
pub use base::*;
pub use crypto::*;
pub use environment::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
