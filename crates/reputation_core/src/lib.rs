//! Peer reputation ledger.
//!
//! Accounts rate other accounts on a 1 to 5 scale. The ledger keeps one
//! aggregate per rated account plus ledger-wide counters, and rejects self
//! ratings, out of range values and repeated ratings for the same ordered
//! pair. Every mutation is validated in full before any state changes.

pub mod ledger;
pub mod rating;
pub mod reputation;
pub mod result;

pub use ledger::*;
pub use rating::*;
pub use reputation::*;
pub use result::*;

pub use primitives::Address;
