mod ledgerdb;
mod ledgerdb_read_handle;
pub mod op;
pub mod result;
mod rocksdb_adapter;
mod writer;

pub use ledgerdb_read_handle::*;
pub use result::*;
pub use rocksdb_adapter::*;
pub use writer::*;

pub use crate::ledgerdb::*;
