mod ledger_config;

pub use crate::ledger_config::*;
