use std::path::PathBuf;

use ledgerdb::LedgerDbConfig;
use primitives::{generate_account_keypair, generate_mock_account_keypair, Address};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

// NOTE: this is used to generate random filenames so files created by tests
// don't get overwritten
pub fn _generate_random_string() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(30)
        .map(char::from)
        .collect()
}

pub fn _generate_random_address() -> Address {
    let (_, pk) = generate_account_keypair();
    Address::new(pk)
}

pub fn _named_address(name: &str) -> Address {
    let (_, pk) = generate_mock_account_keypair(name.as_bytes());
    Address::new(pk)
}

pub fn _temp_db_path() -> PathBuf {
    std::env::temp_dir()
        .join("reputation-ledgerdb-tests")
        .join(_generate_random_string())
}

pub fn _persistent_config(path: PathBuf) -> LedgerDbConfig {
    LedgerDbConfig::persistent(path)
}

pub fn _read_only_config(path: PathBuf) -> LedgerDbConfig {
    LedgerDbConfig {
        read_only: true,
        ..LedgerDbConfig::persistent(path)
    }
}
