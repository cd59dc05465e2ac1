use std::{
    env,
    fs,
    path::{Path, PathBuf},
};

mod result;

use primitives::{DATA_DIR_VAR_NAME, DEFAULT_DATA_DIR_PATH};

pub use crate::result::{Result, StorageError};

/// Gets the data directory path from environment variables or the default
/// location.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = env::var(DATA_DIR_VAR_NAME).unwrap_or_else(|_| DEFAULT_DATA_DIR_PATH.into());

    Ok(data_dir.into())
}

/// Removes `path` and everything below it. Returns whether anything was
/// removed.
pub fn remove_dir_if_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(path)?;

    Ok(true)
}

// Ledger specific helpers
// ============================================================================
/// Retrieves the ledger's data directory path.
pub fn get_ledger_data_dir() -> Result<PathBuf> {
    let mut data_dir = get_data_dir()?;
    data_dir.push("ledger");
    Ok(data_dir)
}

/// Default location of the ledger's RocksDB files.
pub fn get_ledger_db_path() -> Result<PathBuf> {
    let mut path = get_ledger_data_dir()?;
    path.push("db");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn get_data_dir_returns_correct_directory() {
        env::remove_var(DATA_DIR_VAR_NAME);
        let dir = get_data_dir().unwrap();
        assert_eq!(dir, PathBuf::from(DEFAULT_DATA_DIR_PATH));

        let temp_dir_path = env::temp_dir();
        env::set_var(DATA_DIR_VAR_NAME, &temp_dir_path);

        let dir = get_data_dir().unwrap();
        assert_eq!(dir, temp_dir_path);

        env::remove_var(DATA_DIR_VAR_NAME);
    }

    #[test]
    #[serial]
    fn ledger_paths_follow_the_data_dir() {
        env::remove_var(DATA_DIR_VAR_NAME);

        let default_data_dir = PathBuf::from(DEFAULT_DATA_DIR_PATH);
        assert_eq!(get_ledger_data_dir().unwrap(), default_data_dir.join("ledger"));
        assert_eq!(
            get_ledger_db_path().unwrap(),
            default_data_dir.join("ledger").join("db")
        );

        let temp_dir_path = env::temp_dir();
        env::set_var(DATA_DIR_VAR_NAME, &temp_dir_path);

        assert_eq!(get_ledger_data_dir().unwrap(), temp_dir_path.join("ledger"));
        assert_eq!(
            get_ledger_db_path().unwrap(),
            temp_dir_path.join("ledger").join("db")
        );

        env::remove_var(DATA_DIR_VAR_NAME);
    }

    #[test]
    fn remove_dir_if_exists_reports_removal() {
        let path = env::temp_dir().join("reputation-storage-utils-remove-test");
        fs::create_dir_all(path.join("nested")).unwrap();

        assert!(remove_dir_if_exists(&path).unwrap());
        assert!(!path.exists());
        assert!(!remove_dir_if_exists(&path).unwrap());
    }
}
