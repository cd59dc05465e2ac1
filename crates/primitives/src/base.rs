pub const DEFAULT_DATA_DIR_PATH: &str = ".reputation";
pub const DEFAULT_LEDGER_DB_PATH: &str = ".reputation/ledger/db";

/// Also read by the layered config as its `data_dir` key.
pub const DATA_DIR_VAR_NAME: &str = "REPUTATION_DATA_DIR";
