use ledgerdb::{LedgerDb, LedgerDbError, RocksDbAdapter};
use reputation_core::{GlobalStats, RatingError, ReputationDetails};
use serial_test::serial;
use storage_utils::StorageError;

mod common;
use common::{_named_address, _persistent_config, _read_only_config, _temp_db_path};

#[test]
#[serial]
fn ratings_survive_reopening() {
    let path = _temp_db_path();
    let alice = _named_address("alice");
    let bob = _named_address("bob");
    let charlie = _named_address("charlie");
    let dave = _named_address("dave");

    {
        let mut db = LedgerDb::new(_persistent_config(path.clone())).unwrap();
        assert!(db.is_persistent());

        db.submit_rating(&alice, &bob, 5).unwrap();
        db.submit_rating(&alice, &dave, 4).unwrap();
        db.submit_rating(&charlie, &bob, 2).unwrap();
    }

    let mut db = LedgerDb::new(_persistent_config(path.clone())).unwrap();

    assert_eq!(
        db.get_contract_stats(),
        GlobalStats {
            total_ratings: 3,
            total_users: 2,
        }
    );
    assert_eq!(
        db.get_reputation_details(&bob),
        ReputationDetails {
            total_score: 7,
            rating_count: 2,
        }
    );
    assert_eq!(db.get_reputation(&bob), 3);
    assert!(db.has_rated(&alice, &dave));

    // duplicates are still rejected after a restart
    let err = db.submit_rating(&alice, &bob, 1).unwrap_err();
    assert_eq!(err.rating_error(), Some(RatingError::AlreadyRated));

    drop(db);
    std::fs::remove_dir_all(path).unwrap();
}

#[test]
#[serial]
fn rejected_ratings_are_not_persisted() {
    let path = _temp_db_path();
    let alice = _named_address("alice");

    {
        let mut db = LedgerDb::new(_persistent_config(path.clone())).unwrap();
        assert!(db.submit_rating(&alice, &alice, 5).is_err());
        assert!(db.submit_rating(&alice, &_named_address("bob"), 9).is_err());
    }

    let db = LedgerDb::new(_persistent_config(path.clone())).unwrap();
    assert_eq!(db.get_contract_stats(), GlobalStats::default());

    drop(db);
    std::fs::remove_dir_all(path).unwrap();
}

#[test]
#[serial]
fn inconsistent_rows_fail_to_open() {
    let path = _temp_db_path();

    {
        let mut db = LedgerDb::new(_persistent_config(path.clone())).unwrap();
        db.submit_rating(&_named_address("alice"), &_named_address("bob"), 5)
            .unwrap();
    }

    {
        let adapter = RocksDbAdapter::new(&path).unwrap();
        adapter
            .put_global_stats(&GlobalStats {
                total_ratings: 10,
                total_users: 1,
            })
            .unwrap();
    }

    assert!(LedgerDb::new(_persistent_config(path.clone())).is_err());

    std::fs::remove_dir_all(path).unwrap();
}

#[test]
#[serial]
fn failed_writes_leave_published_state_untouched() {
    let path = _temp_db_path();
    let alice = _named_address("alice");
    let bob = _named_address("bob");
    let charlie = _named_address("charlie");

    {
        let mut db = LedgerDb::new(_persistent_config(path.clone())).unwrap();
        db.submit_rating(&alice, &bob, 4).unwrap();
    }

    let mut db = LedgerDb::new(_read_only_config(path.clone())).unwrap();
    let stats = db.get_contract_stats();
    let details = db.get_reputation_details(&bob);
    let reader = db.read_handle();

    let err = db.submit_rating(&charlie, &bob, 2).unwrap_err();

    assert!(matches!(
        err,
        LedgerDbError::Storage(StorageError::Database(_))
    ));
    assert_eq!(err.rating_error(), None);
    assert!(!db.has_rated(&charlie, &bob));
    assert!(!reader.has_rated(&charlie, &bob));
    assert_eq!(db.get_contract_stats(), stats);
    assert_eq!(reader.get_contract_stats(), stats);
    assert_eq!(db.get_reputation_details(&bob), details);

    drop(reader);
    drop(db);

    // nothing reached disk either
    let db = LedgerDb::new(_persistent_config(path.clone())).unwrap();
    assert!(!db.has_rated(&charlie, &bob));
    assert_eq!(db.get_contract_stats(), stats);

    drop(db);
    std::fs::remove_dir_all(path).unwrap();
}

#[test]
#[serial]
fn read_only_requires_an_existing_database() {
    let path = _temp_db_path();

    assert!(matches!(
        LedgerDb::new(_read_only_config(path.clone())),
        Err(LedgerDbError::Storage(StorageError::Database(_)))
    ));
    assert!(!path.exists());
}
