use parcel_core::{
    open_db_in_memory, Parcel, ParcelStatus, ParcelStore, RepoError, SqliteParcelStore,
};
use rusqlite::Connection;
use std::collections::HashMap;

fn test_parcel() -> Parcel {
    Parcel::new(1000, "test", "2026-10-19T08:30:00Z")
}

#[test]
fn add_get_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let mut parcel = test_parcel();

    let id = store.add(&parcel).unwrap();
    assert_eq!(id, 1);
    parcel.number = id;

    let stored = store.get(id).unwrap();
    assert_eq!(stored, parcel);

    store.delete(id).unwrap();

    let err = store.get(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(number) if number == id));
}

#[test]
fn add_ignores_caller_supplied_number() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();

    let mut parcel = test_parcel();
    parcel.number = 42;
    let id = store.add(&parcel).unwrap();

    assert_eq!(id, 1);
    assert!(matches!(store.get(42), Err(RepoError::NotFound(42))));
}

#[test]
fn numbers_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();

    let first = store.add(&test_parcel()).unwrap();
    let second = store.add(&test_parcel()).unwrap();
    store.delete(second).unwrap();
    let third = store.add(&test_parcel()).unwrap();

    assert!(second > first);
    assert!(third > second);
}

#[test]
fn get_unknown_number_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();

    assert!(matches!(store.get(999), Err(RepoError::NotFound(999))));
}

#[test]
fn set_address_updates_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let id = store.add(&test_parcel()).unwrap();

    store.set_address(id, "new test address").unwrap();

    assert_eq!(store.get(id).unwrap().address, "new test address");
}

#[test]
fn set_status_is_reflected_by_get() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let id = store.add(&test_parcel()).unwrap();

    store.set_status(id, &ParcelStatus::Sent).unwrap();

    assert_eq!(store.get(id).unwrap().status, ParcelStatus::Sent);
}

#[test]
fn set_status_on_missing_parcel_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();

    store.set_status(12345, &ParcelStatus::Delivered).unwrap();

    assert!(matches!(store.get(12345), Err(RepoError::NotFound(12345))));
}

#[test]
fn sent_parcel_rejects_address_change_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let id = store.add(&test_parcel()).unwrap();
    store.set_status(id, &ParcelStatus::Sent).unwrap();

    let address_err = store.set_address(id, "new").unwrap_err();
    assert!(matches!(address_err, RepoError::NotFound(number) if number == id));

    let delete_err = store.delete(id).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound(number) if number == id));

    let stored = store.get(id).unwrap();
    assert_eq!(stored.address, "test");
    assert_eq!(stored.status, ParcelStatus::Sent);
}

#[test]
fn delivered_parcel_is_protected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let id = store.add(&test_parcel()).unwrap();
    store.set_status(id, &ParcelStatus::Delivered).unwrap();

    assert!(store.set_address(id, "elsewhere").is_err());
    assert!(store.delete(id).is_err());
    assert!(store.get(id).is_ok());
}

#[test]
fn guarded_operations_on_missing_parcel_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();

    assert!(matches!(
        store.set_address(7, "nowhere"),
        Err(RepoError::NotFound(7))
    ));
    assert!(matches!(store.delete(7), Err(RepoError::NotFound(7))));
}

#[test]
fn get_by_client_returns_only_that_clients_parcels() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();

    let client = 4_815_162;
    let mut expected = HashMap::new();
    for address in ["a", "b", "c"] {
        let mut parcel = Parcel::new(client, address, "2026-10-19T08:30:00Z");
        parcel.number = store.add(&parcel).unwrap();
        expected.insert(parcel.number, parcel);
    }
    store.add(&test_parcel()).unwrap();

    let stored = store.get_by_client(client).unwrap();
    assert_eq!(stored.len(), expected.len());
    for parcel in &stored {
        assert_eq!(expected.get(&parcel.number), Some(parcel));
    }

    let numbers: Vec<_> = stored.iter().map(|parcel| parcel.number).collect();
    let mut sorted = numbers.clone();
    sorted.sort_unstable();
    assert_eq!(numbers, sorted);
}

#[test]
fn get_by_client_without_parcels_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    store.add(&test_parcel()).unwrap();

    assert!(store.get_by_client(1).unwrap().is_empty());
}

#[test]
fn set_status_accepts_literal_outside_vocabulary() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let id = store.add(&test_parcel()).unwrap();

    store.set_status(id, &ParcelStatus::from("returned")).unwrap();

    let stored = store.get(id).unwrap();
    assert_eq!(stored.status, ParcelStatus::Other("returned".to_string()));
    assert_eq!(stored.status.as_str(), "returned");
}

#[test]
fn unknown_persisted_status_does_not_hide_client_parcels() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let first = store.add(&test_parcel()).unwrap();
    let second = store.add(&test_parcel()).unwrap();

    conn.execute(
        "UPDATE parcel SET status = 'returned' WHERE number = ?1;",
        [second],
    )
    .unwrap();

    assert_eq!(store.get(first).unwrap().status, ParcelStatus::Registered);
    assert_eq!(store.get(second).unwrap().status.as_str(), "returned");

    let parcels = store.get_by_client(1000).unwrap();
    assert_eq!(parcels.len(), 2);
    assert!(matches!(store.delete(second), Err(RepoError::NotFound(_))));
}

#[test]
fn storage_failures_surface_as_db_errors() {
    let conn = Connection::open_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);

    assert!(matches!(store.add(&test_parcel()), Err(RepoError::Db(_))));
    assert!(matches!(store.get(1), Err(RepoError::Db(_))));
}

#[test]
fn store_rejects_connection_without_parcel_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteParcelStore::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("parcel"))));
}

#[test]
fn store_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE parcel (
            number INTEGER PRIMARY KEY AUTOINCREMENT,
            client INTEGER NOT NULL,
            status TEXT NOT NULL,
            address TEXT NOT NULL
        );",
    )
    .unwrap();

    let result = SqliteParcelStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "parcel",
            column: "created_at"
        })
    ));
}
