mod common;

use std::fs;

use chrono::NaiveDate;
use common::{friday_evening, setup_test_env, temp_base};
use sales_core::{
    config::ConfigManager,
    domain::{NewCashDelivery, NewProduct, NewSale, SaleStatus},
    errors::StoreError,
    storage::{JsonStorage, Store},
};

fn tea() -> NewProduct {
    NewProduct {
        date: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        name: "Tea".into(),
        quantity: 40,
        price: 2.5,
    }
}

fn reopen(config_manager: &ConfigManager) -> Store {
    let config = config_manager.load().expect("config");
    let storage = JsonStorage::new(
        config_manager.store_path(&config),
        config_manager.backups_path(),
        Some(3),
    )
    .expect("storage");
    Store::open(Box::new(storage)).expect("reopen store")
}

#[test]
fn records_and_counters_survive_a_reopen() {
    let (mut store, config_manager) = setup_test_env();
    store.create_product(tea()).unwrap();
    store
        .create_sale(NewSale {
            date: friday_evening(),
            client: "Ana".into(),
            product_id: 1,
            quantity: 3,
            price: 2.5,
            status: SaleStatus::Paid,
        })
        .unwrap();
    store
        .create_cash_delivery(NewCashDelivery {
            date: friday_evening(),
            name: "Owner".into(),
            description: "Pickup".into(),
            amount: 5.0,
        })
        .unwrap();
    store.create_product(tea()).unwrap();
    store.delete_product(2).unwrap();
    drop(store);

    let mut reopened = reopen(&config_manager);
    assert_eq!(reopened.products().len(), 1);
    let sale = reopened.sale(1).expect("sale persisted");
    assert_eq!(sale.date, friday_evening());
    assert_eq!(sale.total, 7.5);
    assert_eq!(reopened.cash_deliveries()[0].amount, 5.0);

    let next = reopened.create_product(tea()).unwrap();
    assert_eq!(next.id, 3, "deleted ids are not handed out again");
}

#[test]
fn failed_save_keeps_file_and_memory_unchanged() {
    let (mut store, config_manager) = setup_test_env();
    store.create_product(tea()).unwrap();

    let config = config_manager.load().unwrap();
    let store_path = config_manager.store_path(&config);
    let before = fs::read_to_string(&store_path).expect("store file");

    // A directory where the temporary file should go makes the write fail.
    fs::create_dir_all(store_path.with_extension("json.tmp")).unwrap();

    let err = store.create_product(tea()).expect_err("save must fail");
    assert!(matches!(err, StoreError::Io(_)), "unexpected error: {err}");
    assert_eq!(store.products().len(), 1);
    assert_eq!(fs::read_to_string(&store_path).unwrap(), before);

    fs::remove_dir(store_path.with_extension("json.tmp")).unwrap();
    let retried = store.create_product(tea()).expect("save succeeds again");
    assert_eq!(retried.id, 2);
}

#[test]
fn backups_are_pruned_to_the_retention_limit() {
    let (mut store, config_manager) = setup_test_env();
    store.create_product(tea()).unwrap();

    for note in ["one", "two", "three", "four", "five"] {
        store.backup(Some(note)).expect("backup");
    }

    let backups = store.list_backups().unwrap();
    assert_eq!(backups.len(), 3);
    assert!(backups.iter().all(|name| name.starts_with("store_")));
    assert_eq!(
        fs::read_dir(config_manager.backups_path()).unwrap().count(),
        3
    );
}

#[test]
fn restore_replaces_records_and_is_persisted() {
    let (mut store, config_manager) = setup_test_env();
    store.create_product(tea()).unwrap();
    let backup = store.backup(None).unwrap();
    store.delete_product(1).unwrap();
    assert!(store.products().is_empty());

    store.restore(&backup).unwrap();
    assert_eq!(store.products().len(), 1);
    drop(store);

    assert_eq!(reopen(&config_manager).products().len(), 1);
}

#[test]
fn restoring_an_unknown_backup_fails() {
    let (mut store, _config_manager) = setup_test_env();
    assert!(matches!(
        store.restore("store_19990101_000000.json"),
        Err(StoreError::Backup(_))
    ));
}

#[test]
fn a_store_file_from_a_newer_schema_is_refused() {
    let base = temp_base();
    let path = base.join("store.json");
    fs::write(&path, r#"{"schema_version": 99}"#).unwrap();
    let storage = JsonStorage::new(path, base.join("backups"), None).unwrap();
    assert!(Store::open(Box::new(storage)).is_err());
}
