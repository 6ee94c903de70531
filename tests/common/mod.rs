#![allow(dead_code)]

use std::{io::Cursor, path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use sales_core::{
    cli::{ScriptPrompter, ShellContext},
    config::ConfigManager,
    core::FixedClock,
    storage::{JsonStorage, Store},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// JSON-backed store and config manager rooted in a unique directory.
pub fn setup_test_env() -> (Store, ConfigManager) {
    let base = temp_base();
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let config = config_manager.load().expect("default config");
    let storage = JsonStorage::new(
        config_manager.store_path(&config),
        config_manager.backups_path(),
        Some(3),
    )
    .expect("create json storage backend");
    let store = Store::open(Box::new(storage)).expect("open store");
    (store, config_manager)
}

/// Friday 15 March 2024, 18:30.
pub fn friday_evening() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap()
}

/// Shell context that answers prompts from `script`, one line each.
pub fn scripted_context(store: Store, script: &str, now: NaiveDateTime) -> ShellContext {
    let prompter = ScriptPrompter::new(Cursor::new(script.to_string())).quiet();
    ShellContext::with_parts(
        store,
        temp_base().join("exports"),
        Box::new(prompter),
        Box::new(FixedClock(now)),
    )
}
