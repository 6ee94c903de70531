use chrono::{Local, NaiveDateTime};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic},
    errors::StoreError,
};

use super::{Result, StorageBackend, Tables, SCHEMA_VERSION};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const DEFAULT_RETENTION: usize = 5;

/// Stores the tables as one pretty-printed JSON document. Snapshots live in
/// a sibling directory and are pruned to the configured retention.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(path: PathBuf, backups_dir: PathBuf, retention: Option<usize>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        ensure_dir(&backups_dir)?;
        Ok(Self {
            path,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self, backup_name: &str) -> PathBuf {
        self.backups_dir.join(backup_name)
    }

    fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("store")
            .to_string()
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for entry in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(self.backup_path(entry)) {
                tracing::warn!(backup = %entry, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    /// A missing file is an empty store.
    fn load(&self) -> Result<Tables> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no store file yet; starting empty");
            return Ok(Tables::default());
        }
        load_supported_tables(&self.path)
    }

    fn save(&mut self, tables: &Tables) -> Result<()> {
        save_tables_to_path(tables, &self.path)?;
        tracing::debug!(path = %self.path.display(), "store saved");
        Ok(())
    }

    fn backup(&mut self, tables: &Tables, note: Option<&str>) -> Result<String> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_stem = format!("{}_{}", self.file_stem(), timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            file_stem.push('_');
            file_stem.push_str(&label);
        }
        let name = format!("{}.{}", file_stem, BACKUP_EXTENSION);
        let json = serde_json::to_string_pretty(tables)?;
        write_atomic(&self.backup_path(&name), &json)?;
        self.prune_backups()?;
        Ok(name)
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| {
            parse_backup_timestamp(b)
                .cmp(&parse_backup_timestamp(a))
                .then_with(|| b.cmp(a))
        });
        Ok(entries)
    }

    /// Only names listed by [`StorageBackend::list_backups`] are accepted.
    fn restore(&mut self, backup_name: &str) -> Result<Tables> {
        if !self.list_backups()?.iter().any(|name| name == backup_name) {
            return Err(StoreError::Backup(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let tables = load_supported_tables(&self.backup_path(backup_name))?;
        save_tables_to_path(&tables, &self.path)?;
        Ok(tables)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn save_tables_to_path(tables: &Tables, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(tables)?;
    write_atomic(path, &json)?;
    Ok(())
}

pub fn load_tables_from_path(path: &Path) -> Result<Tables> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads `path`, refusing documents written by a newer schema.
fn load_supported_tables(path: &Path) -> Result<Tables> {
    let tables = load_tables_from_path(path)?;
    if tables.schema_version > SCHEMA_VERSION {
        return Err(StoreError::Backup(format!(
            "`{}` was written by a newer schema version ({})",
            path.display(),
            tables.schema_version
        )));
    }
    Ok(tables)
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Reads the `<stem>_YYYYMMDD_HHMMSS[_note].json` timestamp back out of a
/// backup name.
fn parse_backup_timestamp(name: &str) -> Option<NaiveDateTime> {
    let stem = name.strip_suffix(".json")?;
    let parts: Vec<&str> = stem.split('_').collect();
    parts.windows(2).rev().find_map(|pair| {
        if is_digits(pair[0], 8) && is_digits(pair[1], 6) {
            NaiveDateTime::parse_from_str(&format!("{}{}", pair[0], pair[1]), "%Y%m%d%H%M%S").ok()
        } else {
            None
        }
    })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}
