use chrono::Local;

use crate::errors::StoreError;

use super::{Result, StorageBackend, Tables};

/// Keeps the tables and their snapshots in process memory. Used by tests and
/// throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    current: Tables,
    backups: Vec<(String, Tables)>,
}

impl MemoryStorage {
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            current: tables,
            backups: Vec::new(),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Tables> {
        Ok(self.current.clone())
    }

    fn save(&mut self, tables: &Tables) -> Result<()> {
        self.current = tables.clone();
        Ok(())
    }

    fn backup(&mut self, tables: &Tables, note: Option<&str>) -> Result<String> {
        let mut name = format!(
            "memory_{}_{}",
            self.backups.len() + 1,
            Local::now().format("%Y%m%d_%H%M%S")
        );
        if let Some(note) = note.map(str::trim).filter(|note| !note.is_empty()) {
            name.push('_');
            name.push_str(note);
        }
        self.backups.push((name.clone(), tables.clone()));
        Ok(name)
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        Ok(self
            .backups
            .iter()
            .rev()
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn restore(&mut self, backup_name: &str) -> Result<Tables> {
        let tables = self
            .backups
            .iter()
            .find(|(name, _)| name == backup_name)
            .map(|(_, tables)| tables.clone())
            .ok_or_else(|| StoreError::Backup(format!("backup `{backup_name}` not found")))?;
        self.current = tables.clone();
        Ok(tables)
    }

    fn describe(&self) -> String {
        "in-memory store".into()
    }
}
