use thiserror::Error;

use crate::domain::RecordId;

/// Error type that captures persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: RecordId },
    #[error("Backup error: {0}")]
    Backup(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        StoreError::NotFound { entity, id }
    }
}
