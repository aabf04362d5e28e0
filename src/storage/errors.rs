use thiserror::Error;

use crate::types::DealId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Deal [{deal_id}] already exists in storage")]
    DuplicateKey {
        deal_id: DealId
    },
    #[error("Storage lock was poisoned")]
    LockPoisoned,
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error)
}
