mod errors;
mod memory_storage;
mod sqlite_storage;

use crate::models::Deal;

pub use errors::StorageError;
pub use memory_storage::MemoryStorage;
pub use sqlite_storage::SqliteStorage;

/// Durable home of imported deals.
///
/// The import engine only ever asks whether a deal id is already present and
/// writes new deals; it never reads a saved deal back.
pub trait Storage: Send + Sync + 'static {
    fn exists(&self, deal_id: &str) -> Result<bool, StorageError>;
    fn save(&self, deal: &Deal) -> Result<(), StorageError>;
}
