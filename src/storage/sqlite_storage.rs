use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode};
use tracing::info;

use crate::models::Deal;
use crate::storage::{Storage, StorageError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS deals (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    deal_id       TEXT    NOT NULL UNIQUE,
    from_currency TEXT    NOT NULL,
    to_currency   TEXT    NOT NULL,
    timestamp     TEXT,
    amount        TEXT,
    imported_at   TEXT    NOT NULL
);
"#;

/// SQLite-backed storage. The `deals.deal_id` column is unique, so a
/// concurrent import of the same id fails instead of writing twice.
pub struct SqliteStorage {
    connection: Mutex<Connection>
}

impl SqliteStorage {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let storage = Self::initialize(Connection::open(path)?)?;

        info!("Opened deal database at [{}] with {} stored deals", path.display(), storage.count()?);

        Ok(storage)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(connection: Connection) -> Result<Self, StorageError> {
        connection.execute_batch(SCHEMA)?;

        Ok(Self {
            connection: Mutex::new(connection)
        })
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        let count: i64 = self.lock()?.query_row("SELECT COUNT(*) FROM deals", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.connection.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl Storage for SqliteStorage {
    fn exists(&self, deal_id: &str) -> Result<bool, StorageError> {
        let exists = self.lock()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM deals WHERE deal_id = ?1)",
            params![deal_id],
            |row| row.get(0)
        )?;

        Ok(exists)
    }

    fn save(&self, deal: &Deal) -> Result<(), StorageError> {
        let result = self.lock()?.execute(
            "INSERT INTO deals (deal_id, from_currency, to_currency, timestamp, amount, imported_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                deal.deal_id,
                deal.from_currency,
                deal.to_currency,
                deal.timestamp,
                deal.amount.map(|amount| amount.to_string()),
                Utc::now()
            ]
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(error, _)) if error.code == ErrorCode::ConstraintViolation => {
                Err(StorageError::DuplicateKey { deal_id: deal.deal_id.clone() })
            }
            Err(error) => Err(error.into())
        }
    }
}
