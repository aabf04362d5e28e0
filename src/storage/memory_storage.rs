use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::Deal;
use crate::storage::{Storage, StorageError};
use crate::types::DealId;

/// Non-durable storage used when no database is configured.
#[derive(Default)]
pub struct MemoryStorage {
    deals: DashMap<DealId, Deal>
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            deals: DashMap::new()
        }
    }
}

#[cfg(test)]
impl MemoryStorage {
    pub(crate) fn iter(&self) -> dashmap::iter::Iter<'_, DealId, Deal> {
        self.deals.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.deals.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, deal_id: &str) -> Result<bool, StorageError> {
        Ok(self.deals.contains_key(deal_id))
    }

    fn save(&self, deal: &Deal) -> Result<(), StorageError> {
        match self.deals.entry(deal.deal_id.clone()) {
            Entry::Occupied(_) => Err(StorageError::DuplicateKey { deal_id: deal.deal_id.clone() }),
            Entry::Vacant(entry) => {
                entry.insert(deal.clone());
                Ok(())
            }
        }
    }
}
