//! In-memory item store.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use stockroom_core::ItemId;

use crate::item_store::{ItemStore, NewItem, StoreError, StoredItem};

/// In-memory item store.
///
/// Intended for tests/dev. Records are kept in insertion order behind a
/// `RwLock`; `find_by_name` returns the oldest match.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<StoredItem>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, in insertion order.
    pub fn all(&self) -> Vec<StoredItem> {
        self.items
            .read()
            .map(|items| items.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn insert(&self, item: NewItem) -> Result<StoredItem, StoreError> {
        let stored = StoredItem {
            id: ItemId::new(),
            name: item.name,
            quantity: item.quantity,
            created_at: Utc::now(),
        };

        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        items.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StoredItem>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(items
            .iter()
            .find(|item| item.name.as_deref() == Some(name))
            .cloned())
    }
}
