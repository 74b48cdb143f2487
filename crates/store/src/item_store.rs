//! The store contract: record types, error type, and the `ItemStore` trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::{ItemDraft, ItemId};

/// An item accepted for storage but not yet assigned an identifier.
///
/// Both fields are optional: the unvalidated intake policies hand over
/// whatever the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

impl From<ItemDraft> for NewItem {
    fn from(draft: ItemDraft) -> Self {
        Self {
            name: draft.name,
            quantity: draft.quantity,
        }
    }
}

/// A persisted item record.
///
/// `id` and `created_at` are assigned by the store during insert and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: ItemId,
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Store operation error.
///
/// These are infrastructure failures (backend unreachable, failed reads or
/// writes), never domain failures. Callers map every variant to the same
/// opaque response; the detail stays in logs.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the operation.
    #[error("store operation failed: {0}")]
    Backend(String),
}

/// Item persistence contract.
///
/// Implementations must assign identifiers on insert and support equality
/// lookups on the `name` field. `insert` is a single atomic write: on error
/// no record may remain behind. Uniqueness of `name` is NOT enforced here;
/// callers that care check first, and that check is not atomic with the
/// insert.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persist a new item, assigning it an identifier and timestamp.
    async fn insert(&self, item: NewItem) -> Result<StoredItem, StoreError>;

    /// Find an item whose `name` equals `name` exactly. Records stored
    /// without a name never match.
    async fn find_by_name(&self, name: &str) -> Result<Option<StoredItem>, StoreError>;
}

#[async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn insert(&self, item: NewItem) -> Result<StoredItem, StoreError> {
        (**self).insert(item).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StoredItem>, StoreError> {
        (**self).find_by_name(name).await
    }
}
