//! Store wiring for the API process.
//!
//! The store handle is constructed once at startup, shared by every request
//! through the router extension, and released on shutdown.

use std::sync::Arc;

use anyhow::Context;

use stockroom_store::{
    InMemoryItemStore, ItemStore, NewItem, PostgresItemStore, StoreError, StoredItem,
};

/// The store backend selected at startup.
#[derive(Clone)]
pub enum AppServices {
    InMemory { store: Arc<InMemoryItemStore> },
    Persistent { store: Arc<PostgresItemStore> },
}

/// Select and construct the store backend from the environment.
///
/// `USE_PERSISTENT_STORES=true` selects Postgres (requires `DATABASE_URL`);
/// anything else selects the in-memory store.
pub async fn build_services() -> anyhow::Result<AppServices> {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;
        let store = PostgresItemStore::connect(&database_url)
            .await
            .context("failed to connect to Postgres")?;
        return Ok(AppServices::Persistent {
            store: Arc::new(store),
        });
    }

    Ok(AppServices::in_memory())
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::InMemory {
            store: Arc::new(InMemoryItemStore::new()),
        }
    }

    /// Wrap an existing in-memory store (tests keep a handle for direct
    /// inspection).
    pub fn with_store(store: Arc<InMemoryItemStore>) -> Self {
        Self::InMemory { store }
    }

    pub async fn insert_item(&self, item: NewItem) -> Result<StoredItem, StoreError> {
        match self {
            AppServices::InMemory { store } => store.insert(item).await,
            AppServices::Persistent { store } => store.insert(item).await,
        }
    }

    pub async fn find_item_by_name(&self, name: &str) -> Result<Option<StoredItem>, StoreError> {
        match self {
            AppServices::InMemory { store } => store.find_by_name(name).await,
            AppServices::Persistent { store } => store.find_by_name(name).await,
        }
    }

    /// Release the store connection (no-op for the in-memory store).
    pub async fn shutdown(&self) {
        match self {
            AppServices::InMemory { .. } => {}
            AppServices::Persistent { store } => store.close().await,
        }
    }
}
