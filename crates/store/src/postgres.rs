//! Postgres-backed item store.
//!
//! Records live in the `items` table, keyed by a UUID assigned on insert.
//! Lookups filter on exact `name` equality; no other query shape is
//! supported.
//!
//! ## Error mapping
//!
//! SQLx errors are collapsed into the two `StoreError` variants: pool and
//! I/O failures become `Unavailable`, everything else becomes `Backend`.
//! Callers surface neither; the distinction exists for logs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use stockroom_core::ItemId;

use crate::item_store::{ItemStore, NewItem, StoreError, StoredItem};

/// Postgres-backed item store.
///
/// Expects an `items` table shaped as:
///
/// ```sql
/// CREATE TABLE items (
///     id         UUID PRIMARY KEY,
///     name       TEXT,
///     quantity   BIGINT,
///     created_at TIMESTAMPTZ NOT NULL
/// );
/// ```
///
/// Schema provisioning is deployment's concern; this store assumes the
/// table exists. Note there is no unique constraint on `name` — see the
/// `ItemStore` contract.
#[derive(Debug, Clone)]
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close the pool. Called once during process shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    #[instrument(skip(self), fields(name = ?item.name))]
    async fn insert(&self, item: NewItem) -> Result<StoredItem, StoreError> {
        let id = ItemId::new();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO items (id, name, quantity, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&item.name)
        .bind(item.quantity)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(StoredItem {
            id,
            name: item.name,
            quantity: item.quantity,
            created_at,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<StoredItem>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, quantity, created_at
            FROM items
            WHERE name = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => Ok(Some(stored_item_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

fn stored_item_from_row(row: &PgRow) -> Result<StoredItem, StoreError> {
    let id: Uuid = row.try_get("id").map_err(map_sqlx_error)?;
    let name: Option<String> = row.try_get("name").map_err(map_sqlx_error)?;
    let quantity: Option<i64> = row.try_get("quantity").map_err(map_sqlx_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(StoredItem {
        id: ItemId::from_uuid(id),
        name,
        quantity,
        created_at,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}
