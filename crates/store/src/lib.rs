//! Item persistence: the store contract and its backends.
//!
//! The Item Store holds item records keyed by an identifier it assigns on
//! insert, and supports exact-equality lookup on the `name` field. Nothing
//! else is queryable. Two backends: an in-memory store for tests/dev and a
//! Postgres-backed store for persistent deployments.

pub mod in_memory;
pub mod item_store;
pub mod postgres;

pub use in_memory::InMemoryItemStore;
pub use item_store::{ItemStore, NewItem, StoreError, StoredItem};
pub use postgres::PostgresItemStore;
