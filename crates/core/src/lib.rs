//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** logic (no infrastructure concerns):
//! item identity, the intake policies applied to creation requests, and the
//! domain error model.

pub mod error;
pub mod id;
pub mod intake;

pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use intake::{title_case, ItemDraft};
