//! Errors raised while admitting an item.
//!
//! Both variants are decided before any store call and carry the exact
//! message the HTTP layer serializes to the caller. [`DomainError::message`]
//! exposes that message on its own; the [`Display`](std::fmt::Display) form
//! prefixes it with the error kind for log lines.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Rejection of a create request on business grounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The payload did not satisfy the endpoint's intake policy.
    #[error("invalid item payload: {0}")]
    Validation(String),

    /// Another item already holds the requested name.
    #[error("duplicate item: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// The message serialized to the caller, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) => msg,
        }
    }
}
