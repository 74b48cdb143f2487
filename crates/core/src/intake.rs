//! Intake policies applied to item creation requests.
//!
//! Every create endpoint shares the same shape: validate the decoded payload
//! against the endpoint's policy, normalize it, and hand the result to the
//! store. The policies live here as pure functions over already-decoded
//! input, so they can be exercised without HTTP or storage.

use serde_json::Value as JsonValue;

use crate::error::{DomainError, DomainResult};

const NAME_AND_QUANTITY_REQUIRED: &str = "Name and quantity are required";
const QUANTITY_MUST_BE_POSITIVE: &str = "Quantity must be a positive number";
const QUANTITY_MUST_BE_NUMBER: &str = "Quantity must be a number";
const NAME_REQUIRED: &str = "Name is required";

/// An item that passed an intake policy and is ready to persist.
///
/// Both fields stay optional: the unvalidated policies persist whatever was
/// given, including nothing at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

impl ItemDraft {
    /// Accept the payload as-is, with no checks.
    ///
    /// Absent fields pass through and are persisted as absent.
    pub fn passthrough(name: Option<String>, quantity: Option<i64>) -> Self {
        Self { name, quantity }
    }

    /// Require both fields, and a non-negative integral quantity.
    ///
    /// The quantity arrives as raw JSON so that a non-numeric value is
    /// reported as a policy violation rather than a decode failure.
    pub fn strict(name: Option<&str>, quantity: Option<&JsonValue>) -> DomainResult<Self> {
        let name = require_name(name, NAME_AND_QUANTITY_REQUIRED)?;

        let quantity = match quantity {
            None | Some(JsonValue::Null) => {
                return Err(DomainError::validation(NAME_AND_QUANTITY_REQUIRED));
            }
            Some(value) => value
                .as_i64()
                .filter(|q| *q >= 0)
                .ok_or_else(|| DomainError::validation(QUANTITY_MUST_BE_POSITIVE))?,
        };

        Ok(Self {
            name: Some(name),
            quantity: Some(quantity),
        })
    }

    /// Require both fields to be present; a present quantity must be numeric
    /// but is otherwise unconstrained.
    pub fn required(name: Option<&str>, quantity: Option<&JsonValue>) -> DomainResult<Self> {
        let name = require_name(name, NAME_AND_QUANTITY_REQUIRED)?;

        let quantity = match quantity {
            None | Some(JsonValue::Null) => {
                return Err(DomainError::validation(NAME_AND_QUANTITY_REQUIRED));
            }
            Some(value) => value
                .as_i64()
                .ok_or_else(|| DomainError::validation(QUANTITY_MUST_BE_NUMBER))?,
        };

        Ok(Self {
            name: Some(name),
            quantity: Some(quantity),
        })
    }

    /// Require a name; normalize it and default the quantity.
    ///
    /// The name is trimmed and title-cased; a missing quantity becomes 1,
    /// a present one must be numeric.
    pub fn normalized(name: Option<&str>, quantity: Option<&JsonValue>) -> DomainResult<Self> {
        let name = require_name(name, NAME_REQUIRED)?;

        let quantity = match quantity {
            None | Some(JsonValue::Null) => 1,
            Some(value) => value
                .as_i64()
                .ok_or_else(|| DomainError::validation(QUANTITY_MUST_BE_NUMBER))?,
        };

        Ok(Self {
            name: Some(title_case(name.trim())),
            quantity: Some(quantity),
        })
    }
}

fn require_name(name: Option<&str>, msg: &str) -> DomainResult<String> {
    match name {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(DomainError::validation(msg)),
    }
}

/// Capitalize the first letter of each whitespace-separated word.
///
/// Internal whitespace is preserved; characters after a word's first are
/// left unchanged.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }

    out
}
