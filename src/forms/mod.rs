//! Form decoding, validation and sanitization for catalog submissions.

use serde::Serialize;
use thiserror::Error;

pub mod categories;
pub mod keyboards;
pub mod manufacturers;
pub mod rules;

/// A rejected submission: the sanitized values to redisplay and every failed
/// rule message, in rule order.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("form validation failed: {}", .errors.join(" "))]
pub struct InvalidForm<D> {
    pub draft: D,
    pub errors: Vec<String>,
}

impl<D> InvalidForm<D> {
    pub fn new(draft: D, errors: Vec<String>) -> Self {
        Self { draft, errors }
    }
}
