//! Catalog use cases. Handlers call into these functions, which are generic
//! over the repository traits so they run against SQLite or the in-memory
//! test repository alike.

use crate::forms::InvalidForm;

pub mod categories;
pub mod errors;
pub mod keyboards;
pub mod main;
pub mod manufacturers;

pub use errors::{ServiceError, ServiceResult};

/// Result of a create or update submission.
#[derive(Debug, PartialEq)]
pub enum FormOutcome<I, D> {
    /// The record is stored under this id. On create this may be an existing
    /// record with the same name.
    Saved(I),
    /// The submission was rejected and nothing was written.
    Invalid(InvalidForm<D>),
}

/// Result of a delete submission. `P` is the delete page shown again when
/// the record is still referenced.
#[derive(Debug, PartialEq)]
pub enum DeleteOutcome<P> {
    Deleted,
    /// Nothing to delete; callers treat this as success.
    AlreadyDeleted,
    Blocked(P),
}
