//! Serializable view models handed to templates.

pub mod categories;
pub mod keyboards;
pub mod manufacturers;
