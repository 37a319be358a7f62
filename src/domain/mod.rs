//! Persistence-independent catalog entities.

pub mod category;
pub mod keyboard;
pub mod manufacturer;
pub mod types;
