//! Core library exports for the KBStore catalog.
//!
//! The `data` feature exposes the persistence layer (domain types, Diesel
//! models and repositories). The `server` feature adds forms, services and
//! the Actix-web routes serving the catalog pages.

pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
