pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod keyboard;
pub mod manufacturer;
