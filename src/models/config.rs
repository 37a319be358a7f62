use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Configuration options for the catalog server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `127.0.0.1`.
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Key material for signing flash message cookies.
    pub secret: String,
    /// Glob passed to `Tera::new`.
    pub templates_dir: String,
}

impl ServerConfig {
    /// Layered load: `config/default.yaml`, then `config/{APP_ENV}.yaml`, then
    /// `APP__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "kbstore.db")?
            .set_default("secret", "")?
            .set_default("templates_dir", "./templates/**/*")?
            .build()?
            .try_deserialize()
    }
}
