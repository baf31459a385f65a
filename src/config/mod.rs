//! Application configuration
//!
//! Server and database settings come from defaults, an optional TOML file and
//! `ECOHOTEL_*` environment variables. Ledger connection parameters live in a
//! separate YAML file, see [`loader`].

pub mod loader;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EcoHotelError;

pub use loader::LedgerConfig;

const DEFAULT_CONFIG_FILE: &str = "ecohotel";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub ledger_config_path: String,
}

impl AppConfig {
    /// Load from `ecohotel.{toml,yaml,json}` in the working directory, if present.
    pub fn load() -> Result<Self, EcoHotelError> {
        Self::build(::config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, EcoHotelError> {
        Self::build(::config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, EcoHotelError>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        let settings = ::config::Config::builder()
            .set_default("database_url", "sqlite://ecohotel.db")?
            .set_default("server_host", "0.0.0.0")?
            .set_default("server_port", 8000)?
            .set_default("ledger_config_path", "res/conf.yaml")?
            .add_source(file)
            .add_source(::config::Environment::with_prefix("ECOHOTEL").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
