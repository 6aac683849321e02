//! Layered configuration: built-in defaults, optional `config/default.toml`,
//! then `FINLEAD__`-prefixed environment variables
//! (e.g. `FINLEAD__SERVER__PORT=8080`).

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Loads settings from all sources. The file is optional so the binary
    /// runs out of the box.
    pub fn load() -> AppResult<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000i64)?
            .set_default("server.debug", false)?
            .set_default("database.url", "sqlite://finlead.db")?
            .set_default("database.max_connections", 5i64)?
            .set_default("logging.level", "info")?
            .add_source(
                File::with_name("config/default")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("FINLEAD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    /// One-line summary for startup logging; never includes secrets.
    pub fn summary(&self) -> String {
        format!(
            "host={} port={} workers={:?} db={} log={}",
            self.server.host,
            self.server.port,
            self.server.workers,
            self.database.url,
            self.logging.level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file() {
        let settings = Settings::load().unwrap();
        assert!(!settings.server.host.is_empty());
        assert!(settings.database.max_connections >= 1);
        assert!(!settings.logging.level.is_empty());
    }
}
