//! Service settings: defaults, then an optional `trivia.toml`, then `TRIVIA_*`
//! environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Source};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// sqlx SQLite URL; the file is created when missing
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Apply embedded migrations before serving
    pub run_migrations: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::with_sources(
            defaults()?
                .add_source(File::with_name("trivia").required(false))
                .add_source(Environment::with_prefix("TRIVIA").try_parsing(true)),
        )
    }

    /// Defaults overlaid with a single extra source.
    pub fn load_from<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Self::with_sources(defaults()?.add_source(source))
    }

    fn with_sources(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("database_url", "sqlite:trivia.db")?
        .set_default("host", "0.0.0.0")?
        .set_default("port", 8080)?
        .set_default("run_migrations", true)
}
