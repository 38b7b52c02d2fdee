//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::AppError;
use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_PROVISIONING_EMAIL_DOMAIN, DEFAULT_PROVISIONING_PASSWORD,
    DEFAULT_PROVISIONING_SURNAME, DEFAULT_REFRESH_TOKEN_EXPIRY, MEMORY_DATABASE_URL,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub provisioning: ProvisioningSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseSettings {
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_DATABASE_URL
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Seconds
    pub access_token_expiry: i64,
    /// Seconds
    pub refresh_token_expiry: i64,
}

/// Settings for the login provisioned with every new factory.
#[derive(Debug, Deserialize, Clone)]
pub struct ProvisioningSettings {
    pub email_domain: String,
    pub default_password: String,
    pub default_surname: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// `json` or `pretty`
    pub format: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<String>,
}

impl AppConfig {
    /// Loads defaults, `config/default`, `config/{APP_ENV}` and `__`-separated
    /// environment variables, in that order of precedence.
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Builds a configuration from the built-in defaults only.
    pub fn with_defaults(database_url: &str, jwt_secret: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .set_override("database.url", database_url)?
            .set_override("jwt.secret", jwt_secret)?
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "factory-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("jwt.access_token_expiry", DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("jwt.refresh_token_expiry", DEFAULT_REFRESH_TOKEN_EXPIRY)?
            .set_default("provisioning.email_domain", DEFAULT_PROVISIONING_EMAIL_DOMAIN)?
            .set_default("provisioning.default_password", DEFAULT_PROVISIONING_PASSWORD)?
            .set_default("provisioning.default_surname", DEFAULT_PROVISIONING_SURNAME)?
            .set_default("log.format", "json")
    }
}
