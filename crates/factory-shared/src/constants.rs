//! Application-wide constants

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604800;

pub const DEFAULT_PROVISIONING_EMAIL_DOMAIN: &str = "factory.com";
pub const DEFAULT_PROVISIONING_PASSWORD: &str = "changeme";
pub const DEFAULT_PROVISIONING_SURNAME: &str = "Default Surname";

/// Database URL that selects the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory://";
