//! Environment-driven service settings.

use std::env;

const DATABASE_URL_VAR: &str = "ORGBOOK_DATABASE_URL";
const DATABASE_NAME_VAR: &str = "ORGBOOK_DATABASE_NAME";
const BIND_ADDR_VAR: &str = "ORGBOOK_BIND_ADDR";

const DEFAULT_DATABASE_NAME: &str = "orgbook";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings read once at startup.
///
/// Absent variables fall back through the accessors; no value is re-read per
/// request. Without a database URL the server runs on the in-memory
/// repositories.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    database_url: Option<String>,
    database_name: Option<String>,
    bind_addr: Option<String>,
}

impl Settings {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: env::var(DATABASE_URL_VAR).ok(),
            database_name: env::var(DATABASE_NAME_VAR).ok(),
            bind_addr: env::var(BIND_ADDR_VAR).ok(),
        }
    }

    /// Document store connection string, when configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Database name, falling back to the default.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database_name.as_deref().unwrap_or(DEFAULT_DATABASE_NAME)
    }

    /// Listen address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }
}
