//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_DATABASE_URL, DEFAULT_PAYMENT_METHOD,
    STORE_BACKEND_MEMORY, STORE_BACKEND_SQLITE,
};

/// Which record store backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Durable SQLite file through sea-orm
    Sqlite,
    /// Process-local, lost on exit
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            STORE_BACKEND_SQLITE => Some(StoreBackend::Sqlite),
            STORE_BACKEND_MEMORY => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub store_backend: StoreBackend,
    pub admin_email: String,
    admin_password: String,
    pub default_payment_method: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("store_backend", &self.store_backend)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .field("default_payment_method", &self.default_payment_method)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            store_backend: StoreBackend::Sqlite,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            default_payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let store_backend = match env::var("HOTEL_OPS_STORE") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown HOTEL_OPS_STORE '{}', using sqlite", value);
                StoreBackend::Sqlite
            }),
            Err(_) => defaults.store_backend,
        };

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            store_backend,
            admin_email: env::var("HOTEL_OPS_ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: env::var("HOTEL_OPS_ADMIN_PASSWORD")
                .unwrap_or(defaults.admin_password),
            default_payment_method: env::var("HOTEL_OPS_PAYMENT_METHOD")
                .ok()
                .filter(|method| !method.trim().is_empty())
                .unwrap_or(defaults.default_payment_method),
        }
    }

    /// Use the in-memory backend regardless of environment.
    pub fn ephemeral(mut self) -> Self {
        self.store_backend = StoreBackend::Memory;
        self
    }

    /// Plain-text password for the seeded administrator (hashed before it is stored).
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }
}
