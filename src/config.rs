use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

use crate::error::{BookingError, Result};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres { database_url: String, max_connections: u32 },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| BookingError::Config(format!("BIND_ADDR: {}", e)))?;

        let database_url = get("DATABASE_URL").filter(|url| !url.is_empty());
        let default_backend = if database_url.is_some() { "postgres" } else { "memory" };
        let backend = get("BOOKING_STORE").unwrap_or_else(|| default_backend.to_string());

        let store = match backend.as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => {
                let database_url = database_url.ok_or_else(|| {
                    BookingError::Config("DATABASE_URL not set".to_string())
                })?;
                let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
                    Some(raw) => raw.parse::<u32>().map_err(|e| {
                        BookingError::Config(format!("DATABASE_MAX_CONNECTIONS: {}", e))
                    })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                StoreBackend::Postgres { database_url, max_connections }
            }
            other => {
                return Err(BookingError::Config(format!(
                    "unknown BOOKING_STORE {:?}, expected \"memory\" or \"postgres\"",
                    other
                )))
            }
        };

        Ok(AppConfig { bind_addr, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_memory_store() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config =
            AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/rooms")]))
                .unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/rooms".to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            }
        );
    }

    #[test]
    fn test_explicit_memory_wins_over_database_url() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/rooms"),
            ("BOOKING_STORE", "memory"),
        ]))
        .unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn test_postgres_without_url_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("BOOKING_STORE", "postgres")])).unwrap_err();
        assert!(matches!(err, BookingError::Config(_)));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("BOOKING_STORE", "redis")])).unwrap_err();
        assert!(err.to_string().contains("redis"));
    }

    #[test]
    fn test_bad_bind_addr_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("BIND_ADDR", "not an addr")])).unwrap_err();
        assert!(matches!(err, BookingError::Config(_)));
    }
}
