// Server configuration loaded from environment variables.
// Decision: Missing optional settings fall back to local-development defaults
// Decision: Lookups go through a closure so parsing is testable without touching process env

use thiserror::Error;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default browser origin allowed to call the API with credentials
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default size of the PostgreSQL connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Configuration errors are fatal at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable required")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on (`PORT`)
    pub port: u16,
    /// Origins allowed for credentialed cross-origin calls (`CORS_ALLOWED_ORIGINS`)
    pub cors_origins: Vec<String>,
    /// PostgreSQL URL; in-memory storage is used when unset (`DATABASE_URL`)
    pub database_url: Option<String>,
    /// Connection pool size (`DATABASE_MAX_CONNECTIONS`)
    pub database_max_connections: u32,
    /// Production flag (`APP_ENV=production`, falling back to `NODE_ENV`)
    pub production: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            database_url: None,
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            production: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let cors_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(value) => match value.trim().parse() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let production = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .map(|env| env.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            port,
            cors_origins,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            production,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert!(!config.production);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("DATABASE_URL", "postgres://localhost/tutors"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("APP_ENV", "Production"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/tutors")
        );
        assert_eq!(config.database_max_connections, 4);
        assert!(config.production);
    }

    #[test]
    fn test_node_env_fallback() {
        let config = ServerConfig::from_lookup(lookup(&[("NODE_ENV", "production")])).unwrap();
        assert!(config.production);

        let config = ServerConfig::from_lookup(lookup(&[
            ("APP_ENV", "development"),
            ("NODE_ENV", "production"),
        ]))
        .unwrap();
        assert!(!config.production, "APP_ENV takes precedence");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        assert!(ServerConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "0")])).is_err());
    }
}
