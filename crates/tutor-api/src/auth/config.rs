// Authentication configuration loaded from environment variables.
// Decision: JWT_SECRET is mandatory; there is no insecure fallback secret
// Decision: Credentials live for 7 days unless JWT_TOKEN_LIFETIME overrides it

use std::time::Duration;

use crate::config::ConfigError;

/// Default credential validity window (7 days)
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Longest accepted credential lifetime (10 years)
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Name of the session cookie carrying the credential
pub const SESSION_COOKIE_NAME: &str = "token";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs
    pub secret: String,
    /// Credential lifetime
    pub token_lifetime: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,
    /// Only send the cookie over HTTPS
    pub secure: bool,
}

impl CookieConfig {
    pub fn new(secure: bool) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            secure,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Session cookie configuration
    pub cookie: CookieConfig,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, production: bool) -> Self {
        Self {
            jwt: JwtConfig::new(secret),
            cookie: CookieConfig::new(production),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env(production: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), production)
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F, production: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_lifetime = match lookup("JWT_TOKEN_LIFETIME") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 && secs <= MAX_TOKEN_LIFETIME.as_secs() => {
                    Duration::from_secs(secs)
                }
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "JWT_TOKEN_LIFETIME",
                        value,
                    })
                }
            },
            None => DEFAULT_TOKEN_LIFETIME,
        };

        Ok(Self {
            jwt: JwtConfig {
                secret,
                token_lifetime,
            },
            cookie: CookieConfig::new(production),
        })
    }
}
