// Authentication module
// Token issuance (/jwt, /logout), cookie envelope, and the access guard extractor

pub mod config;
pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::{AuthConfig, CookieConfig, JwtConfig};
pub use jwt::{JwtService, TokenVerdict};
pub use middleware::{AuthError, AuthState, AuthUser, FromRef};
pub use routes::routes;
