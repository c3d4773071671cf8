// JWT credential service
// Decision: Use HS256 algorithm for simplicity (symmetric key)
// Decision: No leeway on expiry; a credential is dead the second its window closes
// Decision: Verification returns a verdict instead of an error so callers map each case explicitly

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tutor_booking_core::IdentityClaim;

use super::config::JwtConfig;

/// Claims carried by a session credential
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CredentialClaims {
    /// Identity presented at login, embedded verbatim
    #[serde(flatten)]
    pub identity: IdentityClaim,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Outcome of verifying a credential
#[derive(Debug, Clone, PartialEq)]
pub enum TokenVerdict {
    /// Signature and expiry check out
    Valid(IdentityClaim),
    /// Correctly signed but past its expiry
    Expired,
    /// Malformed, unsigned, or signed with another key
    Invalid,
}

/// JWT service for credential issuance and verification
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a credential for `identity`, valid from now
    pub fn issue(&self, identity: &IdentityClaim) -> Result<String> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a credential as if it had been minted at `issued_at`
    pub fn issue_at(&self, identity: &IdentityClaim, issued_at: DateTime<Utc>) -> Result<String> {
        let lifetime = Duration::from_std(self.config.token_lifetime)
            .context("Credential lifetime out of range")?;
        let exp = issued_at
            .checked_add_signed(lifetime)
            .context("Credential expiry overflows the timestamp range")?;

        let claims = CredentialClaims {
            identity: identity.clone(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to encode session credential")
    }

    /// Verify a credential's signature and expiry
    pub fn verify(&self, token: &str) -> TokenVerdict {
        match decode::<CredentialClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => TokenVerdict::Valid(data.claims.identity),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => TokenVerdict::Expired,
            Err(e) => {
                tracing::debug!("Credential rejected: {}", e);
                TokenVerdict::Invalid
            }
        }
    }

    /// Get credential lifetime in seconds
    pub fn token_lifetime_secs(&self) -> i64 {
        i64::try_from(self.config.token_lifetime.as_secs()).unwrap_or(i64::MAX)
    }
}
