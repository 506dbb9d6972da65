//! Session credential minting and verification.
//!
//! A session credential is a stateless HS256 JWT signed with a process-wide
//! secret loaded once at startup. There is no revocation list; rotating the
//! secret invalidates every outstanding credential.

use crate::error::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by a session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id the session is bound to.
    pub sub: i64,
    /// Email address at mint time.
    pub email: String,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// Mints bounded-lifetime session credentials for authenticated users.
#[derive(Clone)]
pub struct SessionMinter {
    encoding: EncodingKey,
    ttl: Duration,
}

impl SessionMinter {
    /// Create a minter with the given signing secret and lifetime.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Sign a credential asserting `user_id`/`email` until the configured
    /// lifetime elapses.
    pub fn mint(&self, user_id: i64, email: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::MintFailed(e.to_string()))
    }
}

/// Verifies presented session credentials.
///
/// Pure function of the credential and the signing secret; no store lookup.
#[derive(Clone)]
pub struct SessionVerifier {
    decoding: DecodingKey,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Validate signature and expiry, returning the embedded claims.
    pub fn verify(&self, credential: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<SessionClaims>(credential, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidOrExpiredCredential)
    }
}
