//! Error types for the auth crate.

use thiserror::Error;

/// Errors that can occur during magic-link and session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Redemption of a missing, already-used, or expired magic link.
    /// One variant for all three cases: callers must not be able to tell
    /// which one was hit.
    #[error("invalid or expired magic link")]
    InvalidOrExpiredToken,

    /// A session credential failed signature or expiry checks.
    #[error("invalid or expired session credential")]
    InvalidOrExpiredCredential,

    /// Failed to sign a session credential.
    #[error("failed to mint session credential: {0}")]
    MintFailed(String),

    /// Persistence failure.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}
