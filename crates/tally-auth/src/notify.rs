//! Delivery of magic links to their owner.
//!
//! The transport is injected so tests (and deployments without a mail
//! server) can substitute their own. Delivery failure is never fatal to
//! issuance: the issuer falls back to logging the link locally.

use async_trait::async_trait;
use thiserror::Error;

/// The notifier could not deliver the link.
#[derive(Debug, Error)]
#[error("notifier unavailable: {0}")]
pub struct NotifyError(pub String);

/// Dispatches sign-in links to users.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a sign-in link to the given address.
    async fn send_magic_link(&self, email: &str, link: &str) -> Result<(), NotifyError>;
}

/// Writes links to the local log instead of delivering them.
///
/// Default backend when no mail transport is configured, and the fallback
/// target when a configured transport fails.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_magic_link(&self, email: &str, link: &str) -> Result<(), NotifyError> {
        tracing::info!(%email, %link, "magic link (log delivery)");
        Ok(())
    }
}
