//! Magic-link issuance.

use crate::error::AuthError;
use crate::notify::Notifier;
use base64::Engine;
use chrono::Utc;
use rand::RngCore;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Magic links expire 15 minutes after issuance.
pub const LINK_TTL_SECONDS: i64 = 15 * 60;

/// Result of issuing a magic link.
#[derive(Debug)]
pub struct IssuedLink {
    /// The raw single-use token value.
    pub token: String,
    /// Deep link embedding the token as a query parameter.
    pub link: String,
    /// Raw link for the response payload; `None` in production.
    pub echo: Option<String>,
}

/// Issues single-use sign-in links.
pub struct LinkIssuer {
    pool: SqlitePool,
    notifier: Arc<dyn Notifier>,
    verify_base_url: String,
    echo_links: bool,
}

impl LinkIssuer {
    pub fn new(
        pool: SqlitePool,
        notifier: Arc<dyn Notifier>,
        verify_base_url: impl Into<String>,
        echo_links: bool,
    ) -> Self {
        Self {
            pool,
            notifier,
            verify_base_url: verify_base_url.into(),
            echo_links,
        }
    }

    /// Issue a fresh single-use token for `email` and dispatch the link.
    ///
    /// Earlier unused tokens for the same address stay valid; each issuance
    /// is an independent row. The caller is responsible for having validated
    /// the address syntax.
    pub async fn issue(&self, email: &str) -> Result<IssuedLink, AuthError> {
        let token = generate_token();
        let expires_at = Utc::now().timestamp() + LINK_TTL_SECONDS;

        sqlx::query("INSERT INTO magic_links (email, token, expires_at) VALUES (?, ?, ?)")
            .bind(email)
            .bind(&token)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        let link = format!(
            "{}?token={}",
            self.verify_base_url,
            urlencoding::encode(&token)
        );

        // Delivery failure is non-fatal: the link lands in the local log and
        // the request still succeeds.
        if let Err(e) = self.notifier.send_magic_link(email, &link).await {
            tracing::warn!(%email, error = %e, "link delivery failed, logging instead");
            tracing::info!(%email, %link, "magic link (delivery fallback)");
        }

        let echo = self.echo_links.then(|| link.clone());

        Ok(IssuedLink { token, link, echo })
    }
}

/// 32 bytes from the CSPRNG, URL-safe base64 (256 bits of entropy).
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
