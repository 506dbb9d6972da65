//! Magic-link redemption.

use crate::error::AuthError;
use crate::session::SessionMinter;
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

/// Public fields of an authenticated user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// A successful redemption: the resolved user plus a minted session
/// credential.
#[derive(Debug, Serialize)]
pub struct Login {
    pub user: AuthenticatedUser,
    pub token: String,
}

/// Consumes single-use tokens and resolves their owner.
pub struct LinkRedeemer {
    pool: SqlitePool,
    minter: SessionMinter,
}

impl LinkRedeemer {
    pub fn new(pool: SqlitePool, minter: SessionMinter) -> Self {
        Self { pool, minter }
    }

    /// Redeem `token`, consuming it exactly once.
    ///
    /// The validity check and the used-flag flip are one conditional UPDATE:
    /// of two racing redemptions, only one can observe `used = FALSE`, so the
    /// other fails with [`AuthError::InvalidOrExpiredToken`].
    pub async fn redeem(&self, token: &str) -> Result<Login, AuthError> {
        let now = Utc::now().timestamp();

        let consumed: Option<(String,)> = sqlx::query_as(
            "UPDATE magic_links SET used = TRUE \
             WHERE token = ? AND used = FALSE AND expires_at > ? \
             RETURNING email",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        let Some((email,)) = consumed else {
            return Err(AuthError::InvalidOrExpiredToken);
        };

        let user = self.find_or_create_user(&email).await?;
        let token = self.minter.mint(user.id, &user.email)?;

        Ok(Login { user, token })
    }

    /// First successful redemption for a new address registers the user.
    async fn find_or_create_user(&self, email: &str) -> Result<AuthenticatedUser, AuthError> {
        sqlx::query("INSERT INTO users (email) VALUES (?) ON CONFLICT(email) DO NOTHING")
            .bind(email)
            .execute(&self.pool)
            .await?;

        let user = sqlx::query_as::<_, AuthenticatedUser>(
            "SELECT id, email, name FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
