//! User profiles and per-user totals.

use crate::error::LedgerError;
use serde::Serialize;
use sqlx::SqlitePool;

/// Public profile fields.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// Lifetime and current-month spending summary.
#[derive(Debug, Serialize)]
pub struct UserStats {
    pub total_expenses: i64,
    pub total_amount: f64,
    pub average_amount: f64,
    pub categories_used: i64,
    pub monthly_total: f64,
}

/// Profile storage over the shared pool.
#[derive(Clone)]
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: i64) -> Result<Profile, LedgerError> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, email, name, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LedgerError::UserNotFound)
    }

    /// Set the display name and return the refreshed profile.
    pub async fn update_name(&self, user_id: i64, name: &str) -> Result<Profile, LedgerError> {
        let result = sqlx::query(
            "UPDATE users SET name = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(name)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::UserNotFound);
        }
        self.get(user_id).await
    }

    /// Totals across all of the user's expenses plus the current-month sum.
    pub async fn stats(&self, user_id: i64) -> Result<UserStats, LedgerError> {
        let (total_expenses, total_amount, average_amount, categories_used): (i64, f64, f64, i64) =
            sqlx::query_as(
                "SELECT COUNT(*), \
                        COALESCE(SUM(amount), 0.0), \
                        COALESCE(AVG(amount), 0.0), \
                        COUNT(DISTINCT category) \
                 FROM expenses WHERE user_id = ?",
            )
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let monthly_total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0.0) \
             FROM expenses \
             WHERE user_id = ? AND date >= date('now', 'start of month')",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserStats {
            total_expenses,
            total_amount,
            average_amount,
            categories_used,
            monthly_total,
        })
    }
}
