//! SQLite bootstrap for the Tally store.
//!
//! Opens (creating if missing) the database file, applies the idempotent
//! schema, and hands back a pool. All other crates take the pool as a
//! constructor argument rather than reaching for process-wide state.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{fs, path::Path};

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Open (or create) the SQLite database at `sqlite_path` and ensure the
/// schema exists.
pub async fn connect(sqlite_path: &str) -> anyhow::Result<SqlitePool> {
    ensure_parent_dir(sqlite_path)?;

    let options = SqliteConnectOptions::new()
        .filename(sqlite_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    ensure_schema(&pool).await?;
    tracing::debug!(path = sqlite_path, "sqlite store ready");
    Ok(pool)
}

/// In-memory database for tests.
///
/// Capped at a single connection: every pooled connection to `:memory:`
/// would otherwise open its own empty database.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Apply the schema. Safe to run repeatedly.
pub async fn ensure_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

fn ensure_parent_dir(file_path: &str) -> anyhow::Result<()> {
    let p = Path::new(file_path);
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
