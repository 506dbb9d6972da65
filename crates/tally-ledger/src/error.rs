//! Error types for the ledger crate.

use thiserror::Error;

/// Errors that can occur reading or writing ledger data.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No expense with that id belongs to the caller.
    #[error("expense not found")]
    ExpenseNotFound,

    /// No user row for the authenticated id.
    #[error("user not found")]
    UserNotFound,

    /// Persistence failure.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}
