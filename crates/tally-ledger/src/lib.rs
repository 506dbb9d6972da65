//! # tally-ledger
//!
//! Per-user expense records and profiles over the shared SQLite pool:
//! CRUD, filtered/paginated listing, and aggregate statistics. Every query
//! is scoped by the owning user id; ownership is part of the WHERE clause,
//! never checked after the fact.

pub mod error;
pub mod expense;
pub mod profile;

pub use error::LedgerError;
pub use expense::{
    CategoryTotal, DailyTotal, Expense, ExpenseQuery, ExpenseStats, ExpenseStore, NewExpense, Page,
    Pagination,
};
pub use profile::{Profile, ProfileStore, UserStats};
