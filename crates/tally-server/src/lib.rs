//! HTTP surface for the Tally expense API.
//!
//! Thin wiring over `tally-auth` and `tally-ledger`: route table, session
//! middleware, request validation and the JSON response envelope.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;
