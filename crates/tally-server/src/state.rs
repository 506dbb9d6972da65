//! Shared application state.

use sqlx::SqlitePool;
use std::sync::Arc;
use tally_auth::{LinkIssuer, LinkRedeemer, LogNotifier, Notifier, SessionMinter, SessionVerifier};
use tally_core::{Environment, TallyConfig};
use tally_ledger::{ExpenseStore, ProfileStore};

/// Shared application state.
///
/// Every component is constructed once at startup from the loaded config;
/// the state is cloned per request via the inner `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    environment: Environment,
    issuer: LinkIssuer,
    redeemer: LinkRedeemer,
    verifier: SessionVerifier,
    expenses: ExpenseStore,
    profiles: ProfileStore,
}

impl AppState {
    /// Open the configured SQLite store and assemble the state.
    pub async fn init(cfg: &TallyConfig) -> anyhow::Result<Self> {
        let pool = tally_store::connect(&cfg.server.sqlite_path).await?;
        Ok(Self::from_pool(pool, cfg))
    }

    /// Assemble state over an existing pool (tests use in-memory SQLite).
    pub fn from_pool(pool: SqlitePool, cfg: &TallyConfig) -> Self {
        Self::with_notifier(pool, cfg, Arc::new(LogNotifier))
    }

    /// Assemble state with an injected link notifier.
    pub fn with_notifier(
        pool: SqlitePool,
        cfg: &TallyConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let minter = SessionMinter::new(
            &cfg.auth.session_secret,
            chrono::Duration::hours(cfg.auth.session_ttl_hours as i64),
        );
        let verifier = SessionVerifier::new(&cfg.auth.session_secret);
        let issuer = LinkIssuer::new(
            pool.clone(),
            notifier,
            cfg.auth.verify_base_url.clone(),
            cfg.environment.echo_links(),
        );
        let redeemer = LinkRedeemer::new(pool.clone(), minter);

        Self {
            inner: Arc::new(AppStateInner {
                environment: cfg.environment,
                issuer,
                redeemer,
                verifier,
                expenses: ExpenseStore::new(pool.clone()),
                profiles: ProfileStore::new(pool),
            }),
        }
    }

    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    pub fn issuer(&self) -> &LinkIssuer {
        &self.inner.issuer
    }

    pub fn redeemer(&self) -> &LinkRedeemer {
        &self.inner.redeemer
    }

    pub fn verifier(&self) -> &SessionVerifier {
        &self.inner.verifier
    }

    pub fn expenses(&self) -> &ExpenseStore {
        &self.inner.expenses
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.inner.profiles
    }
}
