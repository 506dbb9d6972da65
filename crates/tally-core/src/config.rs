use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TallyConfig {
    /// Operating mode. Gates whether raw magic links are echoed back in
    /// responses (never in production).
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    /// Whether issued magic links may be returned in the response payload.
    pub fn echo_links(self) -> bool {
        !self.is_production()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:3000"
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Path to the local SQLite file backing users, magic links and expenses.
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_sqlite_path() -> String {
    "data/tally.sqlite".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            sqlite_path: default_sqlite_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session credentials. For security: prefer setting
    /// env var `TALLY_SESSION_SECRET`. Rotating it invalidates every
    /// outstanding session.
    #[serde(default)]
    pub session_secret: String,

    /// Session credential lifetime in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,

    /// Base URL the magic-link token is appended to as a query parameter.
    #[serde(default = "default_verify_base_url")]
    pub verify_base_url: String,
}

fn default_session_ttl_hours() -> u64 {
    24
}

fn default_verify_base_url() -> String {
    "http://localhost:3000/api/auth/verify".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_ttl_hours: default_session_ttl_hours(),
            verify_base_url: default_verify_base_url(),
        }
    }
}

/// Load configuration from the TOML file (if present) and apply environment
/// overrides.
///
/// Override precedence (highest first):
/// - env `TALLY_ENV` for the operating mode
/// - env `TALLY_SESSION_SECRET` for the signing secret
/// - the config file
pub fn load_config() -> anyhow::Result<TallyConfig> {
    let path = config_path();
    let mut cfg: TallyConfig = if path.exists() {
        let raw = fs::read_to_string(&path)?;
        toml::from_str(&raw)?
    } else {
        TallyConfig::default()
    };

    if let Ok(mode) = env::var("TALLY_ENV") {
        cfg.environment = match mode.to_lowercase().as_str() {
            "production" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        };
    }

    if let Ok(secret) = env::var("TALLY_SESSION_SECRET") {
        if !secret.trim().is_empty() {
            cfg.auth.session_secret = secret;
        }
    }

    if cfg.environment.is_production() && cfg.auth.session_secret.trim().is_empty() {
        anyhow::bail!(
            "session secret is empty (set TALLY_SESSION_SECRET or config.toml [auth].session_secret)"
        );
    }

    // Development convenience only; production requires an explicit secret.
    if cfg.auth.session_secret.is_empty() {
        cfg.auth.session_secret = "tally-dev-secret".to_string();
    }

    Ok(cfg)
}

fn config_path() -> PathBuf {
    if let Ok(p) = env::var("TALLY_CONFIG") {
        return PathBuf::from(p);
    }
    PathBuf::from("config.toml")
}
