// Configuration types shared across all Tally crates
pub mod config;

pub use config::{AuthConfig, Environment, ServerConfig, TallyConfig, load_config};
