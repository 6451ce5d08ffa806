//! Shared domain types and environment configuration for postlens.

pub mod app_config;
pub mod config;
pub mod posts;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{MediaType, Post, ProfileIdentity, RawPost, Theme};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
