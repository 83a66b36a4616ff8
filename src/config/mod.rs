//! Configuration module for the showcase backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The fallback admin token. Fine for local development, unsafe anywhere else.
pub const DEFAULT_ADMIN_TOKEN: &str = "op123";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared admin bearer token for destructive operations
    pub admin_token: String,
    /// Path to the JSON document holding all works
    pub data_path: PathBuf,
    /// Directory where uploaded image bytes are stored
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_token =
            env::var("SHOWCASE_ADMIN_TOKEN").unwrap_or_else(|_| DEFAULT_ADMIN_TOKEN.to_string());

        let data_path = env::var("SHOWCASE_DATA_PATH")
            .unwrap_or_else(|_| "./data/works.json".to_string())
            .into();

        let upload_dir = env::var("SHOWCASE_UPLOAD_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let bind_addr = env::var("SHOWCASE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .expect("Invalid SHOWCASE_BIND_ADDR format");

        let log_level = env::var("SHOWCASE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            admin_token,
            data_path,
            upload_dir,
            bind_addr,
            log_level,
        }
    }

    /// Whether the admin token was left at its well-known default.
    pub fn uses_default_admin_token(&self) -> bool {
        self.admin_token == DEFAULT_ADMIN_TOKEN
    }
}
