//! Board configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Empty strings are treated as unset, so `S3_BUCKET=""`
//! disables object storage and `CDN_DOMAIN=""` falls back to presigned
//! view URLs.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default maximum upload size: 20 MiB.
pub const DEFAULT_UPLOAD_MAX_BYTES: u64 = 20 * 1024 * 1024;

/// Top-level board configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// Directory holding the front-end bundle served at `/`.
    pub web_dir: PathBuf,

    /// Relational store settings.
    pub database: DatabaseConfig,

    /// Object storage settings.
    pub storage: StorageConfig,

    /// Public CDN hostname serving bucket objects, if any.
    pub cdn_domain: Option<String>,

    /// Lifetime in seconds of presigned view URLs.
    pub view_expires_in: u64,

    /// Lifetime in seconds of presigned upload policies.
    pub presign_expires_in: u64,

    /// Largest accepted upload in bytes.
    pub upload_max_bytes: u64,
}

/// MySQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password (may be empty).
    pub password: String,
    /// Schema name.
    pub name: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// Seconds to wait for a free connection before failing the request.
    pub acquire_timeout_secs: u64,
}

/// S3-compatible object storage settings.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Bucket name. `None` means object storage is not configured.
    pub bucket: Option<String>,
    /// Signing region. `None` falls back to `us-east-1`.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (path-style addressing).
    pub endpoint: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the documented defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()?;

        let web_dir = PathBuf::from(env_or("WEB_DIR", "web"));

        let database = DatabaseConfig {
            host: env_or("DB_HOST", "127.0.0.1"),
            port: parse_env("DB_PORT", 3306),
            user: env_or("DB_USER", "root"),
            password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            name: env_or("DB_NAME", "anon_board"),
            pool_size: parse_env("DB_POOL_SIZE", 5),
            acquire_timeout_secs: parse_env("DB_ACQUIRE_TIMEOUT_SECS", 30),
        };

        let storage = StorageConfig {
            bucket: env_opt("S3_BUCKET"),
            region: env_opt("AWS_REGION"),
            endpoint: env_opt("S3_ENDPOINT"),
        };

        Ok(Self {
            listen_addr,
            web_dir,
            database,
            storage,
            cdn_domain: env_opt("CDN_DOMAIN"),
            view_expires_in: parse_env("VIEW_EXPIRES_IN", 3600),
            presign_expires_in: parse_env("PRESIGN_EXPIRES_IN", 60),
            upload_max_bytes: parse_env("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES),
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Returns the trimmed value of `key`, or `None` when it is missing or blank.
fn env_opt(key: &str) -> Option<String> {
    non_blank(std::env::var(key).ok())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
