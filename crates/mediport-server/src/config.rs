//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Busy timeout applied to every pooled connection, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,

    /// How long a request waits for a free connection, in milliseconds.
    #[serde(default = "default_checkout_timeout_ms")]
    pub checkout_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "mediport_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8111
}

fn default_db_path() -> String {
    "mediport.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_pool_max_size() -> u32 {
    8
}

fn default_checkout_timeout_ms() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
            checkout_timeout_ms: default_checkout_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `MEDIPORT_HOST` overrides `server.host`
/// - `MEDIPORT_PORT` overrides `server.port`
/// - `MEDIPORT_DB_PATH` overrides `database.path`
/// - `MEDIPORT_LOG_LEVEL` overrides `logging.level`
/// - `MEDIPORT_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("MEDIPORT_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("MEDIPORT_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(db_path) = std::env::var("MEDIPORT_DB_PATH") {
        config.database.path = db_path;
    }
    if let Ok(level) = std::env::var("MEDIPORT_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("MEDIPORT_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classroom_setup() {
        let config = Config::default();
        assert_eq!(config.server.port, 8111);
        assert_eq!(config.database.path, "mediport.db");
        assert_eq!(config.database.pool_max_size, 8);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    // All MEDIPORT_* branches live in one test because env vars are
    // process-global; the other tests in this module never read them.
    #[test]
    fn env_overrides_apply_and_malformed_values_fall_back() {
        let vars = [
            "MEDIPORT_HOST",
            "MEDIPORT_PORT",
            "MEDIPORT_DB_PATH",
            "MEDIPORT_LOG_LEVEL",
            "MEDIPORT_LOG_JSON",
        ];

        std::env::set_var("MEDIPORT_HOST", "10.1.2.3");
        std::env::set_var("MEDIPORT_PORT", "9999");
        std::env::set_var("MEDIPORT_DB_PATH", "/tmp/override.db");
        std::env::set_var("MEDIPORT_LOG_LEVEL", "debug");
        std::env::set_var("MEDIPORT_LOG_JSON", "1");

        let config = load_config(None).expect("config should load");
        assert_eq!(config.server.host.to_string(), "10.1.2.3");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.database.path, "/tmp/override.db");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);

        // Unparseable host/port are ignored; the defaults stay in place.
        std::env::set_var("MEDIPORT_HOST", "not-an-ip");
        std::env::set_var("MEDIPORT_PORT", "not-a-port");
        std::env::set_var("MEDIPORT_LOG_JSON", "yes");

        let config = load_config(None).expect("config should load");
        assert_eq!(config.server.host, default_host());
        assert_eq!(config.server.port, default_port());
        assert!(!config.logging.json, "only \"true\" and \"1\" enable json");

        for var in vars {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [database]
            path = ":memory:"
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.path, ":memory:");
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.logging.level, "info");
    }
}
