// Configuration types module
// Defines the ambient settings loaded from serve.toml and SERVE__* env vars

use serde::{Deserialize, Serialize};

/// Ambient settings (everything except host/port/dir)
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level written: error, warn, info or debug
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit one access line per request
    #[serde(default = "default_access_log")]
    pub access_log: bool,
    /// Access log format (common, combined, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_level() -> String {
    "info".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            access_log: default_access_log(),
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    /// Value of the `Server` response header
    #[serde(default = "default_server_name")]
    pub server_name: String,
    /// Files served in place of a directory listing, first match wins
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
}

fn default_server_name() -> String {
    format!("siteserve/{}", env!("CARGO_PKG_VERSION"))
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            index_files: default_index_files(),
        }
    }
}
