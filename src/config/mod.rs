// Configuration module entry point
// Resolves the server options (host, port, dir) and loads ambient settings

mod cli;
mod resolve;
mod state;
mod types;

pub use cli::{CliArgs, USAGE};
pub use resolve::{resolve, ServeOption, ServerConfig};
pub use state::AppState;
pub use types::{HttpConfig, LoggingConfig, Settings};

/// Settings file looked up when `--config` is not given (extension optional)
pub const DEFAULT_SETTINGS_FILE: &str = "serve";

impl Settings {
    /// Load settings from the given file path (extension optional), then
    /// `SERVE__SECTION__KEY` environment variables. A missing file is not an error.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("http.server_name", HttpConfig::default().server_name)?
            .set_default("http.index_files", HttpConfig::default().index_files)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
