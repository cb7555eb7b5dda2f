//! Error types for startup and argument parsing

use std::net::SocketAddr;

use thiserror::Error;

/// Command-line parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("unrecognized argument: {0}")]
    UnknownArgument(String),

    #[error("missing value for {0}")]
    MissingValue(&'static str),
}

/// Fatal errors raised before the serve loop starts
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("failed to open log files: {0}")]
    Logger(#[source] std::io::Error),

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("invalid port '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("cannot resolve bind address {host}:{port}: {source}")]
    InvalidAddress {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("startup I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}
