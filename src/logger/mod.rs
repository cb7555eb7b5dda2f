//! Logger module
//!
//! Logging utilities for both binaries:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Leveled warning/error logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::Level;

use crate::config::{LoggingConfig, ServerConfig};
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger from the logging settings
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
        Level::parse(&config.level),
    )
}

fn enabled(level: Level) -> bool {
    writer::get().map_or(Level::Info, writer::LogWriter::level) >= level
}

fn write_info(message: &str) {
    if !enabled(Level::Info) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, server: &ServerConfig, config: &LoggingConfig) {
    write_info(&format!(
        "Serving {} at http://{}:{}",
        server.root_dir.display(),
        server.host,
        server.port
    ));
    write_info(&format!(
        "Health endpoint: http://{}:{}/healthz",
        server.host, server.port
    ));
    log_debug(&format!("Bound listener on {addr}"));
    if let Some(ref path) = config.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
}

pub fn log_missing_index(root_dir: &Path, index_file: &str) {
    log_warning(&format!(
        "{index_file} not found in {}; directory listing will be served.",
        root_dir.display()
    ));
}

pub fn log_shutdown() {
    write_info("Shutting down...");
}

pub fn log_invocation(request_id: &str) {
    write_info(&format!("[Invocation] request_id={request_id}"));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(Level::Error, &format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(Level::Warn, &format!("[WARN] {message}"));
}

pub fn log_debug(message: &str) {
    if enabled(Level::Debug) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

/// Access lines are not subject to the level filter; `logging.access_log` controls them
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
