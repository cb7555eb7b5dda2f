// Server module entry point
// Startup checks, listener creation, the serve loop and signal handling

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

use std::path::Path;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::logger;

/// Index file whose absence is reported at startup
pub const CONVENTIONAL_INDEX: &str = "index.html";

/// Warn when `root` has no `index.html`. Serving still goes ahead; `/` will
/// get a directory listing. Returns whether the warning was emitted.
pub fn warn_if_missing_index(root: &Path) -> bool {
    if root.join(CONVENTIONAL_INDEX).exists() {
        return false;
    }
    logger::log_missing_index(root, CONVENTIONAL_INDEX);
    true
}

/// Resolve the configured address and bind it. Any failure is fatal.
pub fn bind(config: &ServerConfig) -> Result<TcpListener, StartupError> {
    let addr = config.socket_addr()?;
    create_listener(addr).map_err(|source| StartupError::Bind { addr, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_index_warns() {
        let dir = tempfile::tempdir().unwrap();
        assert!(warn_if_missing_index(dir.path()));

        std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
        assert!(!warn_if_missing_index(dir.path()));
    }

    #[tokio::test]
    async fn test_bind_reports_address_in_use() {
        let first = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let port = first.local_addr().unwrap().port();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            root_dir: ".".into(),
        };

        let err = bind(&config).unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
    }
}
