// Signal handling module
//
// Supported signals:
// - SIGINT:  Shutdown (Ctrl+C)
// - SIGTERM: Shutdown (container stop)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Register signal handlers and forward them to `shutdown`.
///
/// Must be called from within the runtime. Uses `notify_one`, so a signal
/// that arrives while the loop is busy serving a request is not lost.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => logger::log_debug("SIGINT received"),
            _ = sigterm.recv() => logger::log_debug("SIGTERM received"),
        }
        shutdown.notify_one();
    });

    Ok(())
}

/// Non-unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_debug("Ctrl+C received");
            shutdown.notify_one();
        }
    });

    Ok(())
}
