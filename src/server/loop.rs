// Server loop module
// Sequential accept-and-serve loop with signal-driven shutdown

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::serve_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections until `shutdown` is notified.
///
/// Each connection is served to completion before the next `accept`, so
/// requests are handled strictly in arrival order. A shutdown received while
/// a request is in flight takes effect once that request finishes. The
/// listener is closed before returning.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            biased;

            () = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        serve_connection(stream, peer_addr, &state).await;
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }
        }
    }

    drop(listener);
}
