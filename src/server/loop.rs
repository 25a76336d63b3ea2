// Server loop module
// Accepts connections until shutdown, then waits for in-flight ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept loop for the book service.
///
/// Runs until `shutdown` is notified, closes the listener, then gives
/// active connections up to the connection timeout to finish.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run_server(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                logger::log_shutdown("Stopped accepting connections");
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&active_connections, state.config.connection_timeout()).await;
    Ok(())
}

/// Wait until every connection task has finished or `timeout` elapses.
async fn drain_connections(active: &AtomicUsize, timeout: Duration) {
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let remaining = active.load(Ordering::SeqCst);
        if remaining == 0 {
            logger::log_shutdown("All connections closed");
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutting down with {remaining} connections still open"
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
