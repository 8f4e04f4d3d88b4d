// Server module entry
// Listener construction and the accept loop shared by both variants

pub mod connection;
pub mod listener;

// Re-export commonly used functions
pub use listener::create_listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::handler::Handler;
use crate::logger;

/// Accept connections until the process is terminated.
///
/// Accept errors are logged and the loop continues; there is no shutdown
/// path beyond killing the process.
pub async fn run<H: Handler>(listener: TcpListener, config: Arc<Config>, handler: H) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::accept_connection(
                    stream,
                    peer_addr,
                    &config,
                    &active_connections,
                    handler.clone(),
                );
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
