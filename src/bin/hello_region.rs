//! Region-aware greeting server.
//!
//! Serves `GET /` with a JSON greeting carrying the configured deployment
//! region; every other route gets a JSON 404.

use std::sync::Arc;

use hello_service::config::Config;
use hello_service::handler::RegionHandler;
use hello_service::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_from("config")?;
    logger::init(&config)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = config.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &config, true);

    server::run(listener, Arc::new(config), RegionHandler).await;
    Ok(())
}
