use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod store;

const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;

    // Worker thread count comes from config; default is one per CPU core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_info(&format!("Using {workers} worker threads"));
    } else {
        logger::log_info("Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    // The collection must load before anything is served
    let books = store::load_books(&cfg.storage.db_path).map_err(|e| {
        logger::log_error(&format!("Failed to load books: {e}"));
        e
    })?;

    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr, cfg.server.backlog).map_err(|e| {
        logger::log_error(&format!("Failed to bind {addr}: {e}"));
        e
    })?;

    let state = Arc::new(config::AppState::new(cfg, books));
    logger::log_server_start(&addr, &state.config);

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    server::run_server(listener, state, Arc::clone(&signals.shutdown)).await
}
