// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::time::Duration;

// Re-export public types
pub use state::AppState;
pub use types::{AccessLogFormat, Config, LogLevel, LoggingConfig};

impl Config {
    /// Load configuration from specified file path (extension optional).
    ///
    /// Sources, lowest priority first: built-in defaults, the file (if it
    /// exists), then `BOOKS_`-prefixed environment variables using `__`
    /// between sections, e.g. `BOOKS_SERVER__PORT=4000`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.backlog", 128)?
            .set_default("storage.db_path", "db.json")?
            .set_default("storage.persist", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("http.server_name", "bookshelf/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("http.health_path", "/healthz")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("BOOKS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Upper bound for serving a single connection
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.performance
                .read_timeout
                .max(self.performance.write_timeout),
        )
    }
}
