//! Logger module
//!
//! Provides logging utilities for the book service including:
//! - Leveled, timestamped server and error messages
//! - Access logging in `combined`, `common` or `json` format
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use chrono::Local;
use std::net::SocketAddr;

use crate::config::{AccessLogFormat, Config, LogLevel, LoggingConfig};

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.level,
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

/// Emit a leveled line. Before `init()` every level goes to stdout/stderr.
fn emit(level: LogLevel, message: &str) {
    let writer = writer::get();
    if writer.is_some_and(|w| !w.enabled(level)) {
        return;
    }

    let line = format!(
        "{} [{}] {message}",
        Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%z"),
        level.label()
    );
    let is_error = matches!(level, LogLevel::Error | LogLevel::Warn);
    match (writer, is_error) {
        (Some(w), true) => w.write_error(&line),
        (Some(w), false) => w.write_info(&line),
        (None, true) => eprintln!("{line}"),
        (None, false) => println!("{line}"),
    }
}

pub fn log_error(message: &str) {
    emit(LogLevel::Error, message);
}

pub fn log_warning(message: &str) {
    emit(LogLevel::Warn, message);
}

pub fn log_info(message: &str) {
    emit(LogLevel::Info, message);
}

pub fn log_debug(message: &str) {
    emit(LogLevel::Debug, message);
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: AccessLogFormat) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    log_info("======================================");
    log_info("Book service started successfully");
    log_info(&format!("Listening on: http://{addr}"));
    log_info(&format!("Database: {}", config.storage.db_path.display()));
    log_info(&format!(
        "Write-back: {}",
        if config.storage.persist { "enabled" } else { "disabled" }
    ));
    log_info(&format!("Log level: {}", config.logging.level.label()));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    log_info("  - GET    /books");
    log_info("  - POST   /books");
    log_info("  - PUT    /books/{id}");
    log_info("  - DELETE /books/{id}");
    log_info("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_shutdown(reason: &str) {
    log_info(&format!("[Shutdown] {reason}"));
}
