//! Shared logging utilities for consistent tracing across the backend

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Initialize the tracing subscriber for the service.
///
/// The filter keeps our crates at the requested level while capping the noisy
/// HTTP dependencies at warn.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let base_level = log_level.unwrap_or("info");
    let filter = format!(
        "webserver={base_level},shared={base_level},tower=warn,hyper=warn,reqwest=warn"
    );

    fmt()
        .with_env_filter(EnvFilter::new(&filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(timestamp = format_timestamp(), "🚀 Starting {}", details);
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(reason: &str) {
    info!(timestamp = format_timestamp(), "🛑 Shutting down: {}", reason);
}

/// Contextual logging helper for error conditions
pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    error!(
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(message: &str) {
    info!(timestamp = format_timestamp(), "✅ {}", message);
}
