//! Environment-backed service configuration
//!
//! Secrets for the managed services come from the environment (or an env
//! file loaded in main); everything else has a sensible default.

use std::env;

use tracing::info;

use crate::error::{WebServerError, WebServerResult};

/// Default number of scheduled retries for the property-store fetch
pub const DEFAULT_FETCH_RETRIES: u32 = 3;
/// Default base delay between fetch retries, in milliseconds
pub const DEFAULT_FETCH_BASE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Hosted Postgres REST endpoint, e.g. https://xyz.supabase.co
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub stripe_secret_key: String,
    pub resend_api_key: String,
    /// Sender address for transactional email
    pub from_email: String,
    /// Inbox notified about new inquiries
    pub concierge_email: String,
    /// Token expected in the admin session cookie
    pub admin_session_token: String,
    pub fetch_retries: u32,
    pub fetch_base_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> WebServerResult<Self> {
        Ok(Self {
            supabase_url: require("SUPABASE_URL")?,
            supabase_service_key: require("SUPABASE_SERVICE_KEY")?,
            stripe_secret_key: require("STRIPE_SECRET_KEY")?,
            resend_api_key: require("RESEND_API_KEY")?,
            from_email: optional("FROM_EMAIL", "stays@azureshore.rentals"),
            concierge_email: optional("CONCIERGE_EMAIL", "concierge@azureshore.rentals"),
            admin_session_token: require("ADMIN_SESSION_TOKEN")?,
            fetch_retries: parse_optional("FETCH_RETRIES", DEFAULT_FETCH_RETRIES)?,
            fetch_base_delay_ms: parse_optional(
                "FETCH_BASE_DELAY_MS",
                DEFAULT_FETCH_BASE_DELAY_MS,
            )?,
        })
    }
}

fn require(key: &str) -> WebServerResult<String> {
    env::var(key).map_err(|_| WebServerError::config(format!("{key} must be set")))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_optional<T>(key: &str, default: T) -> WebServerResult<T>
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| WebServerError::config(format!("Invalid {key} value: {raw}"))),
        Err(_) => Ok(default),
    }
}
