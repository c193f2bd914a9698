//! Azureshore webserver entry point
//!
//! Serves the public marketing/booking API and the admin back-office surface.
//! All persistent data lives in the managed services configured through the
//! environment.

use clap::Parser;
use shared::logging;
use std::net::SocketAddr;

use webserver::{
    services::{RealMailer, RealPaymentGateway, RealPropertyStore},
    Config, WebServer, WebServerError, WebServerResult,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Azureshore villa booking webserver")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Env file with the managed-service credentials
    #[arg(long)]
    env_file: Option<String>,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    if let Some(env_file) = &args.env_file {
        dotenvy::from_path(env_file)
            .map_err(|e| WebServerError::config(format!("Failed to load {env_file}: {e}")))?;
    } else {
        // A local .env is optional; production sets real environment variables
        let _ = dotenvy::dotenv();
    }

    logging::init_tracing(Some(&args.log_level));

    let config = Config::from_env()?;

    let bind_address: SocketAddr = format!("0.0.0.0:{}", args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid port: {e}")))?;

    // Initialize services with dependency injection
    let property_store =
        RealPropertyStore::new(&config.supabase_url, &config.supabase_service_key);
    let payment_gateway = RealPaymentGateway::new(&config.stripe_secret_key);
    let mailer = RealMailer::new(&config.resend_api_key, &config.from_email);

    let webserver = WebServer::new(config, property_store, payment_gateway, mailer);

    logging::log_startup(&format!("webserver on http://{bind_address}"));

    webserver.run(bind_address).await?;

    logging::log_success("WebServer stopped gracefully");
    Ok(())
}
