//! Webserver library for the Azureshore villa-rental backend
//!
//! This library provides the marketing and booking API: property listings,
//! the daily-rotating featured selection, inquiries, newsletter signups,
//! payment-intent creation, and the admin back-office surface.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod webserver_impl;

// Re-export main types
pub use config::Config;
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::{Mailer, PaymentGateway, PropertyStore};

// Re-export service implementations
pub use services::{RealMailer, RealPaymentGateway, RealPropertyStore};
