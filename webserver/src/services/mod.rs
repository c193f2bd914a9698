//! Service implementations
//!
//! Real clients for the three managed services behind the webserver's traits.

pub mod mailer;
pub mod payment_gateway;
pub mod property_store;

#[cfg(test)]
pub mod tests;

// Re-export service implementations
pub use mailer::RealMailer;
pub use payment_gateway::RealPaymentGateway;
pub use property_store::RealPropertyStore;
