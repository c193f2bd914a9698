//! Service tests for webserver
//!
//! Each managed-service client is exercised against a local HTTP double,
//! asserting the documented paths, auth headers, payloads, and the mapping of
//! upstream status codes into the shared failure taxonomy.

pub mod mailer;
pub mod property_store;
