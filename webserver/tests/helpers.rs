//! Test helper utilities for webserver integration tests

use webserver::traits::{MockMailer, MockPaymentGateway, MockPropertyStore};
use webserver::{Config, WebServer};

/// Config with throwaway credentials; integration tests inject mocks so
/// nothing here is ever dialed.
pub fn test_config() -> Config {
    Config {
        supabase_url: "http://127.0.0.1:9".to_string(),
        supabase_service_key: "test-service-key".to_string(),
        stripe_secret_key: "sk_test_key".to_string(),
        resend_api_key: "re_test_key".to_string(),
        from_email: "stays@azureshore.test".to_string(),
        concierge_email: "concierge@azureshore.test".to_string(),
        admin_session_token: "test-admin-token".to_string(),
        fetch_retries: 3,
        fetch_base_delay_ms: 1,
    }
}

/// Webserver wired to mock services
pub fn build_webserver(
    store: MockPropertyStore,
    gateway: MockPaymentGateway,
    mailer: MockMailer,
) -> WebServer<MockPropertyStore, MockPaymentGateway, MockMailer> {
    WebServer::new(test_config(), store, gateway, mailer)
}
