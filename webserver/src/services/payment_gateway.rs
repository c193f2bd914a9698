//! Payment processor client
//!
//! One call per booking intent: create a payment intent and hand the client
//! secret back to the frontend. The processor owns the rest of the intent
//! lifecycle.

use async_trait::async_trait;

use shared::UpstreamFailure;

use crate::traits::PaymentGateway;
use crate::types::{PaymentIntent, PaymentIntentRequest};

const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Real payment gateway backed by the Stripe HTTP API
pub struct RealPaymentGateway {
    base_url: String,
    secret_key: String,
    http: reqwest::Client,
}

impl RealPaymentGateway {
    pub fn new(secret_key: &str) -> Self {
        Self::with_base_url(secret_key, STRIPE_API_BASE)
    }

    /// Point the client at a different API root (test doubles).
    pub fn with_base_url(secret_key: &str, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RealPaymentGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, UpstreamFailure> {
        let params = [
            ("amount", request.amount_cents.to_string()),
            ("currency", request.currency.clone()),
            ("receipt_email", request.receipt_email.clone()),
            (
                "metadata[booking_reference]",
                request.booking_reference.clone(),
            ),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.base_url))
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .form(&params)
            .send()
            .await
            .map_err(|e| UpstreamFailure::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFailure::from_status(
                status.as_u16(),
                &status.to_string(),
            ));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| UpstreamFailure::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let id = response_json
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| {
                UpstreamFailure::InvalidResponse("No id in payment intent response".to_string())
            })?;

        let client_secret = response_json
            .get("client_secret")
            .and_then(|secret| secret.as_str())
            .ok_or_else(|| {
                UpstreamFailure::InvalidResponse(
                    "No client_secret in payment intent response".to_string(),
                )
            })?;

        Ok(PaymentIntent {
            id: id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }
}
