//! Transactional mail client and message formatting
//!
//! Delivery is the provider's concern; this module builds the two
//! transactional messages and POSTs them to the provider's API.

use async_trait::async_trait;

use shared::{Booking, UpstreamFailure};

use crate::core::booking::nights;
use crate::traits::Mailer;
use crate::types::{EmailMessage, InquiryPayload};

const RESEND_API_BASE: &str = "https://api.resend.com";

/// Real mailer backed by the Resend HTTP API
pub struct RealMailer {
    base_url: String,
    api_key: String,
    from: String,
    http: reqwest::Client,
}

impl RealMailer {
    pub fn new(api_key: &str, from: &str) -> Self {
        Self::with_base_url(api_key, from, RESEND_API_BASE)
    }

    /// Point the client at a different API root (test doubles).
    pub fn with_base_url(api_key: &str, from: &str, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for RealMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), UpstreamFailure> {
        let request_body = serde_json::json!({
            "from": self.from,
            "to": [message.to],
            "subject": message.subject,
            "html": message.html,
        });

        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
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
        Ok(())
    }
}

/// Confirmation sent to the guest once their booking request is recorded.
pub fn booking_confirmation(booking: &Booking, villa_name: &str) -> EmailMessage {
    let stay_nights = nights(booking.check_in, booking.check_out);
    let total = booking.amount_cents as f64 / 100.0;

    let html = format!(
        "<h2>Thank you, {guest}!</h2>\
         <p>We received your booking request for <strong>{villa}</strong>.</p>\
         <p>Reference: <strong>{reference}</strong></p>\
         <p>{check_in} &rarr; {check_out} ({stay_nights} nights, {guests} guests)</p>\
         <p>Total: ${total:.2} {currency}</p>\
         <p>Our concierge team will confirm availability within 24 hours.</p>",
        guest = booking.guest_name,
        villa = villa_name,
        reference = booking.reference,
        check_in = booking.check_in.format("%B %e, %Y"),
        check_out = booking.check_out.format("%B %e, %Y"),
        guests = booking.guests,
        currency = booking.currency.to_uppercase(),
    );

    EmailMessage {
        to: booking.guest_email.clone(),
        subject: format!("Your Azureshore booking request {}", booking.reference),
        html,
    }
}

/// Notification sent to the concierge inbox for every inquiry.
pub fn inquiry_notification(inquiry: &InquiryPayload, concierge_email: &str) -> EmailMessage {
    let phone = inquiry.phone.as_deref().unwrap_or("not provided");
    let property = inquiry.property_id.as_deref().unwrap_or("general inquiry");

    let html = format!(
        "<h2>New inquiry</h2>\
         <p><strong>{name}</strong> &lt;{email}&gt; (phone: {phone})</p>\
         <p>Property: {property}</p>\
         <blockquote>{message}</blockquote>",
        name = inquiry.name,
        email = inquiry.email,
        message = inquiry.message,
    );

    EmailMessage {
        to: concierge_email.to_string(),
        subject: format!("New inquiry from {}", inquiry.name),
        html,
    }
}
