//! Request/response types for the public and admin API
//!
//! These are webserver-internal shapes; the records exchanged with the hosted
//! store live in the shared crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Featured villa as rendered on the landing page. Every field is concrete:
/// missing source data is replaced by defaults during selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeaturedVilla {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub guests: u32,
    /// First image URL only; the detail page loads the rest
    pub image: String,
    pub rating: f64,
}

/// Payload for starting a booking + payment intent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingPayload {
    pub property_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub amount_cents: i64,
    pub currency: Option<String>,
}

/// Contact/inquiry form payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InquiryPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub property_id: Option<String>,
}

/// Newsletter signup payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewsletterPayload {
    pub email: String,
}

/// Pagination query parameters for listing endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Request forwarded to the payment processor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    pub amount_cents: i64,
    pub currency: String,
    pub booking_reference: String,
    pub receipt_email: String,
}

/// Subset of the processor's intent response the frontend needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Transactional email ready to hand to the mail provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}
