//! Core domain records exchanged with the hosted store
//!
//! Property rows come from a scraping pipeline, so every descriptive field is
//! optional and consumers substitute defaults at the edge.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Raw property row as stored in the hosted database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Opaque identifier assigned by the scraping pipeline
    pub id: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub guests: Option<u32>,
    pub max_guests: Option<u32>,
    pub rating: Option<f64>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

impl Property {
    /// First displayable image URL, if any. A present-but-empty first entry
    /// does not count.
    pub fn first_image(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(|urls| urls.first())
            .map(|url| url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// Lifecycle of a booking row. The payment processor owns the actual payment
/// state; this only tracks what the back-office sees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Booking record inserted when a guest starts the payment flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Store-assigned row id; absent until the insert round-trips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reference: String,
    pub property_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub amount_cents: i64,
    pub currency: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// CRM customer record, upserted on every inquiry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Marketing attribution, e.g. "inquiry-form" or "newsletter"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Newsletter signup row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

/// Marketing/CRM analytics event, appended to the store's event table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(event_type: &str, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.to_string(),
            payload,
            created_at: Utc::now(),
        }
    }
}
