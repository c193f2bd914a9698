//! Service trait definitions for dependency injection
//!
//! All calls to the managed services are abstracted through these traits for
//! testability.

use async_trait::async_trait;

use shared::{
    AnalyticsEvent, Booking, Customer, NewsletterSubscriber, Property, UpstreamFailure,
};

use crate::types::{EmailMessage, PaymentIntent, PaymentIntentRequest};

/// Hosted property/booking store, reached over its REST surface
#[mockall::automock]
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Top-rated properties with at least one image, the featured-selection pool
    async fn featured_candidates(&self) -> Result<Vec<Property>, UpstreamFailure>;

    /// Paged property listing, ordered by rating
    async fn list_properties(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Property>, UpstreamFailure>;

    /// Single property by its opaque id
    async fn get_property(&self, id: &str) -> Result<Option<Property>, UpstreamFailure>;

    /// Admin edit pass-through; returns the updated row when the id exists
    async fn update_property(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Option<Property>, UpstreamFailure>;

    /// Insert a booking row, returning the stored record
    async fn insert_booking(&self, booking: &Booking) -> Result<Booking, UpstreamFailure>;

    /// Most recent bookings for the back-office
    async fn list_bookings(&self, limit: u32) -> Result<Vec<Booking>, UpstreamFailure>;

    /// Upsert a CRM customer record keyed by email
    async fn upsert_customer(&self, customer: &Customer) -> Result<(), UpstreamFailure>;

    /// Most recent customers for the back-office
    async fn list_customers(&self, limit: u32) -> Result<Vec<Customer>, UpstreamFailure>;

    /// Newsletter signup row
    async fn insert_subscriber(
        &self,
        subscriber: &NewsletterSubscriber,
    ) -> Result<(), UpstreamFailure>;

    /// Append a marketing/CRM analytics event
    async fn record_event(&self, event: &AnalyticsEvent) -> Result<(), UpstreamFailure>;
}

/// Payment processor seam; one create call per booking intent
#[mockall::automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, UpstreamFailure>;
}

/// Transactional mail provider seam
#[mockall::automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), UpstreamFailure>;
}
