//! Hosted property store client
//!
//! Every operation is a thin pass-through to the store's REST surface
//! (`/rest/v1/<table>`); the store owns the schema and all query semantics.

use async_trait::async_trait;

use shared::{
    AnalyticsEvent, Booking, Customer, NewsletterSubscriber, Property, UpstreamFailure,
};

use crate::traits::PropertyStore;

/// Upper bound on the featured-selection pool fetched per request
pub const FEATURED_POOL_LIMIT: u32 = 100;

/// Real property store backed by the hosted Postgres REST API
pub struct RealPropertyStore {
    base_url: String,
    service_key: String,
    http: reqwest::Client,
}

impl RealPropertyStore {
    /// Create a new store client. `base_url` is the project root, e.g.
    /// `https://xyz.supabase.co`.
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, UpstreamFailure> {
        let response = request
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
        Ok(response)
    }
}

#[async_trait]
impl PropertyStore for RealPropertyStore {
    async fn featured_candidates(&self) -> Result<Vec<Property>, UpstreamFailure> {
        let request = self
            .authed(self.http.get(self.table_url("properties")))
            .query(&[
                ("select", "*"),
                ("images", "not.is.null"),
                ("order", "rating.desc"),
                ("limit", &FEATURED_POOL_LIMIT.to_string()),
            ]);

        let response = self.execute(request).await?;
        response
            .json::<Vec<Property>>()
            .await
            .map_err(|e| UpstreamFailure::InvalidResponse(format!("Failed to parse properties: {e}")))
    }

    async fn list_properties(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Property>, UpstreamFailure> {
        let request = self
            .authed(self.http.get(self.table_url("properties")))
            .query(&[
                ("select", "*"),
                ("order", "rating.desc"),
                ("limit", &limit.to_string()),
                ("offset", &offset.to_string()),
            ]);

        let response = self.execute(request).await?;
        response
            .json::<Vec<Property>>()
            .await
            .map_err(|e| UpstreamFailure::InvalidResponse(format!("Failed to parse properties: {e}")))
    }

    async fn get_property(&self, id: &str) -> Result<Option<Property>, UpstreamFailure> {
        let request = self
            .authed(self.http.get(self.table_url("properties")))
            .query(&[
                ("select", "*"),
                ("id", &format!("eq.{id}")),
                ("limit", "1"),
            ]);

        let response = self.execute(request).await?;
        let mut rows: Vec<Property> = response
            .json()
            .await
            .map_err(|e| UpstreamFailure::InvalidResponse(format!("Failed to parse property: {e}")))?;

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn update_property(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Option<Property>, UpstreamFailure> {
        let request = self
            .authed(self.http.patch(self.table_url("properties")))
            .query(&[("id", &format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&patch);

        let response = self.execute(request).await?;
        let mut rows: Vec<Property> = response
            .json()
            .await
            .map_err(|e| UpstreamFailure::InvalidResponse(format!("Failed to parse update: {e}")))?;

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<Booking, UpstreamFailure> {
        let request = self
            .authed(self.http.post(self.table_url("bookings")))
            .header("Prefer", "return=representation")
            .json(booking);

        let response = self.execute(request).await?;
        let mut rows: Vec<Booking> = response
            .json()
            .await
            .map_err(|e| UpstreamFailure::InvalidResponse(format!("Failed to parse booking: {e}")))?;

        if rows.is_empty() {
            return Err(UpstreamFailure::InvalidResponse(
                "Booking insert returned no rows".to_string(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    async fn list_bookings(&self, limit: u32) -> Result<Vec<Booking>, UpstreamFailure> {
        let request = self
            .authed(self.http.get(self.table_url("bookings")))
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", &limit.to_string()),
            ]);

        let response = self.execute(request).await?;
        response
            .json::<Vec<Booking>>()
            .await
            .map_err(|e| UpstreamFailure::InvalidResponse(format!("Failed to parse bookings: {e}")))
    }

    async fn upsert_customer(&self, customer: &Customer) -> Result<(), UpstreamFailure> {
        let request = self
            .authed(self.http.post(self.table_url("customers")))
            .query(&[("on_conflict", "email")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(customer);

        self.execute(request).await?;
        Ok(())
    }

    async fn list_customers(&self, limit: u32) -> Result<Vec<Customer>, UpstreamFailure> {
        let request = self
            .authed(self.http.get(self.table_url("customers")))
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", &limit.to_string()),
            ]);

        let response = self.execute(request).await?;
        response
            .json::<Vec<Customer>>()
            .await
            .map_err(|e| UpstreamFailure::InvalidResponse(format!("Failed to parse customers: {e}")))
    }

    async fn insert_subscriber(
        &self,
        subscriber: &NewsletterSubscriber,
    ) -> Result<(), UpstreamFailure> {
        let request = self
            .authed(self.http.post(self.table_url("newsletter_subscribers")))
            .query(&[("on_conflict", "email")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(subscriber);

        self.execute(request).await?;
        Ok(())
    }

    async fn record_event(&self, event: &AnalyticsEvent) -> Result<(), UpstreamFailure> {
        let request = self
            .authed(self.http.post(self.table_url("analytics_events")))
            .json(event);

        self.execute(request).await?;
        Ok(())
    }
}
