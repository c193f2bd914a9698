//! Main webserver implementation
//!
//! This module contains the main WebServer struct that wires the public and
//! admin API to the managed-service clients using dependency injection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header::COOKIE, HeaderMap, StatusCode},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use shared::{AnalyticsEvent, Booking, BookingStatus, Customer, NewsletterSubscriber, UpstreamFailure};

use crate::config::Config;
use crate::core::booking::{self, generate_reference, is_plausible_email, nights};
use crate::core::featured::{select_featured, DEFAULT_NAME};
use crate::core::retry::with_retry;
use crate::core::session;
use crate::error::{WebServerError, WebServerResult};
use crate::services::mailer::{booking_confirmation, inquiry_notification};
use crate::state::WebServerState;
use crate::traits::{Mailer, PaymentGateway, PropertyStore};
use crate::types::{
    BookingPayload, FeaturedVilla, InquiryPayload, ListQuery, NewsletterPayload,
    PaymentIntentRequest,
};

/// Default page size for the public villa listing
const DEFAULT_PAGE_SIZE: u32 = 20;
/// Hard cap on the public villa listing page size
const MAX_PAGE_SIZE: u32 = 100;
/// Rows returned to the back-office list views
const ADMIN_PAGE_SIZE: u32 = 50;

/// Main webserver struct with dependency injection
pub struct WebServer<P, G, M>
where
    P: PropertyStore,
    G: PaymentGateway,
    M: Mailer,
{
    state: Arc<WebServerState>,
    config: Arc<Config>,
    property_store: Arc<P>,
    payment_gateway: Arc<G>,
    mailer: Arc<M>,
}

impl<P, G, M> Clone for WebServer<P, G, M>
where
    P: PropertyStore,
    G: PaymentGateway,
    M: Mailer,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            config: self.config.clone(),
            property_store: self.property_store.clone(),
            payment_gateway: self.payment_gateway.clone(),
            mailer: self.mailer.clone(),
        }
    }
}

impl<P, G, M> WebServer<P, G, M>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    /// Create a new webserver with dependency injection
    pub fn new(config: Config, property_store: P, payment_gateway: G, mailer: M) -> Self {
        Self {
            state: Arc::new(WebServerState::new()),
            config: Arc::new(config),
            property_store: Arc::new(property_store),
            payment_gateway: Arc::new(payment_gateway),
            mailer: Arc::new(mailer),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Public API routes
            .route("/api/villas/featured", get(featured_handler))
            .route("/api/villas", get(list_villas_handler))
            .route("/api/villas/:id", get(get_villa_handler))
            .route("/api/inquiries", post(inquiry_handler))
            .route("/api/newsletter", post(newsletter_handler))
            .route("/api/payments/intent", post(create_payment_handler))
            // Admin back-office routes
            .route("/api/admin/bookings", get(admin_bookings_handler))
            .route("/api/admin/customers", get(admin_customers_handler))
            .route("/api/admin/villas/:id", patch(admin_update_villa_handler))
            // Health check
            .route("/health", get(health_check))
            .layer(
                ServiceBuilder::new()
                    .layer(CorsLayer::permissive()) // The marketing site is served from a different origin
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Start the webserver
    pub async fn run(&self, bind_address: SocketAddr) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(bind_address).await.map_err(|e| {
            WebServerError::ServerStartup(format!("Failed to bind to {bind_address}: {e}"))
        })?;

        info!("🌐 Web server listening on http://{}", bind_address);

        let server_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("Server error: {}", e);
            }
        });

        // Wait for the server to stop or for the shutdown signal
        tokio::select! {
            _ = server_task => {
                info!("HTTP server task completed");
            },
            _ = tokio::signal::ctrl_c() => {
                shared::logging::log_shutdown("Received shutdown signal");
                self.state.set_running(false);
            }
        }

        Ok(())
    }

    /// The day's featured villas: retry-wrapped store fetch, then the pure
    /// rotation selector. Never fails; any upstream error degrades to an
    /// empty list so page rendering is unaffected.
    pub async fn featured_for(&self, now: DateTime<Utc>) -> Vec<FeaturedVilla> {
        let store = self.property_store.clone();
        let fetched = with_retry(
            move || {
                let store = store.clone();
                async move { store.featured_candidates().await }
            },
            self.config.fetch_retries,
            Duration::from_millis(self.config.fetch_base_delay_ms),
        )
        .await;

        match fetched {
            Ok(candidates) => select_featured(now, &candidates),
            Err(e) => {
                error!("Featured candidate fetch failed after retries: {}", e);
                Vec::new()
            }
        }
    }

    /// Append an analytics event, logging failures instead of surfacing them.
    async fn record_event_best_effort(&self, event_type: &str, payload: serde_json::Value) {
        let event = AnalyticsEvent::new(event_type, payload);
        if let Err(e) = self.property_store.record_event(&event).await {
            warn!("Failed to record {} event: {}", event_type, e);
        }
    }

    /// Get server state for external access
    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    /// Get the service configuration
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }
}

/// HTTP status for a failed upstream call. Transient conditions map to 503 so
/// clients know to come back; everything else is a plain 500.
fn upstream_status(failure: &UpstreamFailure) -> StatusCode {
    match failure {
        UpstreamFailure::RateLimitExceeded | UpstreamFailure::ServiceUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Reject the request unless it carries the admin session cookie or token.
fn require_admin(headers: &HeaderMap, config: &Config) -> Result<(), StatusCode> {
    let cookie_header = headers.get(COOKIE).and_then(|value| value.to_str().ok());
    let token_header = headers
        .get(session::ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    if session::is_authorized(cookie_header, token_header, &config.admin_session_token) {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

// HTTP Handlers

/// Landing-page featured villas; always 200, worst case an empty list
async fn featured_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
) -> Json<serde_json::Value>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    let villas = webserver.featured_for(Utc::now()).await;
    webserver.state.record_featured_served();

    Json(json!({ "villas": villas }))
}

/// Paged public villa listing
async fn list_villas_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);

    match webserver.property_store.list_properties(limit, offset).await {
        Ok(villas) => Ok(Json(json!({
            "villas": villas,
            "limit": limit,
            "offset": offset
        }))),
        Err(e) => {
            error!("Failed to list properties: {}", e);
            Err(upstream_status(&e))
        }
    }
}

/// Single villa detail page
async fn get_villa_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    match webserver.property_store.get_property(&id).await {
        Ok(Some(villa)) => Ok(Json(json!({ "villa": villa }))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to fetch property {}: {}", id, e);
            Err(upstream_status(&e))
        }
    }
}

/// Contact/inquiry form: upsert the CRM record, notify the concierge inbox
async fn inquiry_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
    Json(payload): Json<InquiryPayload>,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    if payload.name.trim().is_empty()
        || payload.message.trim().is_empty()
        || !is_plausible_email(&payload.email)
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let customer = Customer {
        email: payload.email.trim().to_string(),
        name: payload.name.trim().to_string(),
        phone: payload.phone.clone(),
        source: Some("inquiry-form".to_string()),
        created_at: Utc::now(),
    };

    if let Err(e) = webserver.property_store.upsert_customer(&customer).await {
        error!("Failed to upsert customer {}: {}", customer.email, e);
        return Err(upstream_status(&e));
    }

    webserver
        .record_event_best_effort(
            "inquiry_received",
            json!({
                "email": customer.email,
                "property_id": payload.property_id,
            }),
        )
        .await;

    let notification = inquiry_notification(&payload, &webserver.config.concierge_email);
    if let Err(e) = webserver.mailer.send(&notification).await {
        error!("Failed to notify concierge about inquiry: {}", e);
        // Don't fail the request if the notification email fails
    }

    let received = webserver.state.record_inquiry();
    info!("✅ Recorded inquiry #{} from {}", received, customer.email);

    Ok(Json(json!({
        "status": "success",
        "message": "Thank you for your inquiry. Our concierge team will reach out shortly."
    })))
}

/// Newsletter signup
async fn newsletter_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
    Json(payload): Json<NewsletterPayload>,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    if !is_plausible_email(&payload.email) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let subscriber = NewsletterSubscriber {
        email: payload.email.trim().to_lowercase(),
        subscribed_at: Utc::now(),
    };

    if let Err(e) = webserver.property_store.insert_subscriber(&subscriber).await {
        error!("Failed to insert subscriber {}: {}", subscriber.email, e);
        return Err(upstream_status(&e));
    }

    webserver
        .record_event_best_effort("newsletter_signup", json!({ "email": subscriber.email }))
        .await;

    Ok(Json(json!({
        "status": "success",
        "message": "You're on the list."
    })))
}

/// Start a booking: record it, create the payment intent, return the client
/// secret the frontend needs to collect payment
async fn create_payment_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
    Json(payload): Json<BookingPayload>,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    if let Err(e) = booking::validate(&payload) {
        warn!("Rejected booking payload: {}", e);
        return Err(StatusCode::BAD_REQUEST);
    }

    let currency = payload.currency.clone().unwrap_or_else(|| "usd".to_string());
    let booking = Booking {
        id: None,
        reference: generate_reference(),
        property_id: payload.property_id.clone(),
        guest_name: payload.guest_name.trim().to_string(),
        guest_email: payload.guest_email.trim().to_string(),
        check_in: payload.check_in,
        check_out: payload.check_out,
        guests: payload.guests,
        amount_cents: payload.amount_cents,
        currency: currency.clone(),
        status: BookingStatus::Pending,
        created_at: Utc::now(),
    };

    let stored = match webserver.property_store.insert_booking(&booking).await {
        Ok(stored) => stored,
        Err(e) => {
            error!("Failed to insert booking {}: {}", booking.reference, e);
            return Err(upstream_status(&e));
        }
    };

    let intent_request = PaymentIntentRequest {
        amount_cents: stored.amount_cents,
        currency,
        booking_reference: stored.reference.clone(),
        receipt_email: stored.guest_email.clone(),
    };

    let intent = match webserver
        .payment_gateway
        .create_payment_intent(&intent_request)
        .await
    {
        Ok(intent) => intent,
        Err(e) => {
            error!(
                "Failed to create payment intent for {}: {}",
                stored.reference, e
            );
            return Err(upstream_status(&e));
        }
    };

    // Confirmation email is best-effort; the booking is already recorded
    let villa_name = match webserver.property_store.get_property(&stored.property_id).await {
        Ok(Some(property)) => property.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        _ => DEFAULT_NAME.to_string(),
    };
    let confirmation = booking_confirmation(&stored, &villa_name);
    if let Err(e) = webserver.mailer.send(&confirmation).await {
        error!(
            "Failed to send booking confirmation for {}: {}",
            stored.reference, e
        );
    }

    webserver
        .record_event_best_effort(
            "booking_started",
            json!({
                "reference": stored.reference,
                "property_id": stored.property_id,
                "nights": nights(stored.check_in, stored.check_out),
            }),
        )
        .await;

    let started = webserver.state.record_booking_started();
    info!("✅ Booking #{} started: {}", started, stored.reference);

    Ok(Json(json!({
        "status": "success",
        "reference": stored.reference,
        "payment_intent_id": intent.id,
        "client_secret": intent.client_secret
    })))
}

/// Back-office booking list
async fn admin_bookings_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    require_admin(&headers, &webserver.config)?;

    match webserver.property_store.list_bookings(ADMIN_PAGE_SIZE).await {
        Ok(bookings) => Ok(Json(json!({ "bookings": bookings }))),
        Err(e) => {
            error!("Failed to list bookings: {}", e);
            Err(upstream_status(&e))
        }
    }
}

/// Back-office customer list
async fn admin_customers_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    require_admin(&headers, &webserver.config)?;

    match webserver.property_store.list_customers(ADMIN_PAGE_SIZE).await {
        Ok(customers) => Ok(Json(json!({ "customers": customers }))),
        Err(e) => {
            error!("Failed to list customers: {}", e);
            Err(upstream_status(&e))
        }
    }
}

/// Back-office property edit pass-through
async fn admin_update_villa_handler<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(edit): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    require_admin(&headers, &webserver.config)?;

    match webserver.property_store.update_property(&id, edit).await {
        Ok(Some(villa)) => {
            info!("✅ Updated property {}", id);
            Ok(Json(json!({ "status": "success", "villa": villa })))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to update property {}: {}", id, e);
            Err(upstream_status(&e))
        }
    }
}

/// Health check endpoint
async fn health_check<P, G, M>(
    State(webserver): State<WebServer<P, G, M>>,
) -> Json<serde_json::Value>
where
    P: PropertyStore + 'static,
    G: PaymentGateway + 'static,
    M: Mailer + 'static,
{
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": webserver.state.get_uptime_seconds(),
        "featured_served": webserver.state.featured_served(),
        "inquiries_received": webserver.state.inquiries_received(),
        "bookings_started": webserver.state.bookings_started()
    }))
}
