//! Tests for the hosted property store client

use chrono::{NaiveDate, TimeZone, Utc};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::{Booking, BookingStatus, Customer, UpstreamFailure};

use crate::services::RealPropertyStore;
use crate::traits::PropertyStore;

const TEST_KEY: &str = "test-service-key";

fn store_for(server: &MockServer) -> RealPropertyStore {
    RealPropertyStore::new(&server.uri(), TEST_KEY)
}

fn test_booking() -> Booking {
    Booking {
        id: None,
        reference: "AZS-TEST1234".to_string(),
        property_id: "villa-17".to_string(),
        guest_name: "Ana Ramirez".to_string(),
        guest_email: "ana@example.com".to_string(),
        check_in: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2025, 3, 17).unwrap(),
        guests: 4,
        amount_cents: 525_000,
        currency: "usd".to_string(),
        status: BookingStatus::Pending,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_featured_candidates_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .and(query_param("select", "*"))
        .and(query_param("images", "not.is.null"))
        .and(query_param("order", "rating.desc"))
        .and(query_param("limit", "100"))
        .and(header("apikey", TEST_KEY))
        .and(header("Authorization", "Bearer test-service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "villa-1",
                "name": "Coral House",
                "images": ["https://cdn.example.com/1.jpg"],
                "rating": 4.9
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let candidates = store.featured_candidates().await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, "villa-1");
    assert_eq!(candidates[0].name.as_deref(), Some("Coral House"));
}

#[tokio::test]
async fn test_status_codes_map_to_failure_taxonomy() {
    for (status, expected) in [
        (401, UpstreamFailure::AuthenticationFailed),
        (403, UpstreamFailure::AuthenticationFailed),
        (429, UpstreamFailure::RateLimitExceeded),
        (503, UpstreamFailure::ServiceUnavailable),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let store = store_for(&server);
        let failure = store.featured_candidates().await.unwrap_err();
        assert_eq!(failure, expected, "status {status}");
    }
}

#[tokio::test]
async fn test_unparseable_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let failure = store.featured_candidates().await.unwrap_err();
    assert!(matches!(failure, UpstreamFailure::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_properties_forwards_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let villas = store.list_properties(20, 40).await.unwrap();
    assert!(villas.is_empty());
}

#[tokio::test]
async fn test_get_property_absent_row_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .and(query_param("id", "eq.villa-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert_eq!(store.get_property("villa-9").await.unwrap(), None);
}

#[tokio::test]
async fn test_insert_booking_returns_stored_row() {
    let server = MockServer::start().await;
    let booking = test_booking();

    let mut stored_row = serde_json::to_value(&booking).unwrap();
    stored_row["id"] = serde_json::json!("row-88");

    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .and(header("Prefer", "return=representation"))
        .and(header("apikey", TEST_KEY))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!([stored_row])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let stored = store.insert_booking(&booking).await.unwrap();

    assert_eq!(stored.id.as_deref(), Some("row-88"));
    assert_eq!(stored.reference, booking.reference);
}

#[tokio::test]
async fn test_insert_booking_empty_representation_is_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let failure = store.insert_booking(&test_booking()).await.unwrap_err();
    assert!(matches!(failure, UpstreamFailure::InvalidResponse(_)));
}

#[tokio::test]
async fn test_upsert_customer_merges_on_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/customers"))
        .and(query_param("on_conflict", "email"))
        .and(header("Prefer", "resolution=merge-duplicates"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let customer = Customer {
        email: "ana@example.com".to_string(),
        name: "Ana Ramirez".to_string(),
        phone: None,
        source: Some("inquiry-form".to_string()),
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    };

    store.upsert_customer(&customer).await.unwrap();
}
