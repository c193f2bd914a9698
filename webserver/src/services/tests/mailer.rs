//! Tests for the transactional mail client and message formatting

use chrono::{NaiveDate, TimeZone, Utc};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::{Booking, BookingStatus, UpstreamFailure};

use crate::services::mailer::{booking_confirmation, inquiry_notification};
use crate::services::RealMailer;
use crate::traits::Mailer;
use crate::types::{EmailMessage, InquiryPayload};

fn test_booking() -> Booking {
    Booking {
        id: Some("row-88".to_string()),
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
async fn test_send_posts_documented_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("Authorization", "Bearer re_test_key"))
        .and(body_json(serde_json::json!({
            "from": "stays@azureshore.test",
            "to": ["ana@example.com"],
            "subject": "Hello",
            "html": "<p>Hi</p>",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "email-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = RealMailer::with_base_url("re_test_key", "stays@azureshore.test", &server.uri());
    let message = EmailMessage {
        to: "ana@example.com".to_string(),
        subject: "Hello".to_string(),
        html: "<p>Hi</p>".to_string(),
    };

    mailer.send(&message).await.unwrap();
}

#[tokio::test]
async fn test_provider_rate_limit_surfaces_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let mailer = RealMailer::with_base_url("re_test_key", "stays@azureshore.test", &server.uri());
    let message = EmailMessage {
        to: "ana@example.com".to_string(),
        subject: "Hello".to_string(),
        html: "<p>Hi</p>".to_string(),
    };

    let failure = mailer.send(&message).await.unwrap_err();
    assert_eq!(failure, UpstreamFailure::RateLimitExceeded);
}

#[test]
fn test_booking_confirmation_content() {
    let booking = test_booking();
    let message = booking_confirmation(&booking, "Coral House");

    assert_eq!(message.to, "ana@example.com");
    assert!(message.subject.contains("AZS-TEST1234"));
    assert!(message.html.contains("Coral House"));
    assert!(message.html.contains("7 nights"));
    assert!(message.html.contains("$5250.00 USD"));
    assert!(message.html.contains("Ana Ramirez"));
}

#[test]
fn test_inquiry_notification_content() {
    let inquiry = InquiryPayload {
        name: "Ben Osei".to_string(),
        email: "ben@example.com".to_string(),
        phone: None,
        message: "Is the villa available over Easter?".to_string(),
        property_id: Some("villa-17".to_string()),
    };

    let message = inquiry_notification(&inquiry, "concierge@azureshore.test");

    assert_eq!(message.to, "concierge@azureshore.test");
    assert!(message.subject.contains("Ben Osei"));
    assert!(message.html.contains("ben@example.com"));
    assert!(message.html.contains("phone: not provided"));
    assert!(message.html.contains("villa-17"));
    assert!(message.html.contains("Easter"));
}
