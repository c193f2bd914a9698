//! Booking payload validation and reference generation

use chrono::NaiveDate;
use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;

use crate::types::BookingPayload;

pub const REFERENCE_PREFIX: &str = "AZS";
const REFERENCE_SUFFIX_LEN: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    #[error("Property id must not be empty")]
    MissingProperty,

    #[error("Guest name must not be empty")]
    MissingName,

    #[error("Guest email is not valid")]
    InvalidEmail,

    #[error("Check-out must be after check-in")]
    InvalidDateRange,

    #[error("Guest count must be at least 1")]
    NoGuests,

    #[error("Amount must be positive")]
    InvalidAmount,
}

/// Validate a booking payload before anything is forwarded to the store or
/// the payment processor.
pub fn validate(payload: &BookingPayload) -> Result<(), BookingValidationError> {
    if payload.property_id.trim().is_empty() {
        return Err(BookingValidationError::MissingProperty);
    }
    if payload.guest_name.trim().is_empty() {
        return Err(BookingValidationError::MissingName);
    }
    if !is_plausible_email(&payload.guest_email) {
        return Err(BookingValidationError::InvalidEmail);
    }
    if payload.check_out <= payload.check_in {
        return Err(BookingValidationError::InvalidDateRange);
    }
    if payload.guests == 0 {
        return Err(BookingValidationError::NoGuests);
    }
    if payload.amount_cents <= 0 {
        return Err(BookingValidationError::InvalidAmount);
    }
    Ok(())
}

/// Whole nights between check-in and check-out.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Generate a booking reference like `AZS-7K2M9QXD`.
pub fn generate_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("{REFERENCE_PREFIX}-{suffix}")
}

/// Shallow plausibility check only; the mail provider is the authority on
/// deliverability.
pub fn is_plausible_email(email: &str) -> bool {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> BookingPayload {
        BookingPayload {
            property_id: "villa-17".to_string(),
            guest_name: "Ana Ramirez".to_string(),
            guest_email: "ana@example.com".to_string(),
            check_in: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 3, 17).unwrap(),
            guests: 4,
            amount_cents: 525_000,
            currency: None,
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert_eq!(validate(&valid_payload()), Ok(()));
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let mut payload = valid_payload();
        payload.check_out = payload.check_in;
        assert_eq!(
            validate(&payload),
            Err(BookingValidationError::InvalidDateRange)
        );

        payload.check_out = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(
            validate(&payload),
            Err(BookingValidationError::InvalidDateRange)
        );
    }

    #[test]
    fn test_zero_guests_rejected() {
        let mut payload = valid_payload();
        payload.guests = 0;
        assert_eq!(validate(&payload), Err(BookingValidationError::NoGuests));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut payload = valid_payload();
        payload.amount_cents = 0;
        assert_eq!(
            validate(&payload),
            Err(BookingValidationError::InvalidAmount)
        );

        payload.amount_cents = -100;
        assert_eq!(
            validate(&payload),
            Err(BookingValidationError::InvalidAmount)
        );
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut payload = valid_payload();
        payload.guest_email = "not-an-email".to_string();
        assert_eq!(
            validate(&payload),
            Err(BookingValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_nights_count() {
        let check_in = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(nights(check_in, check_out), 7);
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_reference();
        assert_eq!(reference.len(), 12);
        assert!(reference.starts_with("AZS-"));
        assert!(reference[4..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("guest@example.com"));
        assert!(!is_plausible_email("guest"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("guest@nodot"));
        assert!(!is_plausible_email("guest@dot."));
    }
}
