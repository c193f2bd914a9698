//! Daily-rotating featured villa selection
//!
//! Pure functions: the caller injects "now" and the candidate pool, so the
//! rotation is deterministic under test. No cursor or schedule is persisted;
//! the calendar day alone decides the selection.

use chrono::{DateTime, Datelike, Utc};

use shared::Property;

use crate::types::FeaturedVilla;

/// Villas shown on the landing page per day
pub const FEATURED_COUNT: usize = 3;

pub const DEFAULT_NAME: &str = "Luxury Villa";
pub const DEFAULT_LOCATION: &str = "Providenciales, Turks & Caicos";
pub const DEFAULT_BEDROOMS: u32 = 3;
pub const DEFAULT_BATHROOMS: u32 = 2;
pub const DEFAULT_RATING: f64 = 4.8;
pub const DEFAULT_PRICE: f64 = 500.0;

/// Candidates with a displayable first image, in their incoming order.
/// Upstream orders by rating descending; that order is load-bearing for the
/// rotation, so the filter must not reorder.
pub fn eligible_pool(candidates: &[Property]) -> Vec<&Property> {
    candidates
        .iter()
        .filter(|property| property.first_image().is_some())
        .collect()
}

/// 1-based day of the year (January 1 → 1).
pub fn day_of_year(now: DateTime<Utc>) -> u32 {
    now.ordinal()
}

/// Rotation start position for the given day. `pool_size` must be non-zero.
pub fn rotation_offset(day_of_year: u32, pool_size: usize) -> usize {
    (day_of_year as usize * FEATURED_COUNT) % pool_size
}

/// Pick `count` positions from a circular sequence of length `len`, starting
/// at `offset`. Positions repeat when `len < count`; that wrap-around is the
/// whole point of treating the pool as a ring. An empty sequence yields no
/// positions.
pub fn ring_indices(offset: usize, count: usize, len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    (0..count).map(|i| (offset + i) % len).collect()
}

/// Map a raw property row to the landing-page shape, substituting defaults
/// for whatever the scraper failed to capture.
pub fn to_featured(property: &Property) -> FeaturedVilla {
    let bedrooms = property.bedrooms.unwrap_or(DEFAULT_BEDROOMS);

    FeaturedVilla {
        id: property.id.clone(),
        name: property
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_NAME.to_string()),
        location: property
            .location
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        price: property.price_per_night.unwrap_or(DEFAULT_PRICE),
        bedrooms,
        bathrooms: property.bathrooms.unwrap_or(DEFAULT_BATHROOMS),
        guests: property
            .max_guests
            .or(property.guests)
            .unwrap_or(bedrooms * 2),
        image: property.first_image().unwrap_or_default().to_string(),
        rating: property.rating.unwrap_or(DEFAULT_RATING),
    }
}

/// Deterministically choose the day's featured villas from the candidate
/// pool. Empty eligible pool → empty result; pools smaller than
/// [`FEATURED_COUNT`] repeat entries by design.
pub fn select_featured(now: DateTime<Utc>, candidates: &[Property]) -> Vec<FeaturedVilla> {
    let pool = eligible_pool(candidates);
    if pool.is_empty() {
        return Vec::new();
    }

    let offset = rotation_offset(day_of_year(now), pool.len());
    ring_indices(offset, FEATURED_COUNT, pool.len())
        .into_iter()
        .map(|index| to_featured(pool[index]))
        .collect()
}
