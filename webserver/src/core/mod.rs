//! Core business logic
//!
//! Pure, synchronous logic lives here (plus the retry combinator); the
//! services layer owns the network.

pub mod booking;
pub mod featured;
pub mod retry;
pub mod session;

pub use featured::{select_featured, FEATURED_COUNT};
pub use retry::{with_retry, DEFAULT_BASE_DELAY, DEFAULT_RETRIES};
