//! Webserver state management
//!
//! Request-scoped handlers share only this read-mostly state; all booking and
//! customer data lives in the externally-owned store.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

/// Core webserver state
#[derive(Debug)]
pub struct WebServerState {
    pub server_start_time: Instant,
    is_running: AtomicBool,
    featured_served: AtomicU64,
    inquiries_received: AtomicU64,
    bookings_started: AtomicU64,
}

impl WebServerState {
    /// Create a new webserver state
    pub fn new() -> Self {
        Self {
            server_start_time: Instant::now(),
            is_running: AtomicBool::new(true),
            featured_served: AtomicU64::new(0),
            inquiries_received: AtomicU64::new(0),
            bookings_started: AtomicU64::new(0),
        }
    }

    /// Check if the server is running
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Set running state
    pub fn set_running(&self, running: bool) {
        self.is_running.store(running, Ordering::Relaxed);
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    pub fn record_featured_served(&self) -> u64 {
        self.featured_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn featured_served(&self) -> u64 {
        self.featured_served.load(Ordering::Relaxed)
    }

    pub fn record_inquiry(&self) -> u64 {
        self.inquiries_received.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn inquiries_received(&self) -> u64 {
        self.inquiries_received.load(Ordering::Relaxed)
    }

    pub fn record_booking_started(&self) -> u64 {
        self.bookings_started.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn bookings_started(&self) -> u64 {
        self.bookings_started.load(Ordering::Relaxed)
    }
}

impl Default for WebServerState {
    fn default() -> Self {
        Self::new()
    }
}
