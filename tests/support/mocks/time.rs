// tests/support/mocks/time.rs
use chrono::{DateTime, Duration, Utc};
use newsroom::application::ports::time::Clock;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks/time.rs")
        .with_timezone(&Utc)
});

pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

/// Starts at [`fixed_now`] and advances one second per reading, so rows
/// created in sequence get distinct, ordered timestamps.
#[derive(Debug, Default)]
pub struct TestClock {
    ticks: AtomicI64,
}

impl TestClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        fixed_now() + Duration::seconds(tick)
    }
}
