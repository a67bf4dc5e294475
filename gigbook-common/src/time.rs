//! Clock abstraction
//!
//! Every "now" the core needs (default show start times, the observation
//! instant of the upcoming/past split) comes from a [`Clock`], so tests can
//! pin it and each operation reads it exactly once.

use chrono::{DateTime, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Convert a stored epoch-milliseconds value back into an instant
pub fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Epoch milliseconds as persisted in the `shows.start_time` column
pub fn to_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    #[test]
    fn test_system_clock_returns_recent_timestamp() {
        let timestamp = SystemClock.now();
        // After 2000-01-01 and before 2100-01-01
        assert!(timestamp.timestamp() > 946_684_800);
        assert!(timestamp.timestamp() < 4_102_444_800);
    }

    #[tokio::test]
    async fn test_system_clock_successive_calls_advance() {
        let time1 = SystemClock.now();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let time2 = SystemClock.now();
        assert!(time2 > time1);
    }

    #[test]
    fn test_fixed_clock_never_moves() {
        let instant = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_millis_conversion_is_exact() {
        let instant = Utc.timestamp_millis_opt(1_700_000_123_456).unwrap();
        assert_eq!(from_millis(to_millis(instant)), Some(instant));
    }
}
