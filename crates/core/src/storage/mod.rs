mod error;
mod traits;

pub use error::{BoxError, Result, StoreError};
pub use traits::EventStore;

use chrono::{DateTime, Duration, Utc};

/// Staleness cutoff: rows cached strictly before this instant are stale.
pub fn stale_cutoff(now: DateTime<Utc>, max_age: Duration) -> DateTime<Utc> {
    now - max_age
}

/// Whether a row is eligible for staleness eviction.
pub fn is_evictable(
    cached_at: DateTime<Utc>,
    is_favorite: bool,
    now: DateTime<Utc>,
    max_age: Duration,
) -> bool {
    !is_favorite && cached_at < stale_cutoff(now, max_age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_favorites_are_never_evictable() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let ancient = now - Duration::days(3650);

        assert!(!is_evictable(ancient, true, now, Duration::zero()));
        assert!(is_evictable(ancient, false, now, Duration::days(7)));
    }

    #[test]
    fn test_evictable_only_beyond_max_age() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let max_age = Duration::days(7);

        assert!(!is_evictable(now - Duration::days(6), false, now, max_age));
        assert!(!is_evictable(now - max_age, false, now, max_age));
        assert!(is_evictable(
            now - max_age - Duration::milliseconds(1),
            false,
            now,
            max_age
        ));
    }
}
