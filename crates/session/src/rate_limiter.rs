use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

/// One user's rolling request-count window.
#[derive(Debug, Clone)]
struct Window {
    origin: Instant,
    count: u32,
    last_seen: Instant,
}

/// Per-user rolling rate-limit accounting.
///
/// This type holds no lock of its own: the rate-limit table is one of
/// the pieces of mutable state serialized by the state store's single
/// mutex, so `dicecade_state::store` embeds a `RateLimiterTable` field
/// directly inside its guarded state rather than giving this its own
/// synchronization.
#[derive(Debug, Default)]
pub struct RateLimiterTable {
    windows: HashMap<u32, Window>,
}

impl RateLimiterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one request for `user_id` and reports whether it's
    /// within the per-minute cap. The window resets whenever its
    /// origin is more than 60 seconds in the past.
    pub fn record(&mut self, user_id: u32, cap_per_minute: u32, now: Instant) -> bool {
        let window = self.windows.entry(user_id).or_insert_with(|| Window {
            origin: now,
            count: 0,
            last_seen: now,
        });

        if now.duration_since(window.origin) > Duration::from_secs(60) {
            window.origin = now;
            window.count = 0;
        }

        window.last_seen = now;

        if window.count >= cap_per_minute {
            debug!(user_id, cap_per_minute, "rate limit exceeded");
            return false;
        }
        window.count += 1;
        true
    }

    /// Drops windows that have been idle for over an hour.
    pub fn evict_idle(&mut self, now: Instant) {
        self.windows
            .retain(|_, w| now.duration_since(w.last_seen) <= Duration::from_secs(3600));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_cap_then_rejects() {
        let mut table = RateLimiterTable::new();
        let now = Instant::now();
        for _ in 0..5 {
            assert!(table.record(1, 5, now));
        }
        assert!(!table.record(1, 5, now));
    }

    #[test]
    fn window_resets_after_sixty_seconds() {
        let mut table = RateLimiterTable::new();
        let t0 = Instant::now();
        assert!(table.record(1, 1, t0));
        assert!(!table.record(1, 1, t0));

        let later = t0 + Duration::from_secs(61);
        assert!(table.record(1, 1, later));
    }

    #[test]
    fn idle_windows_are_evicted() {
        let mut table = RateLimiterTable::new();
        let t0 = Instant::now();
        table.record(1, 10, t0);
        assert_eq!(table.len(), 1);

        let much_later = t0 + Duration::from_secs(3601);
        table.evict_idle(much_later);
        assert_eq!(table.len(), 0);
    }
}
