//! Per-user daily message quota.
//!
//! Counters are keyed by `(identity, UTC calendar day)`. UTC is the fixed
//! day boundary: a user's quota rolls over at 00:00 UTC regardless of their
//! local timezone. Old day-keys are never swept; the map is a fixed-capacity
//! LRU, so stale keys fall out under pressure and memory stays bounded no
//! matter how many days of traffic the process has seen.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use lru::LruCache;

/// Sentinel identity sharing one quota bucket across all anonymous callers.
/// A missing identity is normalized, not treated as unlimited.
pub const GUEST_IDENTITY: &str = "guest";

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct QuotaKey {
    identity: String,
    day: NaiveDate,
}

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// Admitted; `used` is the count after this request.
    Allowed { used: u32 },
    /// The daily ceiling is reached. The counter was not incremented.
    Denied { limit: u32 },
}

pub struct QuotaStore {
    limit: u32,
    counters: Mutex<LruCache<QuotaKey, u32>>,
}

impl QuotaStore {
    pub fn new(limit: u32, capacity: u32) -> Self {
        let capacity = NonZeroUsize::new(capacity as usize)
            .unwrap_or(NonZeroUsize::new(1).expect("1 is non-zero"));
        Self {
            limit,
            counters: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Check-and-consume one slot for today's bucket.
    pub fn check(&self, identity: Option<&str>) -> QuotaDecision {
        self.check_on(identity, Utc::now().date_naive())
    }

    /// Same as [`check`](Self::check) with an explicit day, so rollover is
    /// testable without a clock.
    ///
    /// Read, compare, and increment happen under one lock: two concurrent
    /// requests from the same user cannot both observe the pre-increment
    /// count and both take the last slot.
    pub fn check_on(&self, identity: Option<&str>, day: NaiveDate) -> QuotaDecision {
        let key = QuotaKey {
            identity: identity.unwrap_or(GUEST_IDENTITY).to_string(),
            day,
        };

        let mut counters = match self.counters.lock() {
            Ok(guard) => guard,
            // A poisoned lock means a panic elsewhere; denying is the safe
            // side of the ceiling.
            Err(_) => return QuotaDecision::Denied { limit: self.limit },
        };

        let count = counters.get(&key).copied().unwrap_or(0);
        if count >= self.limit {
            return QuotaDecision::Denied { limit: self.limit };
        }

        counters.put(key, count + 1);
        QuotaDecision::Allowed { used: count + 1 }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    #[test]
    fn nth_request_is_last_admitted() {
        let store = QuotaStore::new(5, 64);
        let today = day("2026-08-25");

        for n in 1..=5 {
            assert_eq!(
                store.check_on(Some("user-1"), today),
                QuotaDecision::Allowed { used: n }
            );
        }
        assert_eq!(
            store.check_on(Some("user-1"), today),
            QuotaDecision::Denied { limit: 5 }
        );
        // Denied again, and still denied: no increment happened on denial.
        assert_eq!(
            store.check_on(Some("user-1"), today),
            QuotaDecision::Denied { limit: 5 }
        );
    }

    #[test]
    fn next_day_admits_again() {
        let store = QuotaStore::new(2, 64);
        assert!(matches!(
            store.check_on(Some("user-1"), day("2026-08-25")),
            QuotaDecision::Allowed { .. }
        ));
        assert!(matches!(
            store.check_on(Some("user-1"), day("2026-08-25")),
            QuotaDecision::Allowed { .. }
        ));
        assert!(matches!(
            store.check_on(Some("user-1"), day("2026-08-25")),
            QuotaDecision::Denied { .. }
        ));
        assert!(matches!(
            store.check_on(Some("user-1"), day("2026-08-26")),
            QuotaDecision::Allowed { used: 1 }
        ));
    }

    #[test]
    fn users_never_share_consumption() {
        let store = QuotaStore::new(1, 64);
        let today = day("2026-08-25");

        assert!(matches!(
            store.check_on(Some("user-1"), today),
            QuotaDecision::Allowed { .. }
        ));
        assert!(matches!(
            store.check_on(Some("user-1"), today),
            QuotaDecision::Denied { .. }
        ));
        assert!(matches!(
            store.check_on(Some("user-2"), today),
            QuotaDecision::Allowed { .. }
        ));
    }

    #[test]
    fn missing_identity_shares_the_guest_bucket() {
        let store = QuotaStore::new(2, 64);
        let today = day("2026-08-25");

        assert!(matches!(
            store.check_on(None, today),
            QuotaDecision::Allowed { .. }
        ));
        assert!(matches!(
            store.check_on(Some(GUEST_IDENTITY), today),
            QuotaDecision::Allowed { .. }
        ));
        assert!(matches!(
            store.check_on(None, today),
            QuotaDecision::Denied { .. }
        ));
    }

    #[test]
    fn concurrent_requests_never_exceed_the_ceiling() {
        let store = Arc::new(QuotaStore::new(5, 64));
        let today = day("2026-08-25");

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    matches!(
                        store.check_on(Some("user-1"), today),
                        QuotaDecision::Allowed { .. }
                    )
                })
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().expect("no panic"))
            .filter(|&admitted| admitted)
            .count();
        assert_eq!(admitted, 5);
    }
}
