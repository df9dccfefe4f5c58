//! Request-generation tracking: the mechanism that discards results of
//! superseded in-flight requests.
//!
//! Each logical query (all stations, stations by province, ...) owns one
//! counter. Issuing a request takes a generation ticket; when the
//! response finally resolves, the ticket is checked against the counter
//! and a stale ticket means a newer request was issued in the meantime —
//! the stale result must not update consumer state.

use std::sync::atomic::{AtomicU64, Ordering};

/// A ticket identifying one issued request for a logical query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestGeneration(u64);

/// Monotonic generation counter for one logical query.
///
/// Interior-mutable so concurrent requests can share the client without
/// locking; there is deliberately no global fetch lock — independent
/// queries track their own counters.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier one for this
    /// query.
    pub fn begin(&self) -> RequestGeneration {
        RequestGeneration(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while `generation` is still the most recently issued
    /// request for this query.
    pub fn is_current(&self, generation: RequestGeneration) -> bool {
        self.current.load(Ordering::SeqCst) == generation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_request_supersedes_older_ones() {
        let counter = GenerationCounter::new();
        let first = counter.begin();
        assert!(counter.is_current(first));

        let second = counter.begin();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[test]
    fn independent_queries_do_not_interfere() {
        let all_stations = GenerationCounter::new();
        let by_province = GenerationCounter::new();

        let all_gen = all_stations.begin();
        by_province.begin();
        by_province.begin();

        // Activity on one query never invalidates the other.
        assert!(all_stations.is_current(all_gen));
    }
}
