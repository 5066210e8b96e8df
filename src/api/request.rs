//! Request-identity bookkeeping for overlapping fetches.
//!
//! There is no cancellation token for an in-flight host request, so a
//! refetch simply starts a new one. Each fetch is tagged with a
//! monotonically increasing id, carried through the host request's context
//! map; when a response arrives, it is applied only if its id matches the
//! latest issued id. Responses racing in out of order are dropped instead of
//! overwriting newer state.

/// Key under which the request id travels in the `web_request` context map.
pub const REQUEST_ID_CONTEXT_KEY: &str = "request_id";

/// Issues fetch ids and decides which responses are still current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestGuard {
    latest: u64,
}

impl RequestGuard {
    /// Creates a guard with no outstanding request.
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Registers a new fetch and returns its id. Any response tagged with an
    /// earlier id becomes stale from this point on.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a response tagged `id` belongs to the latest fetch.
    #[must_use]
    pub const fn accepts(&self, id: u64) -> bool {
        id == self.latest && id != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_monotonically() {
        let mut guard = RequestGuard::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(second > first);
    }

    #[test]
    fn only_the_latest_request_is_accepted() {
        let mut guard = RequestGuard::new();
        let stale = guard.issue();
        let current = guard.issue();

        assert!(!guard.accepts(stale));
        assert!(guard.accepts(current));
    }

    #[test]
    fn nothing_is_accepted_before_the_first_issue() {
        let guard = RequestGuard::new();
        assert!(!guard.accepts(0));
        assert!(!guard.accepts(1));
    }
}
