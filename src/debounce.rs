//! Debounce primitive for rapidly-changing input values.
//!
//! [`Debouncer`] exposes a second, time-lagged copy of an input value: the
//! settled value only catches up with the input once the input has stopped
//! changing for a full delay interval. The type is a pure state machine;
//! actual timers belong to the host event loop. Each submission is stamped
//! with a monotonically increasing generation; the caller schedules one
//! fixed-delay timer per returned generation and reports expirations back
//! through [`Debouncer::fire`]. A timer whose generation has been superseded
//! (or cancelled) is a no-op, so intermediate values are never observed.
//!
//! Host timers of equal delay expire in submission order, so the page keeps
//! a FIFO queue of scheduled generations and pops one per timer event.
//!
//! # Examples
//!
//! ```
//! use userdeck::debounce::Debouncer;
//!
//! let mut debouncer = Debouncer::new(String::new());
//!
//! let first = debouncer.submit("b".to_string()).unwrap();
//! let second = debouncer.submit("bo".to_string()).unwrap();
//!
//! // The first timer is stale by the time it expires.
//! assert!(!debouncer.fire(first));
//! assert_eq!(debouncer.settled(), "");
//!
//! // The latest one commits.
//! assert!(debouncer.fire(second));
//! assert_eq!(debouncer.settled(), "bo");
//! ```

/// Time-lagged view of a rapidly-changing value.
///
/// The settled value initially equals the initial input; there is no
/// artificial leading delay.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    /// The exposed value: the last input that survived a full quiet period.
    settled: T,
    /// The most recent input, awaiting its timer. `None` when the input has
    /// already settled or a pending update was discarded.
    pending: Option<T>,
    /// Generation of the most recent submission. Timers carry the generation
    /// they were scheduled for; anything older is stale.
    generation: u64,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Creates a debouncer whose settled value is `initial`.
    #[must_use]
    pub const fn new(initial: T) -> Self {
        Self {
            settled: initial,
            pending: None,
            generation: 0,
        }
    }

    /// The currently exposed value.
    #[must_use]
    pub const fn settled(&self) -> &T {
        &self.settled
    }

    /// Records a new input value, superseding any pending one.
    ///
    /// Returns the generation a delay timer must be scheduled for, or `None`
    /// when the input equals the settled value: the pending update (if any)
    /// is discarded and no timer is needed, since the exposed value is
    /// already correct.
    pub fn submit(&mut self, value: T) -> Option<u64> {
        self.generation += 1;
        if value == self.settled {
            self.pending = None;
            return None;
        }
        self.pending = Some(value);
        Some(self.generation)
    }

    /// Reports a timer expiration for `generation`.
    ///
    /// Commits the pending value and returns `true` only when the generation
    /// is still current; stale and cancelled timers return `false` and leave
    /// the settled value untouched.
    pub fn fire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.pending.take() {
            Some(value) => {
                self.settled = value;
                true
            }
            None => false,
        }
    }

    /// Teardown: discards the pending value and invalidates every
    /// outstanding timer. No update fires after this.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Replaces the settled value immediately, bypassing the delay, and
    /// invalidates outstanding timers. Used when the input is reset by an
    /// explicit action (clearing the search) rather than by typing.
    pub fn force(&mut self, value: T) {
        self.generation += 1;
        self.pending = None;
        self.settled = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_starts_at_initial_input() {
        let debouncer = Debouncer::new("seed".to_string());
        assert_eq!(debouncer.settled(), "seed");
    }

    #[test]
    fn commits_only_after_a_quiet_period() {
        // Inputs at t=0, 50, 100 with a 300ms delay: timers expire at
        // t=300, 350 and 400; only the last commits, and only to the final
        // value; intermediates are never exposed.
        let mut debouncer = Debouncer::new(String::new());

        let t0 = debouncer.submit("a".to_string()).unwrap();
        let t50 = debouncer.submit("ab".to_string()).unwrap();
        let t100 = debouncer.submit("abc".to_string()).unwrap();

        assert!(!debouncer.fire(t0));
        assert_eq!(debouncer.settled(), "");
        assert!(!debouncer.fire(t50));
        assert_eq!(debouncer.settled(), "");

        assert!(debouncer.fire(t100));
        assert_eq!(debouncer.settled(), "abc");
    }

    #[test]
    fn resubmitting_the_settled_value_discards_the_pending_update() {
        let mut debouncer = Debouncer::new(String::new());

        let pending = debouncer.submit("x".to_string()).unwrap();
        // Backspace returns the input to the settled value before the timer
        // expires: nothing left to commit.
        assert_eq!(debouncer.submit(String::new()), None);

        assert!(!debouncer.fire(pending));
        assert_eq!(debouncer.settled(), "");
    }

    #[test]
    fn cancel_prevents_any_later_commit() {
        let mut debouncer = Debouncer::new(String::new());

        let pending = debouncer.submit("gone".to_string()).unwrap();
        debouncer.cancel();

        assert!(!debouncer.fire(pending));
        assert_eq!(debouncer.settled(), "");
    }

    #[test]
    fn fire_is_one_shot_per_generation() {
        let mut debouncer = Debouncer::new(0u32);

        let generation = debouncer.submit(7).unwrap();
        assert!(debouncer.fire(generation));
        assert!(!debouncer.fire(generation));
        assert_eq!(*debouncer.settled(), 7);
    }

    #[test]
    fn force_settles_immediately() {
        let mut debouncer = Debouncer::new("old".to_string());

        let pending = debouncer.submit("typed".to_string()).unwrap();
        debouncer.force("reset".to_string());

        assert_eq!(debouncer.settled(), "reset");
        assert!(!debouncer.fire(pending));
    }
}
