//! Cooperative wall-clock deadline.
//!
//! Search loops call [`Deadline::expired`] at the top of each iteration;
//! there is no preemption.

use std::time::{Duration, Instant};

/// A start instant and an optional time budget.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_facility::deadline::Deadline;
///
/// let unbounded = Deadline::unbounded();
/// assert!(!unbounded.expired());
/// assert_eq!(unbounded.remaining(), None);
///
/// let spent = Deadline::new(Duration::ZERO);
/// assert!(spent.expired());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    /// Starts the clock now with the given budget.
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit: Some(limit),
        }
    }

    /// Starts the clock now without a budget.
    pub fn unbounded() -> Self {
        Self {
            start: Instant::now(),
            limit: None,
        }
    }

    /// Budget in seconds, as found in solver configurations.
    ///
    /// `None`, negative, or non-finite values give an unbounded deadline.
    pub fn from_secs(secs: Option<f64>) -> Self {
        match secs.and_then(|s| Duration::try_from_secs_f64(s).ok()) {
            Some(limit) => Self::new(limit),
            None => Self::unbounded(),
        }
    }

    /// Returns `true` once the budget is spent.
    #[inline]
    pub fn expired(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.start.elapsed() >= limit)
    }

    /// Time since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left, or `None` if unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.limit
            .map(|limit| limit.saturating_sub(self.start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_expires() {
        let d = Deadline::unbounded();
        assert!(!d.expired());
        assert!(d.remaining().is_none());
    }

    #[test]
    fn test_expired_after_limit() {
        let mut d = Deadline::new(Duration::from_millis(10));
        d.start = Instant::now() - Duration::from_millis(50);
        assert!(d.expired());
        assert_eq!(d.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_not_expired_before_limit() {
        let d = Deadline::new(Duration::from_secs(3600));
        assert!(!d.expired());
        assert!(d.remaining().expect("bounded") > Duration::from_secs(3500));
    }

    #[test]
    fn test_from_secs() {
        assert!(Deadline::from_secs(None).remaining().is_none());
        assert!(Deadline::from_secs(Some(-1.0)).remaining().is_none());
        assert!(Deadline::from_secs(Some(f64::NAN)).remaining().is_none());
        assert!(Deadline::from_secs(Some(60.0)).remaining().is_some());
    }
}
