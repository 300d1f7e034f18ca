//! Cooperative cancellation for long running searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A flag checked by searches to determine whether they should stop early.
///
/// The flag can be raised from any thread. An interrupt made with a time limit also counts as
/// raised once the limit has elapsed since it was made.
#[derive(Debug, Default)]
pub struct Interrupt {
    raised: AtomicBool,
    deadline: Option<Instant>,
}

impl Interrupt {
    /// Create an interrupt that is only raised through [`Interrupt::raise`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interrupt that is raised once `time_limit` has elapsed from now.
    #[must_use]
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            raised: AtomicBool::new(false),
            // a limit too far out to represent never elapses
            deadline: Instant::now().checked_add(time_limit),
        }
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn starts_clear() {
        assert!(!Interrupt::new().is_raised());
        assert!(!Interrupt::with_time_limit(Duration::from_secs(3600)).is_raised());
        assert!(!Interrupt::with_time_limit(Duration::MAX).is_raised());
    }

    #[test]
    fn raises_from_other_thread() {
        let interrupt = Interrupt::new();
        thread::scope(|scope| {
            scope.spawn(|| interrupt.raise());
        });
        assert!(interrupt.is_raised());
    }

    #[test]
    fn raises_after_time_limit() {
        let interrupt = Interrupt::with_time_limit(Duration::ZERO);
        assert!(interrupt.is_raised());
    }
}
