// src/timer.rs

use std::time::{Duration, Instant};

/// Coalesces bursts of events: each `schedule` replaces the pending value
/// and pushes the deadline back, so only the last one fires once the burst
/// has been quiet for `wait`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.wait, value));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// The pending value once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((at, _)) if *at <= now);
        if due {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Earliest of several optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_fires_once_with_the_last_value() {
        let start = Instant::now();
        let wait = Duration::from_millis(150);
        let mut debouncer = Debouncer::new(wait);

        debouncer.schedule(1, start);
        debouncer.schedule(2, start + Duration::from_millis(100));
        debouncer.schedule(3, start + Duration::from_millis(200));

        assert_eq!(debouncer.take_due(start + Duration::from_millis(300)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(350))
        );
        assert_eq!(debouncer.take_due(start + Duration::from_millis(350)), Some(3));
        assert_eq!(debouncer.take_due(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn cancel_drops_the_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.schedule("resize", start);
        debouncer.cancel();
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn earliest_ignores_missing_deadlines() {
        let start = Instant::now();
        let later = start + Duration::from_secs(1);
        assert_eq!(earliest([None, Some(later), Some(start)]), Some(start));
        assert_eq!(earliest([None, None]), None);
    }
}
