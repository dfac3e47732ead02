//! Poll-driven timers.
//!
//! Nothing runs in the background: owners call `poll` with the host's clock
//! on every frame, and dropping or cancelling a timer is the whole teardown.

use std::time::{Duration, Instant};

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Debug)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period: period.max(MIN_PERIOD), next_due: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Schedules the first firing one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of periods that elapsed since the previous poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };

        if now < due {
            return 0;
        }

        let behind = now.duration_since(due).as_nanos() / self.period.as_nanos();
        let fired = u32::try_from(behind).unwrap_or(u32::MAX - 1) + 1;
        self.next_due = Some(due + self.period * fired);
        fired
    }
}

#[derive(Clone, Debug, Default)]
pub struct Timeout {
    deadline: Option<Instant>,
}

impl Timeout {
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn interval_counts_missed_periods() {
        let start = Instant::now();
        let mut interval = Interval::new(10 * MS);
        assert_eq!(interval.poll(start + 50 * MS), 0, "not started");

        interval.start(start);
        assert_eq!(interval.poll(start + 9 * MS), 0);
        assert_eq!(interval.poll(start + 10 * MS), 1);
        assert_eq!(interval.poll(start + 15 * MS), 0);
        assert_eq!(interval.poll(start + 45 * MS), 3);
        assert_eq!(interval.poll(start + 50 * MS), 1);
    }

    #[test]
    fn cancelled_interval_stops_firing() {
        let start = Instant::now();
        let mut interval = Interval::new(10 * MS);
        interval.start(start);
        interval.cancel();
        assert!(!interval.is_active());
        assert_eq!(interval.poll(start + 100 * MS), 0);
    }

    #[test]
    fn zero_period_is_clamped() {
        assert_eq!(Interval::new(Duration::ZERO).period(), MIN_PERIOD);
    }

    #[test]
    fn timeout_fires_once() {
        let start = Instant::now();
        let mut timeout = Timeout::default();
        assert!(!timeout.poll(start));

        timeout.arm(start, 80 * MS);
        assert!(!timeout.poll(start + 79 * MS));
        assert!(timeout.poll(start + 80 * MS));
        assert!(!timeout.poll(start + 200 * MS));
        assert!(!timeout.is_armed());
    }
}
