/// Most periods an interval will catch up on in a single frame.
const MAX_CATCH_UP: u32 = 10;

/// Repeating timer driven by frame timestamps (milliseconds).
/// Replaces host `setInterval` handles: stopping it is dropping it.
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: f64,
    /// Timestamp of the next firing.
    next_ms: f64,
}

impl Interval {
    /// Start an interval whose first firing is one period after `now_ms`.
    pub fn new(period_ms: f64, now_ms: f64) -> Self {
        Self {
            period_ms,
            next_ms: now_ms + period_ms,
        }
    }

    /// Number of periods elapsed up to `now_ms`.
    /// Capped so a stalled tab does not produce a burst of firings.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        if self.period_ms <= 0.0 || now_ms < self.next_ms {
            return 0;
        }
        let due = ((now_ms - self.next_ms) / self.period_ms).floor() as u32 + 1;
        self.next_ms += due as f64 * self.period_ms;
        due.min(MAX_CATCH_UP)
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }
}

/// One-shot timer driven by frame timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadline {
    at_ms: f64,
}

impl Deadline {
    pub fn after(delay_ms: f64, now_ms: f64) -> Self {
        Self { at_ms: now_ms + delay_ms.max(0.0) }
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms >= self.at_ms
    }

    pub fn at_ms(&self) -> f64 {
        self.at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut interval = Interval::new(50.0, 1000.0);
        assert_eq!(interval.poll(1049.0), 0);
        assert_eq!(interval.poll(1050.0), 1);
        assert_eq!(interval.poll(1060.0), 0);
        assert_eq!(interval.poll(1100.0), 1);
    }

    #[test]
    fn accumulates_missed_periods() {
        let mut interval = Interval::new(50.0, 0.0);
        assert_eq!(interval.poll(175.0), 3);
        assert_eq!(interval.poll(199.0), 0);
        assert_eq!(interval.poll(200.0), 1);
    }

    #[test]
    fn caps_catch_up() {
        let mut interval = Interval::new(50.0, 0.0);
        assert_eq!(interval.poll(10_000.0), 10);
        // Schedule moved past the stall, not replayed later.
        assert_eq!(interval.poll(10_010.0), 0);
    }

    #[test]
    fn deadline_is_due_at_its_time() {
        let deadline = Deadline::after(300.0, 100.0);
        assert!(!deadline.is_due(399.9));
        assert!(deadline.is_due(400.0));
        assert!(Deadline::after(0.0, 5.0).is_due(5.0));
    }
}
