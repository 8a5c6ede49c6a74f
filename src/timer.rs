use std::time::Duration;

// --- Frame-driven timers: the owner calls tick(dt) once per frame ---

/// A periodic timer. At most one period is tracked per instance, so re-arming
/// replaces the pending fire instead of adding a second one.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
    armed: bool,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period, elapsed: Duration::ZERO, armed: false }
    }

    /// Arms the timer; the next fire is one full period from now.
    pub fn arm(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advances the timer and returns how many periods completed.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        if !self.armed || self.period.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// A one-shot timer.
#[derive(Debug, Clone, Default)]
pub struct Timeout {
    remaining: Option<Duration>,
}

impl Timeout {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts the countdown, replacing any pending one.
    pub fn arm(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Returns true exactly once, on the tick where the delay runs out.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(left) if dt >= left => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn unarmed_interval_never_fires() {
        let mut interval = Interval::new(ms(100));
        assert_eq!(interval.tick(ms(1000)), 0);
    }

    #[test]
    fn interval_fires_once_per_period() {
        let mut interval = Interval::new(ms(100));
        interval.arm();
        assert_eq!(interval.tick(ms(99)), 0);
        assert_eq!(interval.tick(ms(1)), 1);
        assert_eq!(interval.tick(ms(250)), 2);
        assert_eq!(interval.tick(ms(50)), 1);
    }

    #[test]
    fn rearming_restarts_the_period() {
        let mut interval = Interval::new(ms(100));
        interval.arm();
        interval.tick(ms(90));
        interval.arm();
        assert_eq!(interval.tick(ms(90)), 0);
        assert_eq!(interval.tick(ms(10)), 1);
    }

    #[test]
    fn cancelled_interval_stops() {
        let mut interval = Interval::new(ms(100));
        interval.arm();
        interval.cancel();
        assert!(!interval.is_armed());
        assert_eq!(interval.tick(ms(500)), 0);
    }

    #[test]
    fn timeout_fires_exactly_once() {
        let mut timeout = Timeout::new();
        timeout.arm(ms(300));
        assert!(!timeout.tick(ms(200)));
        assert!(timeout.is_pending());
        assert!(timeout.tick(ms(100)));
        assert!(!timeout.is_pending());
        assert!(!timeout.tick(ms(1000)));
    }

    #[test]
    fn cancelled_timeout_never_fires() {
        let mut timeout = Timeout::new();
        timeout.arm(ms(300));
        timeout.cancel();
        assert!(!timeout.tick(ms(1000)));
    }
}
