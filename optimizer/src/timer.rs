use std::time::Duration;

/// Accumulates phase durations into a running mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerStat {
    total: Duration,
    count: u32,
}

impl TimerStat {
    #[inline]
    pub fn observe(&mut self, elapsed: Duration) {
        self.total += elapsed;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean of all observed durations, zero before the first observation.
    pub fn mean(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total / self.count
        }
    }

    /// Running mean in milliseconds, rounded to three decimals.
    pub fn mean_ms(&self) -> f64 {
        let ms = self.mean().as_secs_f64() * 1000.0;
        (ms * 1000.0).round() / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timer_reports_zero() {
        let timer = TimerStat::default();
        assert_eq!(timer.mean(), Duration::ZERO);
        assert_eq!(timer.mean_ms(), 0.0);
    }

    #[test]
    fn mean_over_observations() {
        let mut timer = TimerStat::default();
        timer.observe(Duration::from_millis(10));
        timer.observe(Duration::from_millis(30));
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.mean(), Duration::from_millis(20));
        assert_eq!(timer.mean_ms(), 20.0);
    }

    #[test]
    fn mean_ms_rounds_to_three_decimals() {
        let mut timer = TimerStat::default();
        timer.observe(Duration::from_nanos(1_234_567));
        assert_eq!(timer.mean_ms(), 1.235);
    }
}
