use embassy_time::{Duration, Instant};

/// Rate limiter for level steps
///
/// Time spent in a fading state is cut into windows of one `period` each.
/// [`FadeTicker::poll`] reports `true` at most once per window, no matter how
/// often the host loop calls it, so the fade speed does not depend on the
/// loop frequency. Missed windows are not caught up.
#[derive(Debug, Clone, Copy)]
pub struct FadeTicker {
    period: Duration,
    started_at: Instant,
    window: u64,
}

impl FadeTicker {
    /// Create a new ticker starting at `now`
    pub const fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            started_at: now,
            window: 0,
        }
    }

    /// Restart counting windows from `now`
    pub const fn restart(&mut self, now: Instant) {
        self.started_at = now;
        self.window = 0;
    }

    /// Check whether a new window has been entered since the last step
    pub fn poll(&mut self, now: Instant) -> bool {
        let period = self.period.as_millis().max(1);
        let elapsed = now.as_millis().saturating_sub(self.started_at.as_millis());
        let window = elapsed / period;
        if window <= self.window {
            return false;
        }
        self.window = window;
        true
    }
}
