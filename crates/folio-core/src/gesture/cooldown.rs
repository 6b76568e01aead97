use std::time::Duration;

/// Timestamp of the last fired transition, shared by every input channel
#[derive(Debug, Clone)]
pub struct CooldownClock {
    window: Duration,
    last_fired: Option<Duration>,
}

impl CooldownClock {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: None,
        }
    }

    /// True when no transition fired within the window before `now`
    #[inline]
    pub fn elapsed(&self, now: Duration) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.window,
        }
    }

    pub fn mark(&mut self, now: Duration) {
        self.last_fired = Some(now);
    }

    pub fn last_fired(&self) -> Option<Duration> {
        self.last_fired
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}
