//! Progress and interpolation helpers for scroll animations.
//!
//! Times are engine timestamps (`Duration` since the clock epoch), so the same
//! animation replays identically under a manual clock.

use std::time::Duration;

/// Animation progress in [0.0, 1.0] at `now`
#[inline]
pub fn progress(start: Duration, duration: Duration, now: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete at `now`
#[inline]
pub fn is_complete(start: Duration, duration: Duration, now: Duration) -> bool {
    now.saturating_sub(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
