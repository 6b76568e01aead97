//! Derived timing values for pixel scroll animation.

use std::time::Duration;

pub use folio_core::{EasingType, ScrollConfig};

/// Frame interval used when `animation_fps` is zero
const FALLBACK_FRAME: Duration = Duration::from_millis(16);

pub trait ScrollConfigExt {
    /// Length of one scroll animation
    fn animation_duration(&self) -> Duration;

    /// Interval between animation frames
    fn frame_interval(&self) -> Duration;

    /// Whether a scroll covering `distance` pixels should be animated
    /// rather than applied in one write
    fn should_animate(&self, distance: f64) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    fn frame_interval(&self) -> Duration {
        match self.animation_fps {
            0 => FALLBACK_FRAME,
            fps => Duration::from_millis(1000 / u64::from(fps)).max(Duration::from_millis(1)),
        }
    }

    fn should_animate(&self, distance: f64) -> bool {
        self.smooth_enabled
            && self.animation_duration_ms > 0
            && self.easing != EasingType::None
            && distance.abs() >= self.min_distance
    }
}
