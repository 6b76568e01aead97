//! Scroll animation controller.
//!
//! Combines easing functions and timing helpers to interpolate a region's scroll
//! offset frame by frame.

use std::time::Duration;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Duration,
    /// Starting scroll offset
    from: f64,
    /// Target scroll offset
    to: f64,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// Scroll animation controller
///
/// Call `scroll_to()` to begin an animation, then `update()` each frame to get
/// the current interpolated offset.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Configuration
    config: ScrollConfig,
    /// Current scroll offset (always up-to-date)
    current: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
        }
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final offset once the animation completes
    pub fn target(&self) -> f64 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Time at which the active animation ends
    pub fn finishes_at(&self) -> Option<Duration> {
        self.animation.as_ref().map(|a| a.start + a.duration)
    }

    /// Set offset immediately (no animation)
    pub fn set_offset(&mut self, offset: f64) {
        self.animation = None;
        self.current = offset;
    }

    /// Start an animation from the current offset to `target`
    ///
    /// Jumps immediately when smooth scrolling is disabled or the distance is
    /// below `min_distance`. Returns whether an animation was started.
    pub fn scroll_to(&mut self, target: f64, max_scroll: f64, now: Duration) -> bool {
        let target = target.clamp(0.0, max_scroll.max(0.0));
        let from = self.current;

        if !self.config.should_animate(target - from) {
            self.current = target;
            self.animation = None;
            return false;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
        true
    }

    /// Advance the animation to `now` and return the current offset
    pub fn update(&mut self, max_scroll: f64, now: Duration) -> f64 {
        let max_scroll = max_scroll.max(0.0);
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration, now);
                let eased_t = anim.easing.apply(t);
                self.current = lerp(anim.from, anim.to, eased_t).clamp(0.0, max_scroll);
            }
        }

        self.current
    }

    /// Cancel any active animation and stop at the current offset
    pub fn cancel(&mut self) {
        self.animation = None;
    }

    pub fn reset(&mut self) {
        self.animation = None;
        self.current = 0.0;
    }
}
