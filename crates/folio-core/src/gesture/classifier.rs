//! Turns noisy wheel/touch/click streams into discrete page intents.
//!
//! # Rules
//!
//! - Outside nested scroll regions a single wheel delta above the page-level
//!   threshold is enough.
//! - Inside a nested region the region must sit at the edge being scrolled
//!   towards, the gesture must have *started* at that same edge, and the delta must
//!   clear the stronger threshold. Partial matches are absorbed (native overscroll
//!   suppressed) without emitting; a region that is scrolling freely keeps its
//!   native scroll.
//! - Touch swipes must be mostly vertical, long enough and fast enough. Swipes that
//!   begin inside a nested region are only tracked when the region starts at an
//!   edge, and are dropped once the region itself scrolls.
//! - A click on the gesture container always means Advance.
//!
//! Every channel is gated by the shared [`CooldownClock`] and by an in-progress
//! transition.

use std::time::Duration;

use tracing::debug;

use crate::config::GestureConfig;
use crate::geometry::{ElementId, GeometryProvider, ScrollMetrics};

use super::cooldown::CooldownClock;
use super::event::{Classification, ClickEvent, Intent, InputEvent, TouchEvent, TouchPoint, WheelEvent};

/// Wheel gesture inside one nested region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGesture {
    pub region: ElementId,
    /// Region offset when the gesture began
    pub start_offset: f64,
    pub last_event: Duration,
}

/// Region state captured when a touch began inside it
#[derive(Debug, Clone, Copy, PartialEq)]
struct RegionStart {
    region: ElementId,
    offset: f64,
    at_top: bool,
    at_bottom: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchGesture {
    start: TouchPoint,
    start_time: Duration,
    region: Option<RegionStart>,
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    /// Element whose direct clicks mean "continue"
    container: ElementId,
    cooldown: CooldownClock,
    wheel: Option<WheelGesture>,
    touch: Option<TouchGesture>,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig, container: ElementId) -> Self {
        let cooldown = CooldownClock::new(config.cooldown_window());
        Self {
            config,
            container,
            cooldown,
            wheel: None,
            touch: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn cooldown(&self) -> &CooldownClock {
        &self.cooldown
    }

    /// Active wheel gesture, if one is being tracked
    pub fn wheel_gesture(&self) -> Option<&WheelGesture> {
        self.wheel.as_ref()
    }

    pub fn is_tracking_touch(&self) -> bool {
        self.touch.is_some()
    }

    /// Classify one event. `transition_active` blocks emission the same way an
    /// unexpired cooldown does.
    pub fn classify<G: GeometryProvider + ?Sized>(
        &mut self,
        event: &InputEvent,
        geometry: &G,
        transition_active: bool,
    ) -> Classification {
        let result = match event {
            InputEvent::Wheel(wheel) => self.classify_wheel(wheel, geometry, transition_active),
            InputEvent::TouchStart(touch) => self.touch_start(touch, geometry),
            InputEvent::TouchMove(touch) => self.touch_move(touch, geometry),
            InputEvent::TouchEnd(touch) => self.touch_end(touch, geometry, transition_active),
            InputEvent::Click(click) => self.classify_click(click, transition_active),
        };

        if result.intent.is_some() {
            self.cooldown.mark(event.timestamp());
            // any fired transition ends the tracked gestures
            self.wheel = None;
            self.touch = None;
        }

        result
    }

    /// Drop all gesture state and forget the last fired transition
    pub fn reset(&mut self) {
        self.wheel = None;
        self.touch = None;
        self.cooldown.reset();
    }

    #[inline]
    fn gate_open(&self, now: Duration, transition_active: bool) -> bool {
        !transition_active && self.cooldown.elapsed(now)
    }

    fn classify_wheel<G: GeometryProvider + ?Sized>(
        &mut self,
        event: &WheelEvent,
        geometry: &G,
        transition_active: bool,
    ) -> Classification {
        let nested = geometry
            .scroll_region_of(event.target)
            .and_then(|region| geometry.scroll_metrics(region).map(|m| (region, m)));

        match nested {
            Some((region, metrics)) => {
                self.classify_nested_wheel(event, region, metrics, transition_active)
            }
            None => self.classify_page_wheel(event, transition_active),
        }
    }

    fn classify_page_wheel(&mut self, event: &WheelEvent, transition_active: bool) -> Classification {
        if event.delta_y.abs() <= self.config.page_level_threshold {
            return Classification::pass();
        }

        if !self.gate_open(event.timestamp, transition_active) {
            debug!(delta_y = event.delta_y, "Page wheel absorbed: cooldown or transition active");
            return Classification::absorb();
        }

        Classification::emit(intent_for_delta(event.delta_y))
    }

    fn classify_nested_wheel(
        &mut self,
        event: &WheelEvent,
        region: ElementId,
        metrics: ScrollMetrics,
        transition_active: bool,
    ) -> Classification {
        let gap = self.config.gesture_gap();
        let is_new = match self.wheel {
            None => true,
            Some(g) => g.region != region || event.timestamp.saturating_sub(g.last_event) > gap,
        };

        if is_new {
            self.wheel = Some(WheelGesture {
                region,
                start_offset: metrics.offset,
                last_event: event.timestamp,
            });
        }

        let Some(gesture) = self.wheel.as_mut() else {
            return Classification::pass();
        };
        gesture.last_event = event.timestamp;
        let start_offset = gesture.start_offset;

        if event.delta_y == 0.0 {
            return Classification::pass();
        }

        let tolerance = self.config.boundary_tolerance;
        let scrolling_down = event.delta_y > 0.0;
        let (at_edge, started_at_edge) = if scrolling_down {
            (
                metrics.at_bottom(tolerance),
                metrics.offset_at_bottom(start_offset, tolerance),
            )
        } else {
            (
                metrics.at_top(tolerance),
                ScrollMetrics::offset_at_top(start_offset, tolerance),
            )
        };

        if !at_edge {
            // region still has room to scroll; leave it to the native scroll
            return Classification::pass();
        }

        let strong = event.delta_y.abs() > self.config.strong_scroll_threshold;
        if started_at_edge && strong && self.gate_open(event.timestamp, transition_active) {
            return Classification::emit(intent_for_delta(event.delta_y));
        }

        debug!(
            region = %region,
            delta_y = event.delta_y,
            start_offset,
            started_at_edge,
            strong,
            "Nested wheel absorbed at boundary"
        );
        Classification::absorb()
    }

    fn touch_start<G: GeometryProvider + ?Sized>(
        &mut self,
        event: &TouchEvent,
        geometry: &G,
    ) -> Classification {
        self.touch = None;

        let [start] = event.touches.as_slice() else {
            // multi-touch is never a page swipe
            return Classification::pass();
        };

        let region = match geometry.scroll_region_of(event.target) {
            None => None,
            Some(region) => {
                let Some(metrics) = geometry.scroll_metrics(region) else {
                    return Classification::pass();
                };
                let tolerance = self.config.boundary_tolerance;
                let state = RegionStart {
                    region,
                    offset: metrics.offset,
                    at_top: metrics.at_top(tolerance),
                    at_bottom: metrics.at_bottom(tolerance),
                };
                if !state.at_top && !state.at_bottom {
                    return Classification::pass();
                }
                Some(state)
            }
        };

        self.touch = Some(TouchGesture {
            start: *start,
            start_time: event.timestamp,
            region,
        });
        Classification::pass()
    }

    fn touch_move<G: GeometryProvider + ?Sized>(
        &mut self,
        _event: &TouchEvent,
        geometry: &G,
    ) -> Classification {
        let Some(RegionStart { region, offset, .. }) = self.touch.and_then(|t| t.region) else {
            return Classification::pass();
        };

        let moved = geometry
            .scroll_metrics(region)
            .map(|m| (m.offset - offset).abs())
            .unwrap_or(0.0);

        if moved > self.config.container_absorb_distance {
            debug!(region = %region, moved, "Touch gesture absorbed by scroll region");
            self.touch = None;
        }

        Classification::pass()
    }

    fn touch_end<G: GeometryProvider + ?Sized>(
        &mut self,
        event: &TouchEvent,
        geometry: &G,
        transition_active: bool,
    ) -> Classification {
        let Some(gesture) = self.touch.take() else {
            return Classification::pass();
        };
        let Some(end) = event.touches.first() else {
            return Classification::pass();
        };

        let delta_x = end.x - gesture.start.x;
        let delta_y = end.y - gesture.start.y;
        let elapsed = event.timestamp.saturating_sub(gesture.start_time);

        let min_distance = if gesture.region.is_some() {
            self.config.min_swipe_distance_nested
        } else {
            self.config.min_swipe_distance_page_level
        };

        let is_swipe = delta_y.abs() > delta_x.abs()
            && delta_y.abs() > min_distance
            && elapsed < self.config.max_swipe_time();
        if !is_swipe {
            return Classification::pass();
        }

        // finger moving up pulls the next page in
        let intent = if delta_y < 0.0 {
            Intent::Advance
        } else {
            Intent::Retreat
        };

        if let Some(start) = gesture.region {
            let tolerance = self.config.boundary_tolerance;
            let Some(metrics) = geometry.scroll_metrics(start.region) else {
                return Classification::pass();
            };
            let holds = match intent {
                Intent::Advance => start.at_bottom && metrics.at_bottom(tolerance),
                Intent::Retreat => start.at_top && metrics.at_top(tolerance),
            };
            if !holds {
                debug!(region = %start.region, ?intent, "Swipe ignored: region not at matching edge");
                return Classification::pass();
            }
        }

        if !self.gate_open(event.timestamp, transition_active) {
            debug!(?intent, "Swipe ignored: cooldown or transition active");
            return Classification::pass();
        }

        Classification::emit(intent)
    }

    fn classify_click(&mut self, event: &ClickEvent, transition_active: bool) -> Classification {
        if event.target != self.container {
            return Classification::pass();
        }
        if !self.gate_open(event.timestamp, transition_active) {
            return Classification::pass();
        }
        Classification::emit(Intent::Advance)
    }
}

#[inline]
fn intent_for_delta(delta_y: f64) -> Intent {
    if delta_y > 0.0 {
        Intent::Advance
    } else {
        Intent::Retreat
    }
}
