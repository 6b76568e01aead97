//! Viewport geometry capability.
//!
//! Classification and carousel centering only ever ask a handful of questions
//! about the rendering surface. They are collected in [`GeometryProvider`] so the
//! engines can run against [`SimulatedSurface`] in tests and trace replay.

mod sim;

pub use sim::SimulatedSurface;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to an element on the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Vertical extent of an element in the content coordinates of its scroll region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Scroll state of an independently scrollable region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Current scroll offset (scrollTop)
    pub offset: f64,
    /// Visible height of the region (clientHeight)
    pub viewport: f64,
    /// Total height of the scrolled content (scrollHeight)
    pub content: f64,
}

impl ScrollMetrics {
    pub fn new(offset: f64, viewport: f64, content: f64) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    /// Largest reachable offset
    #[inline]
    pub fn max_scroll(&self) -> f64 {
        (self.content - self.viewport).max(0.0)
    }

    #[inline]
    pub fn at_top(&self, tolerance: f64) -> bool {
        Self::offset_at_top(self.offset, tolerance)
    }

    #[inline]
    pub fn at_bottom(&self, tolerance: f64) -> bool {
        self.offset_at_bottom(self.offset, tolerance)
    }

    #[inline]
    pub fn offset_at_top(offset: f64, tolerance: f64) -> bool {
        offset <= tolerance
    }

    /// Whether `offset` would sit at the bottom edge of this region
    #[inline]
    pub fn offset_at_bottom(&self, offset: f64, tolerance: f64) -> bool {
        offset + self.viewport >= self.content - tolerance
    }

    #[inline]
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll())
    }
}

pub trait GeometryProvider {
    /// Nearest independently scrollable region containing `target` (the target
    /// itself included). `None` means the target sits directly on the page.
    fn scroll_region_of(&self, target: ElementId) -> Option<ElementId>;

    /// Scroll state of a region, `None` if it is not mounted
    fn scroll_metrics(&self, region: ElementId) -> Option<ScrollMetrics>;

    /// Bounds of an element, `None` if it is not mounted yet
    fn bounds(&self, element: ElementId) -> Option<Rect>;

    /// Jump a region to `offset`
    fn set_scroll_offset(&mut self, region: ElementId, offset: f64);

    /// Start a native smooth scroll. Returns false when unsupported, in which case
    /// the caller animates the offset itself.
    fn smooth_scroll_to(&mut self, _region: ElementId, _offset: f64) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll() {
        let metrics = ScrollMetrics::new(0.0, 900.0, 1516.0);
        assert_eq!(metrics.max_scroll(), 616.0);
        assert_eq!(ScrollMetrics::new(0.0, 900.0, 300.0).max_scroll(), 0.0);
    }

    #[test]
    fn test_boundaries() {
        let metrics = ScrollMetrics::new(0.5, 600.0, 1200.0);
        assert!(metrics.at_top(1.0));
        assert!(!metrics.at_bottom(1.0));

        let bottom = ScrollMetrics::new(599.5, 600.0, 1200.0);
        assert!(bottom.at_bottom(1.0));
        assert!(!bottom.at_top(1.0));
    }

    #[test]
    fn test_clamp() {
        let metrics = ScrollMetrics::new(0.0, 600.0, 1000.0);
        assert_eq!(metrics.clamp(-20.0), 0.0);
        assert_eq!(metrics.clamp(999.0), 400.0);
        assert_eq!(metrics.clamp(123.0), 123.0);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(304.0, 300.0);
        assert_eq!(rect.center(), 454.0);
        assert_eq!(rect.bottom(), 604.0);
    }
}
