//! Raw input arriving from the rendering surface.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Positive = scrolling down (towards the next page)
    pub delta_y: f64,
    pub target: ElementId,
    #[serde(with = "crate::time::millis", default)]
    pub timestamp: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Active touches on start/move, changed touches on end
    pub touches: Vec<TouchPoint>,
    pub target: ElementId,
    #[serde(with = "crate::time::millis", default)]
    pub timestamp: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub target: ElementId,
    #[serde(with = "crate::time::millis", default)]
    pub timestamp: Duration,
}

/// One input event; events on the same channel arrive in timestamp order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Wheel(WheelEvent),
    TouchStart(TouchEvent),
    TouchMove(TouchEvent),
    TouchEnd(TouchEvent),
    Click(ClickEvent),
}

impl InputEvent {
    pub fn wheel(delta_y: f64, target: ElementId, timestamp: Duration) -> Self {
        Self::Wheel(WheelEvent {
            delta_y,
            target,
            timestamp,
        })
    }

    pub fn touch_start(x: f64, y: f64, target: ElementId, timestamp: Duration) -> Self {
        Self::TouchStart(TouchEvent {
            touches: vec![TouchPoint::new(x, y)],
            target,
            timestamp,
        })
    }

    pub fn touch_move(x: f64, y: f64, target: ElementId, timestamp: Duration) -> Self {
        Self::TouchMove(TouchEvent {
            touches: vec![TouchPoint::new(x, y)],
            target,
            timestamp,
        })
    }

    pub fn touch_end(x: f64, y: f64, target: ElementId, timestamp: Duration) -> Self {
        Self::TouchEnd(TouchEvent {
            touches: vec![TouchPoint::new(x, y)],
            target,
            timestamp,
        })
    }

    pub fn click(target: ElementId, timestamp: Duration) -> Self {
        Self::Click(ClickEvent { target, timestamp })
    }

    pub fn timestamp(&self) -> Duration {
        match self {
            Self::Wheel(e) => e.timestamp,
            Self::TouchStart(e) | Self::TouchMove(e) | Self::TouchEnd(e) => e.timestamp,
            Self::Click(e) => e.timestamp,
        }
    }

    /// Restamp the event, e.g. with the receiving clock's time
    pub fn set_timestamp(&mut self, timestamp: Duration) {
        match self {
            Self::Wheel(e) => e.timestamp = timestamp,
            Self::TouchStart(e) | Self::TouchMove(e) | Self::TouchEnd(e) => e.timestamp = timestamp,
            Self::Click(e) => e.timestamp = timestamp,
        }
    }

    pub fn target(&self) -> ElementId {
        match self {
            Self::Wheel(e) => e.target,
            Self::TouchStart(e) | Self::TouchMove(e) | Self::TouchEnd(e) => e.target,
            Self::Click(e) => e.target,
        }
    }
}

/// Discrete navigation intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Go to the next page
    Advance,
    /// Go to the previous page
    Retreat,
}

/// What the surface should do with the event's default behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Suppress native scrolling
    Consume,
    /// Let native scrolling proceed
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub intent: Option<Intent>,
    pub disposition: Disposition,
}

impl Classification {
    pub fn emit(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            disposition: Disposition::Consume,
        }
    }

    pub fn absorb() -> Self {
        Self {
            intent: None,
            disposition: Disposition::Consume,
        }
    }

    pub fn pass() -> Self {
        Self {
            intent: None,
            disposition: Disposition::PassThrough,
        }
    }
}
