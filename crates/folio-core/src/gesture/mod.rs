mod classifier;
mod cooldown;
mod event;

pub use classifier::{GestureClassifier, WheelGesture};
pub use cooldown::CooldownClock;
pub use event::{
    Classification, ClickEvent, Disposition, InputEvent, Intent, TouchEvent, TouchPoint, WheelEvent,
};
