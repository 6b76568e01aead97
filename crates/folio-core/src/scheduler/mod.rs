mod timers;

pub use timers::{Fired, TimerHandle, TimerQueue};
