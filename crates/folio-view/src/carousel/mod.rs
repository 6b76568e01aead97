mod emphasis;
mod engine;
pub mod layout;
mod state;

pub use emphasis::Emphasis;
pub use engine::{CarouselEngine, CarouselEvent, SelectOutcome};
pub use state::{Card, CarouselSnapshot, CarouselState, ScrollOwner};
