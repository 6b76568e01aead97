pub mod carousel;
pub mod event;
pub mod scroll;
pub mod service;
pub mod session;

pub use carousel::{Card, CarouselEngine, CarouselEvent, CarouselSnapshot, ScrollOwner, SelectOutcome};
pub use event::{Command, SessionEvent};
pub use service::SessionService;
pub use session::{Applied, Session, SessionSnapshot};
