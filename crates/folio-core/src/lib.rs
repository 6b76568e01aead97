pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod navigator;
pub mod pages;
pub mod scheduler;
pub mod time;
pub mod transition;

pub use config::{AppConfig, CarouselConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use navigator::{InputOutcome, NavigateOutcome, Navigator};
pub use pages::{Page, PageCatalog, PageId};
