use serde::{Deserialize, Serialize};

use folio_core::geometry::ElementId;
use folio_core::gesture::{InputEvent, Intent};
use folio_core::pages::PageId;
use folio_core::transition::NavigatorEvent;

use crate::carousel::CarouselEvent;

/// Notifications emitted by a [`Session`](crate::Session)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionEvent {
    Navigation(NavigatorEvent),
    Carousel(CarouselEvent),
}

impl From<NavigatorEvent> for SessionEvent {
    fn from(event: NavigatorEvent) -> Self {
        Self::Navigation(event)
    }
}

impl From<CarouselEvent> for SessionEvent {
    fn from(event: CarouselEvent) -> Self {
        Self::Carousel(event)
    }
}

/// One instruction for a session, as read from traces and stdin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Raw wheel/touch/click input
    Input { event: InputEvent },
    /// The user scrolled a region to `offset`
    Scroll { region: ElementId, offset: f64 },
    /// External selection of a card on the current page
    Select { card: String },
    /// Explicit (menu) navigation
    Navigate { page: PageId },
    /// Intent from a non-gesture source such as a key binding
    Intent { intent: Intent },
}
