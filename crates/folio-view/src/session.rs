//! Page navigation plus per-page carousels behind one input surface.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use folio_core::geometry::{ElementId, GeometryProvider};
use folio_core::gesture::{InputEvent, Intent};
use folio_core::pages::PageId;
use folio_core::transition::NavigationSnapshot;
use folio_core::{AppConfig, InputOutcome, NavigateOutcome, Navigator};

use crate::carousel::{Card, CarouselEngine, CarouselSnapshot, SelectOutcome};
use crate::event::{Command, SessionEvent};

/// What applying one [`Command`] did
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Input(InputOutcome),
    /// Whether a carousel accepted the scroll observation
    Scroll(bool),
    Select(SelectOutcome),
    Navigate(NavigateOutcome),
}

/// Output boundary for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub navigation: NavigationSnapshot,
    /// Carousel of the current page, if it has one
    pub carousel: Option<CarouselSnapshot>,
}

pub struct Session<G> {
    config: AppConfig,
    navigator: Navigator,
    carousels: BTreeMap<PageId, CarouselEngine>,
    geometry: G,
    events: Vec<SessionEvent>,
}

impl<G: GeometryProvider> Session<G> {
    pub fn new(config: AppConfig, container: ElementId, geometry: G) -> folio_core::Result<Self> {
        let navigator = Navigator::new(&config, container)?;
        Ok(Self {
            config,
            navigator,
            carousels: BTreeMap::new(),
            geometry,
            events: Vec::new(),
        })
    }

    /// Attach a card carousel living in `region` to `page`
    pub fn add_carousel(&mut self, page: PageId, region: ElementId, items: Vec<Card>) -> folio_core::Result<()> {
        if !self.navigator.catalog().contains(&page) {
            return Err(folio_core::Error::UnknownPage(page.to_string()));
        }
        let engine = CarouselEngine::new(
            self.config.carousel.clone(),
            self.config.scroll.clone(),
            region,
            items,
        );
        self.carousels.insert(page, engine);
        Ok(())
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn carousel(&self, page: &PageId) -> Option<&CarouselEngine> {
        self.carousels.get(page)
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    pub fn apply(&mut self, command: &Command, now: Duration) -> Applied {
        match command {
            Command::Input { event } => Applied::Input(self.handle_input(event)),
            Command::Scroll { region, offset } => {
                // move the region the way the user's scroll would, then observe it
                self.geometry.set_scroll_offset(*region, *offset);
                Applied::Scroll(self.on_scroll(*region, now))
            }
            Command::Select { card } => Applied::Select(self.select_item(card, now)),
            Command::Navigate { page } => Applied::Navigate(self.navigate_to(page, now)),
            Command::Intent { intent } => Applied::Navigate(self.handle_intent(*intent, now)),
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> InputOutcome {
        self.advance(event.timestamp());
        let outcome = self.navigator.handle_input(event, &self.geometry);
        self.record_navigation(&outcome.events);
        outcome
    }

    pub fn handle_intent(&mut self, intent: Intent, now: Duration) -> NavigateOutcome {
        self.advance(now);
        let outcome = self.navigator.handle_intent(intent, now);
        self.record_navigation(&outcome.events);
        outcome
    }

    pub fn navigate_to(&mut self, page: &PageId, now: Duration) -> NavigateOutcome {
        self.advance(now);
        let outcome = self.navigator.navigate_to(page, now);
        self.record_navigation(&outcome.events);
        outcome
    }

    /// Forward a native scroll event to the current page's carousel
    pub fn on_scroll(&mut self, region: ElementId, now: Duration) -> bool {
        self.advance(now);
        let current = self.navigator.current().clone();
        match self.carousels.get_mut(&current) {
            Some(engine) if engine.region() == region => engine.on_scroll(&self.geometry, now),
            _ => {
                debug!(region = %region, page = %current, "Scroll outside any active carousel");
                false
            }
        }
    }

    /// Select a card in the current page's carousel
    pub fn select_item(&mut self, card: &str, now: Duration) -> SelectOutcome {
        self.advance(now);
        let current = self.navigator.current().clone();
        match self.carousels.get_mut(&current) {
            Some(engine) => engine.select_item(card, &mut self.geometry, now),
            None => {
                debug!(page = %current, card, "Selection ignored: page has no carousel");
                SelectOutcome::Unknown
            }
        }
    }

    /// Drive transitions, carousel timers and animation frames up to `now`
    pub fn advance(&mut self, now: Duration) {
        let events = self.navigator.advance(now);
        self.record_navigation(&events);

        for engine in self.carousels.values_mut() {
            engine.advance(&mut self.geometry, now);
            self.events
                .extend(engine.take_events().into_iter().map(SessionEvent::from));
        }
    }

    /// Earliest pending timer across navigation and carousels
    pub fn next_deadline(&self) -> Option<Duration> {
        self.carousels
            .values()
            .filter_map(CarouselEngine::next_deadline)
            .chain(self.navigator.next_deadline())
            .min()
    }

    pub fn needs_frames(&self) -> bool {
        self.carousels.values().any(CarouselEngine::needs_frames)
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            navigation: self.navigator.snapshot(),
            carousel: self
                .carousels
                .get(self.navigator.current())
                .map(|engine| engine.snapshot(&self.geometry)),
        }
    }

    fn record_navigation(&mut self, events: &[folio_core::transition::NavigatorEvent]) {
        self.events
            .extend(events.iter().cloned().map(SessionEvent::from));
    }
}
