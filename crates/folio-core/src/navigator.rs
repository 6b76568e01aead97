//! Wires the gesture classifier to the transition controller.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::geometry::{ElementId, GeometryProvider};
use crate::gesture::{Disposition, GestureClassifier, InputEvent, Intent};
use crate::pages::{PageCatalog, PageId};
use crate::transition::{
    NavigationSnapshot, NavigatorEvent, RejectReason, RequestOutcome, TransitionController,
    TransitionMode,
};

/// Result of feeding one input event
#[derive(Debug, Clone, PartialEq)]
pub struct InputOutcome {
    pub disposition: Disposition,
    pub intent: Option<Intent>,
    /// Navigation request made for the intent, if any
    pub request: Option<RequestOutcome>,
    pub events: Vec<NavigatorEvent>,
}

/// Result of an explicit navigation
#[derive(Debug, Clone, PartialEq)]
pub struct NavigateOutcome {
    pub request: RequestOutcome,
    pub events: Vec<NavigatorEvent>,
}

pub struct Navigator {
    catalog: PageCatalog,
    classifier: GestureClassifier,
    controller: TransitionController,
    event_tx: Option<mpsc::UnboundedSender<NavigatorEvent>>,
}

impl Navigator {
    /// Build from configuration, starting on the first page
    pub fn new(config: &AppConfig, container: ElementId) -> crate::Result<Self> {
        let catalog = config.catalog()?;
        let initial = catalog.first().id.clone();
        Ok(Self {
            classifier: GestureClassifier::new(config.gesture.clone(), container),
            controller: TransitionController::new(config.transition.clone(), initial),
            catalog,
            event_tx: None,
        })
    }

    /// Set the event sender for lifecycle notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<NavigatorEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn catalog(&self) -> &PageCatalog {
        &self.catalog
    }

    pub fn current(&self) -> &PageId {
        self.controller.current()
    }

    pub fn is_transitioning(&self) -> bool {
        self.controller.is_transitioning()
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Classify one raw event and act on the resulting intent
    pub fn handle_input<G: GeometryProvider + ?Sized>(
        &mut self,
        event: &InputEvent,
        geometry: &G,
    ) -> InputOutcome {
        let now = event.timestamp();
        self.controller.advance(now);

        let classification =
            self.classifier
                .classify(event, geometry, self.controller.is_transitioning());
        let request = classification
            .intent
            .map(|intent| self.request_intent(intent, now));

        InputOutcome {
            disposition: classification.disposition,
            intent: classification.intent,
            request,
            events: self.dispatch(),
        }
    }

    /// Act on an intent produced elsewhere (e.g. a keyboard binding)
    pub fn handle_intent(&mut self, intent: Intent, now: Duration) -> NavigateOutcome {
        self.controller.advance(now);
        let request = self.request_intent(intent, now);
        NavigateOutcome {
            request,
            events: self.dispatch(),
        }
    }

    /// Explicit navigation to a specific page (menu selection)
    pub fn navigate_to(&mut self, target: &PageId, now: Duration) -> NavigateOutcome {
        self.controller.advance(now);
        let request = self
            .controller
            .request(&self.catalog, target, TransitionMode::Direct, now);
        NavigateOutcome {
            request,
            events: self.dispatch(),
        }
    }

    /// Run pending transition steps up to `now`
    pub fn advance(&mut self, now: Duration) -> Vec<NavigatorEvent> {
        self.controller.advance(now);
        self.dispatch()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.controller.next_deadline()
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        self.controller.snapshot()
    }

    fn request_intent(&mut self, intent: Intent, now: Duration) -> RequestOutcome {
        let current = self.controller.current();
        let target = match intent {
            Intent::Advance => self.catalog.next(current),
            Intent::Retreat => self.catalog.previous(current),
        };
        let Some(target) = target.map(|p| p.id.clone()) else {
            debug!(?intent, current = %current, "Intent ignored at catalog boundary");
            return RequestOutcome::Rejected(RejectReason::AtBoundary);
        };

        self.controller
            .request(&self.catalog, &target, TransitionMode::Sequential, now)
    }

    fn dispatch(&mut self) -> Vec<NavigatorEvent> {
        let events = self.controller.take_events();
        if let Some(ref tx) = self.event_tx {
            for event in &events {
                if tx.send(event.clone()).is_err() {
                    warn!("Failed to send navigator event: receiver dropped");
                    break;
                }
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SimulatedSurface;
    use crate::time::ms;

    const CONTAINER: ElementId = ElementId(1);

    fn setup() -> (Navigator, SimulatedSurface) {
        let mut surface = SimulatedSurface::new();
        surface.add_element(CONTAINER, None, None);
        let navigator = Navigator::new(&AppConfig::default(), CONTAINER).unwrap();
        (navigator, surface)
    }

    #[test]
    fn test_wheel_advances_sequentially() {
        let (mut nav, surface) = setup();

        let outcome = nav.handle_input(&InputEvent::wheel(40.0, CONTAINER, ms(0)), &surface);
        assert_eq!(outcome.intent, Some(Intent::Advance));
        assert_eq!(outcome.disposition, Disposition::Consume);
        assert!(outcome.request.as_ref().unwrap().is_started());
        assert_eq!(nav.current().as_str(), "home");

        let events = nav.advance(ms(10));
        assert!(matches!(events.as_slice(), [NavigatorEvent::PageSwapped { .. }]));
        assert_eq!(nav.current().as_str(), "portfolio");
    }

    #[test]
    fn test_retreat_on_first_page() {
        let (mut nav, surface) = setup();
        let outcome = nav.handle_input(&InputEvent::wheel(-40.0, CONTAINER, ms(0)), &surface);
        assert_eq!(outcome.request, Some(RequestOutcome::Rejected(RejectReason::AtBoundary)));
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn test_navigate_to_is_direct() {
        let (mut nav, _) = setup();
        let outcome = nav.navigate_to(&"work".into(), ms(0));
        assert!(outcome.request.is_started());
        assert_eq!(outcome.events.len(), 2);
        assert_eq!(nav.snapshot().mode, TransitionMode::Direct);
        assert_eq!(nav.current().as_str(), "work");
    }

    #[test]
    fn test_input_drives_pending_timers() {
        let (mut nav, surface) = setup();
        nav.navigate_to(&"portfolio".into(), ms(0));

        // a later input finishes the settled transition before it is classified
        let outcome = nav.handle_input(&InputEvent::wheel(40.0, CONTAINER, ms(900)), &surface);
        assert!(matches!(outcome.events[0], NavigatorEvent::TransitionSettled { .. }));
        assert!(outcome.request.unwrap().is_started());
    }

    #[tokio::test]
    async fn test_events_forwarded_to_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (nav, _) = setup();
        let mut nav = nav.with_event_sender(tx);

        nav.navigate_to(&"portfolio".into(), ms(0));
        nav.advance(ms(400));

        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }
        assert_eq!(received.len(), 3);
        assert_eq!(
            received[2],
            NavigatorEvent::TransitionSettled {
                current: "portfolio".into()
            }
        );
    }
}
