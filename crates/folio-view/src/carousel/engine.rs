//! Scroll-snap carousel engine.
//!
//! Keeps the committed card centered (first and last pinned to the edges) and
//! settles free scrolling onto a card. Every scroll the engine starts itself runs
//! with [`ScrollOwner::Program`]; scroll observations made under that owner are
//! dropped so programmatic motion never feeds back into the selection.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use folio_core::config::{CarouselConfig, ScrollConfig};
use folio_core::geometry::{ElementId, GeometryProvider, ScrollMetrics};
use folio_core::scheduler::{TimerHandle, TimerQueue};

use super::layout;
use super::state::{Card, CarouselSnapshot, CarouselState, ScrollOwner};
use crate::scroll::ScrollAnimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// Look for an unmounted card again; `attempt` counts retries made so far
    MountRetry { index: usize, attempt: u32 },
    ScrollStop,
    Release,
}

/// Result of [`CarouselEngine::select_item`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectOutcome {
    /// Scrolling towards `target_offset`
    Scrolling { target_offset: f64 },
    /// Card not mounted yet; retrying on a timer
    Pending,
    /// Card never mounted within the retry budget; selection committed without scrolling
    Abandoned,
    /// Card already committed and being scrolled to
    AlreadyActive,
    /// No card with that id
    Unknown,
}

/// Notifications for the owner of the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CarouselEvent {
    /// Free scroll settled on a different card
    ActiveChanged {
        region: ElementId,
        index: usize,
        id: String,
    },
}

pub struct CarouselEngine {
    config: CarouselConfig,
    region: ElementId,
    state: CarouselState,
    animator: ScrollAnimator,
    timers: TimerQueue<Task>,
    retry: Option<TimerHandle>,
    stop: Option<TimerHandle>,
    release: Option<TimerHandle>,
    /// Index the last selection or snap asked for
    requested: Option<usize>,
    outbox: Vec<CarouselEvent>,
}

impl CarouselEngine {
    pub fn new(config: CarouselConfig, scroll: ScrollConfig, region: ElementId, items: Vec<Card>) -> Self {
        Self {
            config,
            region,
            state: CarouselState::new(items),
            animator: ScrollAnimator::new(scroll),
            timers: TimerQueue::new(),
            retry: None,
            stop: None,
            release: None,
            requested: None,
            outbox: Vec::new(),
        }
    }

    pub fn region(&self) -> ElementId {
        self.region
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn committed_index(&self) -> usize {
        self.state.committed_index
    }

    pub fn visual_index(&self) -> usize {
        self.state.visual_index
    }

    pub fn scroll_owner(&self) -> ScrollOwner {
        self.state.scroll_owner
    }

    pub fn is_animating(&self) -> bool {
        self.state.scroll_owner == ScrollOwner::Program
    }

    /// Replace the card list, keeping the selection in range
    pub fn set_items(&mut self, items: Vec<Card>) {
        let last = items.len().saturating_sub(1);
        self.state.items = items;
        self.state.committed_index = self.state.committed_index.min(last);
        self.state.visual_index = self.state.visual_index.min(last);
        self.requested = self.requested.map(|r| r.min(last));
    }

    /// Make `id` the committed card and scroll it into place
    pub fn select_item<G: GeometryProvider + ?Sized>(
        &mut self,
        id: &str,
        geometry: &mut G,
        now: Duration,
    ) -> SelectOutcome {
        let Some(index) = self.state.index_of(id) else {
            debug!(region = %self.region, id, "Selection ignored: unknown card");
            return SelectOutcome::Unknown;
        };

        if index == self.state.committed_index && self.state.scroll_owner == ScrollOwner::Program {
            return SelectOutcome::AlreadyActive;
        }

        self.timers.cancel_slot(&mut self.stop);
        self.timers.cancel_slot(&mut self.retry);
        self.timers.cancel_slot(&mut self.release);
        self.animator.cancel();

        self.state.committed_index = index;
        self.state.visual_index = index;
        self.state.scroll_owner = ScrollOwner::Program;
        self.requested = Some(index);

        self.center(index, 0, geometry, now)
    }

    /// Observe a native scroll event on the region
    ///
    /// Returns false when the event was ignored because the engine owns the scroll.
    pub fn on_scroll<G: GeometryProvider + ?Sized>(&mut self, geometry: &G, now: Duration) -> bool {
        if self.state.scroll_owner == ScrollOwner::Program {
            return false;
        }
        self.state.scroll_owner = ScrollOwner::User;

        if let Some(metrics) = geometry.scroll_metrics(self.region) {
            let stride = self
                .state
                .items
                .first()
                .and_then(|card| geometry.bounds(card.element))
                .map(|rect| rect.height + self.config.item_gap)
                .unwrap_or(0.0);
            if let Some(visual) = layout::visual_index(metrics.offset, stride, self.state.items.len()) {
                self.state.visual_index = visual;
            }
        }

        self.timers.cancel_slot(&mut self.stop);
        self.stop = Some(
            self.timers
                .schedule(now + self.config.scroll_stop_debounce(), Task::ScrollStop),
        );
        true
    }

    /// Step the frame animation and run every task due at or before `now`
    pub fn advance<G: GeometryProvider + ?Sized>(&mut self, geometry: &mut G, now: Duration) {
        self.on_frame(geometry, now);

        while let Some(fired) = self.timers.pop_next_due(now) {
            match fired.payload {
                Task::MountRetry { index, attempt } => {
                    self.retry = None;
                    if self.requested == Some(index) && self.state.scroll_owner == ScrollOwner::Program {
                        self.center(index, attempt, geometry, fired.deadline);
                    }
                }
                Task::ScrollStop => {
                    self.stop = None;
                    if self.state.scroll_owner == ScrollOwner::User {
                        self.settle(geometry, fired.deadline);
                    }
                }
                Task::Release => {
                    self.release = None;
                    self.release_scroll();
                }
            }
        }
    }

    /// Write the next interpolated offset while a manual animation runs
    pub fn on_frame<G: GeometryProvider + ?Sized>(&mut self, geometry: &mut G, now: Duration) {
        if !self.animator.is_animating() {
            return;
        }
        let Some(metrics) = geometry.scroll_metrics(self.region) else {
            self.animator.cancel();
            return;
        };
        let offset = self.animator.update(metrics.max_scroll(), now);
        geometry.set_scroll_offset(self.region, offset);
    }

    /// Earliest time the engine needs to run again
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn needs_frames(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn take_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn snapshot<G: GeometryProvider + ?Sized>(&self, geometry: &G) -> CarouselSnapshot {
        let edge_padding = geometry.scroll_metrics(self.region).and_then(|metrics| {
            self.state
                .items
                .first()
                .and_then(|card| geometry.bounds(card.element))
                .map(|rect| layout::edge_padding(metrics.viewport, rect.height))
        });

        CarouselSnapshot {
            region: self.region,
            committed_index: self.state.committed_index,
            visual_index: self.state.visual_index,
            active_id: self.state.active().map(|c| c.id.clone()),
            is_animating: self.is_animating(),
            scroll_owner: self.state.scroll_owner,
            emphasis: (0..self.state.items.len())
                .map(|idx| self.state.emphasis(idx))
                .collect(),
            edge_padding,
        }
    }

    fn center<G: GeometryProvider + ?Sized>(
        &mut self,
        index: usize,
        attempt: u32,
        geometry: &mut G,
        now: Duration,
    ) -> SelectOutcome {
        let Some(element) = self.state.items.get(index).map(|card| card.element) else {
            self.state.scroll_owner = ScrollOwner::None;
            return SelectOutcome::Unknown;
        };
        let located = geometry
            .bounds(element)
            .zip(geometry.scroll_metrics(self.region));

        let Some((rect, metrics)) = located else {
            if attempt < self.config.mount_retry_attempts {
                debug!(region = %self.region, index, attempt, "Card not mounted yet, retrying");
                self.retry = Some(self.timers.schedule(
                    now + self.config.mount_retry_interval(),
                    Task::MountRetry {
                        index,
                        attempt: attempt + 1,
                    },
                ));
                return SelectOutcome::Pending;
            }
            warn!(
                region = %self.region,
                index,
                attempts = attempt,
                "Card never mounted, giving up on scroll"
            );
            self.state.scroll_owner = ScrollOwner::None;
            return SelectOutcome::Abandoned;
        };

        let target = layout::target_offset(index, self.state.items.len(), rect, &metrics);
        self.scroll_to(target, metrics, geometry, now);
        self.schedule_release(now + self.config.select_release());
        SelectOutcome::Scrolling {
            target_offset: target,
        }
    }

    fn settle<G: GeometryProvider + ?Sized>(&mut self, geometry: &mut G, now: Duration) {
        let Some(metrics) = geometry.scroll_metrics(self.region) else {
            self.state.scroll_owner = ScrollOwner::None;
            return;
        };
        let rects: Vec<_> = self
            .state
            .items
            .iter()
            .map(|card| geometry.bounds(card.element))
            .collect();
        let Some(index) = layout::snap_index(&rects, &metrics, self.config.bottom_snap_items) else {
            self.state.scroll_owner = ScrollOwner::None;
            return;
        };

        let previous = self.state.committed_index;
        self.state.committed_index = index;
        self.state.visual_index = index;
        self.state.scroll_owner = ScrollOwner::Program;
        self.requested = Some(index);

        if index != previous {
            let id = self.state.items[index].id.clone();
            info!(region = %self.region, index, id = %id, "Carousel settled on new card");
            self.outbox.push(CarouselEvent::ActiveChanged {
                region: self.region,
                index,
                id,
            });
        }

        if let Some(rect) = rects[index] {
            let target = layout::target_offset(index, rects.len(), rect, &metrics);
            self.scroll_to(target, metrics, geometry, now);
        }
        self.schedule_release(now + self.config.snap_release());
    }

    /// Hand the scroll back at `hold`, or when the running animation ends if later
    fn schedule_release(&mut self, hold: Duration) {
        let deadline = self
            .animator
            .finishes_at()
            .map_or(hold, |finish| finish.max(hold));
        self.timers.cancel_slot(&mut self.release);
        self.release = Some(self.timers.schedule(deadline, Task::Release));
    }

    fn scroll_to<G: GeometryProvider + ?Sized>(
        &mut self,
        target: f64,
        metrics: ScrollMetrics,
        geometry: &mut G,
        now: Duration,
    ) {
        if geometry.smooth_scroll_to(self.region, target) {
            self.animator.set_offset(target);
            return;
        }

        self.animator.set_offset(metrics.offset);
        if !self.animator.scroll_to(target, metrics.max_scroll(), now) {
            geometry.set_scroll_offset(self.region, self.animator.current());
        }
    }

    fn release_scroll(&mut self) {
        self.animator.cancel();
        self.state.scroll_owner = ScrollOwner::None;

        if let Some(requested) = self.requested {
            if requested != self.state.committed_index {
                debug!(
                    region = %self.region,
                    requested,
                    committed = self.state.committed_index,
                    "Re-syncing committed card after scroll"
                );
                self.state.committed_index = requested;
            }
        }
        self.state.visual_index = self.state.committed_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::Emphasis;
    use folio_core::geometry::SimulatedSurface;
    use folio_core::time::ms;

    const REGION: ElementId = ElementId(100);

    fn cards(count: u64) -> Vec<Card> {
        (0..count)
            .map(|i| Card::new(format!("card-{i}"), ElementId(200 + i)))
            .collect()
    }

    fn setup(count: u64, viewport: f64) -> (CarouselEngine, SimulatedSurface) {
        setup_with(count, viewport, CarouselConfig::default(), ScrollConfig::default())
    }

    fn setup_with(
        count: u64,
        viewport: f64,
        config: CarouselConfig,
        scroll: ScrollConfig,
    ) -> (CarouselEngine, SimulatedSurface) {
        let items = cards(count);
        let mut surface = SimulatedSurface::new();
        surface.add_region(REGION, None, viewport, 0.0);
        let elements: Vec<ElementId> = items.iter().map(|c| c.element).collect();
        surface.stack_items(REGION, &elements, 300.0, 4.0, 0.0);

        let engine = CarouselEngine::new(config, scroll, REGION, items);
        (engine, surface)
    }

    /// Advance in 16ms frames from `from` up to and including `to`
    fn run_frames(engine: &mut CarouselEngine, surface: &mut SimulatedSurface, from: u64, to: u64) {
        let mut t = from;
        while t <= to {
            engine.advance(surface, ms(t));
            t += 16;
        }
    }

    #[test]
    fn test_select_last_pins_to_bottom() {
        let (mut engine, mut surface) = setup(5, 900.0);

        let outcome = engine.select_item("card-4", &mut surface, ms(0));
        assert_eq!(outcome, SelectOutcome::Scrolling { target_offset: 616.0 });
        assert_eq!(engine.committed_index(), 4);
        assert_eq!(engine.scroll_owner(), ScrollOwner::Program);

        engine.advance(&mut surface, ms(600));
        assert_eq!(surface.offset(REGION), Some(616.0));
        engine.advance(&mut surface, ms(1200));
        assert_eq!(engine.scroll_owner(), ScrollOwner::None);
    }

    #[test]
    fn test_long_animation_holds_scroll_until_done() {
        let scroll = ScrollConfig {
            animation_duration_ms: 2000,
            ..Default::default()
        };
        let (mut engine, mut surface) = setup_with(5, 900.0, CarouselConfig::default(), scroll);

        engine.select_item("card-4", &mut surface, ms(0));
        assert_eq!(engine.next_deadline(), Some(ms(2000)));

        run_frames(&mut engine, &mut surface, 16, 1600);
        assert_eq!(engine.scroll_owner(), ScrollOwner::Program);
        assert!(engine.needs_frames());

        run_frames(&mut engine, &mut surface, 1616, 5000);
        assert_eq!(surface.offset(REGION), Some(616.0));
        assert_eq!(engine.scroll_owner(), ScrollOwner::None);
        assert_eq!(engine.committed_index(), 4);
    }

    #[test]
    fn test_long_snap_animation_holds_scroll_until_done() {
        let scroll = ScrollConfig {
            animation_duration_ms: 2000,
            ..Default::default()
        };
        let (mut engine, mut surface) = setup_with(8, 600.0, CarouselConfig::default(), scroll);

        surface.scroll_region(REGION, 700.0);
        engine.on_scroll(&surface, ms(0));
        engine.advance(&mut surface, ms(500));
        assert_eq!(engine.committed_index(), 3);

        // snap release alone would fire at 1500
        engine.advance(&mut surface, ms(1600));
        assert_eq!(engine.scroll_owner(), ScrollOwner::Program);

        engine.advance(&mut surface, ms(2500));
        assert_eq!(engine.scroll_owner(), ScrollOwner::None);
        assert_eq!(surface.offset(REGION), Some(762.0));
    }

    #[test]
    fn test_frames_interpolate() {
        let (mut engine, mut surface) = setup(5, 900.0);
        engine.select_item("card-2", &mut surface, ms(0));

        engine.advance(&mut surface, ms(300));
        let mid = surface.offset(REGION).unwrap();
        assert!(mid > 0.0 && mid < 308.0);
        assert!(engine.needs_frames());

        engine.advance(&mut surface, ms(700));
        assert_eq!(surface.offset(REGION), Some(308.0));
        assert!(!engine.needs_frames());
    }

    #[test]
    fn test_native_smooth_scroll_used() {
        let (mut engine, surface) = setup(5, 900.0);
        let mut surface = surface.with_native_smooth(true);

        engine.select_item("card-4", &mut surface, ms(0));
        assert_eq!(surface.offset(REGION), Some(616.0));
        assert!(!engine.needs_frames());
    }

    #[test]
    fn test_program_scroll_ignores_observations() {
        let (mut engine, mut surface) = setup(5, 900.0);
        engine.select_item("card-1", &mut surface, ms(0));

        surface.scroll_region(REGION, 600.0);
        assert!(!engine.on_scroll(&surface, ms(100)));
        engine.advance(&mut surface, ms(1000));
        assert_eq!(engine.committed_index(), 1);
    }

    #[test]
    fn test_reselect_while_scrolling_is_noop() {
        let (mut engine, mut surface) = setup(5, 900.0);
        engine.select_item("card-2", &mut surface, ms(0));
        assert_eq!(
            engine.select_item("card-2", &mut surface, ms(50)),
            SelectOutcome::AlreadyActive
        );
        assert_eq!(engine.select_item("missing", &mut surface, ms(60)), SelectOutcome::Unknown);
    }

    #[test]
    fn test_free_scroll_settles_on_center() {
        let (mut engine, mut surface) = setup(8, 600.0);

        surface.scroll_region(REGION, 700.0);
        assert!(engine.on_scroll(&surface, ms(0)));
        assert_eq!(engine.scroll_owner(), ScrollOwner::User);
        assert_eq!(engine.visual_index(), 2);
        // committed only moves when the scroll settles
        assert_eq!(engine.committed_index(), 0);

        engine.advance(&mut surface, ms(499));
        assert_eq!(engine.committed_index(), 0);

        engine.advance(&mut surface, ms(500));
        assert_eq!(engine.committed_index(), 3);
        assert_eq!(engine.scroll_owner(), ScrollOwner::Program);
        let events = engine.take_events();
        assert_eq!(
            events,
            vec![CarouselEvent::ActiveChanged {
                region: REGION,
                index: 3,
                id: "card-3".to_string()
            }]
        );

        engine.advance(&mut surface, ms(1500));
        assert_eq!(engine.scroll_owner(), ScrollOwner::None);
        // card 3 center 1062 minus half the viewport
        assert_eq!(surface.offset(REGION), Some(762.0));
    }

    #[test]
    fn test_debounce_rearms() {
        let (mut engine, mut surface) = setup(8, 600.0);

        surface.scroll_region(REGION, 200.0);
        engine.on_scroll(&surface, ms(0));
        surface.scroll_region(REGION, 400.0);
        engine.on_scroll(&surface, ms(400));

        engine.advance(&mut surface, ms(600));
        assert_eq!(engine.scroll_owner(), ScrollOwner::User);
        engine.advance(&mut surface, ms(900));
        assert_eq!(engine.scroll_owner(), ScrollOwner::Program);
    }

    #[test]
    fn test_select_cancels_pending_settle() {
        let (mut engine, mut surface) = setup(8, 600.0);

        surface.scroll_region(REGION, 700.0);
        engine.on_scroll(&surface, ms(0));
        engine.select_item("card-1", &mut surface, ms(100));

        // the debounce armed at 0 would have settled on card 3 at 500
        engine.advance(&mut surface, ms(600));
        assert_eq!(engine.committed_index(), 1);
        assert_eq!(engine.scroll_owner(), ScrollOwner::Program);

        engine.advance(&mut surface, ms(2000));
        assert_eq!(engine.committed_index(), 1);
        assert_eq!(engine.scroll_owner(), ScrollOwner::None);
        assert_eq!(surface.offset(REGION), Some(154.0));
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_select_during_snap_replaces_release() {
        let (mut engine, mut surface) = setup(8, 600.0);

        surface.scroll_region(REGION, 700.0);
        engine.on_scroll(&surface, ms(0));
        engine.advance(&mut surface, ms(500));
        assert_eq!(engine.committed_index(), 3);
        assert_eq!(engine.take_events().len(), 1);

        engine.select_item("card-5", &mut surface, ms(600));
        assert_eq!(engine.committed_index(), 5);

        // the snap's release was due at 1500
        engine.advance(&mut surface, ms(1600));
        assert_eq!(engine.scroll_owner(), ScrollOwner::Program);
        assert_eq!(engine.committed_index(), 5);

        engine.advance(&mut surface, ms(1800));
        assert_eq!(engine.scroll_owner(), ScrollOwner::None);
        assert_eq!(engine.committed_index(), 5);
        assert_eq!(surface.offset(REGION), Some(1370.0));
        assert!(engine.take_events().is_empty());
        assert!(engine.next_deadline().is_none());
    }

    #[test]
    fn test_mount_retry_then_scroll() {
        let (mut engine, mut surface) = setup(5, 900.0);
        surface.set_mounted(ElementId(203), false);

        assert_eq!(engine.select_item("card-3", &mut surface, ms(0)), SelectOutcome::Pending);
        assert_eq!(engine.committed_index(), 3);

        engine.advance(&mut surface, ms(100));
        assert!(surface.writes().is_empty());

        surface.set_mounted(ElementId(203), true);
        engine.advance(&mut surface, ms(200));
        assert!(engine.needs_frames());
    }

    #[test]
    fn test_mount_retry_gives_up() {
        let (mut engine, mut surface) = setup(5, 900.0);
        surface.set_mounted(ElementId(203), false);

        engine.select_item("card-3", &mut surface, ms(0));
        engine.advance(&mut surface, ms(10_000));

        assert_eq!(engine.scroll_owner(), ScrollOwner::None);
        assert_eq!(engine.committed_index(), 3);
        assert!(engine.next_deadline().is_none());
    }

    #[test]
    fn test_unmounted_without_retries_is_abandoned() {
        let config = CarouselConfig {
            mount_retry_attempts: 0,
            ..Default::default()
        };
        let (mut engine, mut surface) = setup_with(5, 900.0, config, ScrollConfig::default());
        surface.set_mounted(ElementId(203), false);

        let outcome = engine.select_item("card-3", &mut surface, ms(0));
        assert_eq!(outcome, SelectOutcome::Abandoned);
        assert_eq!(engine.scroll_owner(), ScrollOwner::None);
        assert!(engine.next_deadline().is_none());
    }

    #[test]
    fn test_snapshot_reports_emphasis_and_padding() {
        let (mut engine, mut surface) = setup(5, 900.0);
        engine.select_item("card-2", &mut surface, ms(0));

        let snapshot = engine.snapshot(&surface);
        assert_eq!(snapshot.active_id.as_deref(), Some("card-2"));
        assert!(snapshot.is_animating);
        assert_eq!(snapshot.edge_padding, Some(300.0));
        assert_eq!(
            snapshot.emphasis,
            vec![
                Emphasis::Near,
                Emphasis::Adjacent,
                Emphasis::Active,
                Emphasis::Adjacent,
                Emphasis::Near,
            ]
        );
    }
}
