//! Carousel behavior against a simulated surface.

use folio_core::config::{CarouselConfig, ScrollConfig};
use folio_core::geometry::{ElementId, SimulatedSurface};
use folio_core::time::ms;
use folio_view::carousel::layout;
use folio_view::{Card, CarouselEngine, CarouselEvent, ScrollOwner, SelectOutcome};
use proptest::prelude::*;

const REGION: ElementId = ElementId(7);

fn build(count: u64, item_height: f64, viewport: f64) -> (CarouselEngine, SimulatedSurface) {
    build_with_padding(count, item_height, viewport, 0.0)
}

/// Surface padded so the first and last cards can reach the viewport center
fn build_centered(count: u64, item_height: f64, viewport: f64) -> (CarouselEngine, SimulatedSurface) {
    build_with_padding(count, item_height, viewport, layout::edge_padding(viewport, item_height))
}

fn build_with_padding(
    count: u64,
    item_height: f64,
    viewport: f64,
    padding: f64,
) -> (CarouselEngine, SimulatedSurface) {
    let cards: Vec<Card> = (0..count)
        .map(|i| Card::new(format!("project-{i}"), ElementId(1000 + i)))
        .collect();
    let mut surface = SimulatedSurface::new();
    surface.add_region(REGION, None, viewport, 0.0);
    let elements: Vec<ElementId> = cards.iter().map(|c| c.element).collect();
    surface.stack_items(REGION, &elements, item_height, 4.0, padding);

    let engine = CarouselEngine::new(CarouselConfig::default(), ScrollConfig::default(), REGION, cards);
    (engine, surface)
}

#[test]
fn test_last_item_is_bottom_pinned_not_centered() {
    let (mut engine, mut surface) = build(5, 300.0, 900.0);

    let outcome = engine.select_item("project-4", &mut surface, ms(0));
    // content 5 * 300 + 4 * 4 = 1516, minus the 900 viewport
    assert_eq!(outcome, SelectOutcome::Scrolling { target_offset: 616.0 });

    engine.advance(&mut surface, ms(2000));
    assert_eq!(surface.offset(REGION), Some(616.0));
    assert_eq!(engine.scroll_owner(), ScrollOwner::None);
}

#[test]
fn test_first_item_scrolls_to_top() {
    let (mut engine, mut surface) = build(5, 300.0, 900.0);
    surface.scroll_region(REGION, 400.0);

    let outcome = engine.select_item("project-0", &mut surface, ms(0));
    assert_eq!(outcome, SelectOutcome::Scrolling { target_offset: 0.0 });
}

#[test]
fn test_select_then_free_scroll_then_settle() {
    let (mut engine, mut surface) = build_centered(6, 200.0, 600.0);

    engine.select_item("project-2", &mut surface, ms(0));
    engine.advance(&mut surface, ms(1200));
    assert_eq!(engine.scroll_owner(), ScrollOwner::None);

    // user drags back to the top
    surface.scroll_region(REGION, 0.0);
    assert!(engine.on_scroll(&surface, ms(1300)));
    engine.advance(&mut surface, ms(1800));

    assert_eq!(engine.committed_index(), 0);
    assert_eq!(
        engine.take_events(),
        vec![CarouselEvent::ActiveChanged {
            region: REGION,
            index: 0,
            id: "project-0".to_string()
        }]
    );
}

#[test]
fn test_settle_on_same_card_is_silent() {
    let (mut engine, mut surface) = build_centered(6, 200.0, 600.0);

    surface.scroll_region(REGION, 20.0);
    engine.on_scroll(&surface, ms(0));
    engine.advance(&mut surface, ms(500));

    assert_eq!(engine.committed_index(), 0);
    assert!(engine.take_events().is_empty());
    engine.advance(&mut surface, ms(1500));
    assert_eq!(surface.offset(REGION), Some(0.0));
}

proptest! {
    #[test]
    fn program_scroll_never_moves_committed_index(
        count in 2u64..12,
        pick in 0u64..12,
        scrolls in prop::collection::vec((0.0f64..4000.0, 1u64..1100), 1..30),
    ) {
        let (mut engine, mut surface) = build(count, 250.0, 700.0);
        let pick = pick % count;
        let id = format!("project-{pick}");

        engine.select_item(&id, &mut surface, ms(0));
        prop_assert_eq!(engine.scroll_owner(), ScrollOwner::Program);

        // every injected scroll lands before the 1200ms release
        let mut at = 0;
        for (offset, step) in scrolls {
            at = (at + step).min(1199);
            engine.advance(&mut surface, ms(at));
            surface.scroll_region(REGION, offset);
            prop_assert!(!engine.on_scroll(&surface, ms(at)));
            prop_assert_eq!(engine.committed_index(), pick as usize);
        }

        engine.advance(&mut surface, ms(1200));
        prop_assert_eq!(engine.committed_index(), pick as usize);
        prop_assert_eq!(engine.scroll_owner(), ScrollOwner::None);
        prop_assert!(engine.take_events().is_empty());
    }
}
