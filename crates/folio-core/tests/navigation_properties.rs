//! Property tests for catalog boundaries and transition backpressure.

use std::collections::BTreeSet;

use folio_core::config::TransitionConfig;
use folio_core::pages::{Page, PageCatalog, PageId};
use folio_core::time::ms;
use folio_core::transition::{TransitionController, TransitionMode};
use proptest::prelude::*;

fn catalog_strategy() -> impl Strategy<Value = PageCatalog> {
    prop::collection::btree_set(0u32..1000, 1..12).prop_map(|orders: BTreeSet<u32>| {
        // shuffle insertion order by reversing; the catalog sorts anyway
        let pages = orders
            .iter()
            .rev()
            .map(|order| Page::new(format!("page-{order}"), format!("Page {order}"), *order))
            .collect();
        PageCatalog::new(pages).unwrap()
    })
}

fn mode_strategy() -> impl Strategy<Value = TransitionMode> {
    prop_oneof![Just(TransitionMode::Sequential), Just(TransitionMode::Direct)]
}

proptest! {
    #[test]
    fn catalog_ends_have_no_neighbours(catalog in catalog_strategy()) {
        let pages: Vec<&Page> = catalog.iter().collect();
        let first = pages[0];
        let last = pages[pages.len() - 1];

        prop_assert!(catalog.previous(&first.id).is_none());
        prop_assert!(catalog.next(&last.id).is_none());
        prop_assert_eq!(catalog.total(), pages.len());
    }

    #[test]
    fn catalog_walk_visits_every_page_in_order(catalog in catalog_strategy()) {
        let mut visited = vec![catalog.first().id.clone()];
        while let Some(page) = catalog.next(visited.last().unwrap()) {
            visited.push(page.id.clone());
        }
        prop_assert_eq!(visited.len(), catalog.total());

        let orders: Vec<u32> = visited.iter().filter_map(|id| catalog.order_of(id)).collect();
        prop_assert!(orders.windows(2).all(|w| w[0] < w[1]));

        for pair in visited.windows(2) {
            prop_assert_eq!(&catalog.previous(&pair[1]).unwrap().id, &pair[0]);
        }
    }

    #[test]
    fn burst_during_transition_keeps_first_request(
        catalog in catalog_strategy(),
        first_mode in mode_strategy(),
        burst in prop::collection::vec((0usize..12, mode_strategy(), 0u64..400), 0..20),
    ) {
        prop_assume!(catalog.total() >= 2);
        let ids: Vec<PageId> = catalog.iter().map(|p| p.id.clone()).collect();
        let target = ids[ids.len() - 1].clone();

        let mut reference = TransitionController::new(TransitionConfig::default(), ids[0].clone());
        let mut bursted = TransitionController::new(TransitionConfig::default(), ids[0].clone());

        prop_assert!(reference.request(&catalog, &target, first_mode, ms(0)).is_started());
        prop_assert!(bursted.request(&catalog, &target, first_mode, ms(0)).is_started());

        // every burst request lands before the transition can settle
        let mut burst = burst;
        burst.sort_by_key(|(_, _, at)| *at);
        for (idx, mode, at) in burst {
            let page = ids[idx % ids.len()].clone();
            bursted.advance(ms(at));
            prop_assert!(!bursted.request(&catalog, &page, mode, ms(at)).is_started());
        }

        reference.advance(ms(1000));
        bursted.advance(ms(1000));
        prop_assert_eq!(reference.snapshot(), bursted.snapshot());
        prop_assert_eq!(bursted.current(), &target);
        prop_assert!(bursted.previous().is_none());
    }
}
