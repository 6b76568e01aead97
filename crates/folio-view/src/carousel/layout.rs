//! Pure scroll-position math for the carousel.

use folio_core::geometry::{Rect, ScrollMetrics};

/// Offset that brings item `index` into its resting place
///
/// The first item pins to the top and the last to the bottom so both are fully
/// visible; every other item is centered in the viewport.
pub fn target_offset(index: usize, count: usize, item: Rect, metrics: &ScrollMetrics) -> f64 {
    if index == 0 {
        0.0
    } else if index + 1 == count {
        metrics.max_scroll()
    } else {
        metrics.clamp(item.center() - metrics.viewport / 2.0)
    }
}

/// Live nearest-item estimate while the user scrolls freely
pub fn visual_index(offset: f64, stride: f64, count: usize) -> Option<usize> {
    if count == 0 || stride <= 0.0 {
        return None;
    }
    let raw = (offset.max(0.0) / stride).round() as usize;
    Some(raw.min(count - 1))
}

/// Item a free scroll should settle on
///
/// Close to the bottom the last item always wins, otherwise the item whose
/// center is nearest the viewport center. Unmounted items are skipped.
pub fn snap_index(items: &[Option<Rect>], metrics: &ScrollMetrics, bottom_snap_items: f64) -> Option<usize> {
    let last = items.len().checked_sub(1)?;
    let max_scroll = metrics.max_scroll();

    if let Some(last_rect) = items[last] {
        let window = bottom_snap_items * last_rect.height;
        if max_scroll > 0.0 && metrics.offset >= max_scroll - window {
            return Some(last);
        }
    }

    let viewport_center = metrics.offset + metrics.viewport / 2.0;
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, rect)| rect.map(|r| (idx, (r.center() - viewport_center).abs())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}

/// Padding above the first and below the last item that lets middle items center
#[inline]
pub fn edge_padding(viewport: f64, item_height: f64) -> f64 {
    ((viewport - item_height) / 2.0).max(0.0)
}
