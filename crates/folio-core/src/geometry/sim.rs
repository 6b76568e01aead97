use std::collections::HashMap;

use super::{ElementId, GeometryProvider, Rect, ScrollMetrics};

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    rect: Option<Rect>,
    region: Option<ScrollMetrics>,
    mounted: bool,
}

/// In-memory rendering surface
///
/// Holds a tree of elements, some of which are scroll regions. Offsets written
/// through [`GeometryProvider`] are applied immediately, including native smooth
/// scrolls when `native_smooth` is enabled.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSurface {
    nodes: HashMap<ElementId, Node>,
    native_smooth: bool,
    /// Every offset written, in order, as (region, offset)
    writes: Vec<(ElementId, f64)>,
}

impl SimulatedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report native smooth scrolling as supported
    pub fn with_native_smooth(mut self, enabled: bool) -> Self {
        self.native_smooth = enabled;
        self
    }

    /// Add a plain (non-scrolling) element
    pub fn add_element(&mut self, id: ElementId, parent: Option<ElementId>, rect: Option<Rect>) {
        self.nodes.insert(
            id,
            Node {
                parent,
                rect,
                region: None,
                mounted: true,
            },
        );
    }

    /// Add an independently scrollable region
    pub fn add_region(
        &mut self,
        id: ElementId,
        parent: Option<ElementId>,
        viewport: f64,
        content: f64,
    ) {
        self.nodes.insert(
            id,
            Node {
                parent,
                rect: Some(Rect::new(0.0, viewport)),
                region: Some(ScrollMetrics::new(0.0, viewport, content)),
                mounted: true,
            },
        );
    }

    /// Lay out equally sized items top to bottom inside `region` and size the
    /// region's content to fit them (plus `padding` above and below)
    pub fn stack_items(
        &mut self,
        region: ElementId,
        items: &[ElementId],
        item_height: f64,
        gap: f64,
        padding: f64,
    ) {
        let mut top = padding;
        for (idx, id) in items.iter().enumerate() {
            if idx > 0 {
                top += gap;
            }
            self.add_element(*id, Some(region), Some(Rect::new(top, item_height)));
            top += item_height;
        }
        if let Some(metrics) = self.nodes.get_mut(&region).and_then(|n| n.region.as_mut()) {
            metrics.content = top + padding;
        }
    }

    pub fn set_mounted(&mut self, id: ElementId, mounted: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.mounted = mounted;
        }
    }

    /// Move a region as a user scroll would (not recorded as a write)
    pub fn scroll_region(&mut self, region: ElementId, offset: f64) {
        if let Some(metrics) = self.nodes.get_mut(&region).and_then(|n| n.region.as_mut()) {
            metrics.offset = metrics.clamp(offset);
        }
    }

    pub fn offset(&self, region: ElementId) -> Option<f64> {
        self.nodes.get(&region)?.region.map(|m| m.offset)
    }

    pub fn writes(&self) -> &[(ElementId, f64)] {
        &self.writes
    }

    pub fn last_write(&self) -> Option<(ElementId, f64)> {
        self.writes.last().copied()
    }

    fn mounted(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(&id).filter(|n| n.mounted)
    }
}

impl GeometryProvider for SimulatedSurface {
    fn scroll_region_of(&self, target: ElementId) -> Option<ElementId> {
        let mut current = Some(target);
        while let Some(id) = current {
            let node = self.nodes.get(&id)?;
            if node.region.is_some() {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    fn scroll_metrics(&self, region: ElementId) -> Option<ScrollMetrics> {
        self.mounted(region)?.region
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.mounted(element)?.rect
    }

    fn set_scroll_offset(&mut self, region: ElementId, offset: f64) {
        if let Some(metrics) = self.nodes.get_mut(&region).and_then(|n| n.region.as_mut()) {
            metrics.offset = metrics.clamp(offset);
            self.writes.push((region, metrics.offset));
        }
    }

    fn smooth_scroll_to(&mut self, region: ElementId, offset: f64) -> bool {
        if !self.native_smooth {
            return false;
        }
        self.set_scroll_offset(region, offset);
        true
    }
}
