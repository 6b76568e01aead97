use serde::{Deserialize, Serialize};

use folio_core::geometry::ElementId;

use super::emphasis::Emphasis;

/// One selectable card in a carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub element: ElementId,
}

impl Card {
    pub fn new(id: impl Into<String>, element: ElementId) -> Self {
        Self {
            id: id.into(),
            element,
        }
    }
}

/// Which actor currently drives the scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollOwner {
    #[default]
    None,
    User,
    /// Engine-initiated scroll in flight; observed offsets must not move the
    /// committed index
    Program,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    pub items: Vec<Card>,
    /// Settled, externally visible selection
    pub committed_index: usize,
    /// Live nearest-item estimate during free scroll
    pub visual_index: usize,
    pub scroll_owner: ScrollOwner,
}

impl CarouselState {
    pub fn new(items: Vec<Card>) -> Self {
        Self {
            items,
            committed_index: 0,
            visual_index: 0,
            scroll_owner: ScrollOwner::None,
        }
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|c| c.id == id)
    }

    pub fn active(&self) -> Option<&Card> {
        self.items.get(self.committed_index)
    }

    pub fn emphasis(&self, index: usize) -> Emphasis {
        Emphasis::for_distance(index.abs_diff(self.committed_index))
    }
}

/// Carousel output boundary for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    pub region: ElementId,
    pub committed_index: usize,
    pub visual_index: usize,
    pub active_id: Option<String>,
    pub is_animating: bool,
    pub scroll_owner: ScrollOwner,
    /// Emphasis tier per card, in item order
    pub emphasis: Vec<Emphasis>,
    /// Padding letting middle cards center, once the region is mounted
    pub edge_padding: Option<f64>,
}
