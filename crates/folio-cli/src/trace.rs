//! Scripted sessions: a simulated surface plus timestamped commands.
//!
//! ```json
//! {
//!   "container": 1,
//!   "surface": {
//!     "elements": [{ "id": 1 }, { "id": 2, "parent": 1 }],
//!     "regions": [{ "id": 10, "parent": 1, "viewport": 900, "content": 0 }]
//!   },
//!   "carousels": [{
//!     "page": "work", "region": 10, "item_height": 300,
//!     "cards": [{ "id": "acme", "element": 11 }, { "id": "globex", "element": 12 }]
//!   }],
//!   "steps": [
//!     { "at": 0, "action": "input", "event": { "type": "wheel", "delta_y": 40, "target": 2 } },
//!     { "at": 900, "action": "select", "card": "globex" }
//!   ]
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use folio_core::geometry::{ElementId, Rect, SimulatedSurface};
use folio_core::{AppConfig, Error, PageId, Result};
use folio_view::{Card, Command, Session};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpec {
    pub id: ElementId,
    #[serde(default)]
    pub parent: Option<ElementId>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    pub id: ElementId,
    #[serde(default)]
    pub parent: Option<ElementId>,
    pub viewport: f64,
    pub content: f64,
    /// Initial scroll offset
    #[serde(default)]
    pub offset: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceSpec {
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
    #[serde(default)]
    pub native_smooth: bool,
}

/// Carousel laid out as equally sized cards stacked in `region`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselSpec {
    pub page: PageId,
    pub region: ElementId,
    pub item_height: f64,
    /// Defaults to the configured `carousel.item_gap`
    #[serde(default)]
    pub gap: Option<f64>,
    /// Defaults to the edge padding that lets every card center
    #[serde(default)]
    pub padding: Option<f64>,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Milliseconds since the start of the trace
    #[serde(with = "folio_core::time::millis")]
    pub at: Duration,
    #[serde(flatten)]
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub container: ElementId,
    #[serde(default)]
    pub surface: SurfaceSpec,
    #[serde(default)]
    pub carousels: Vec<CarouselSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let trace: Self = serde_json::from_str(content)?;
        trace.validate()?;
        Ok(trace)
    }

    fn validate(&self) -> Result<()> {
        if let Some(pair) = self.steps.windows(2).find(|w| w[1].at < w[0].at) {
            return Err(Error::Trace(format!(
                "steps out of order: {}ms after {}ms",
                pair[1].at.as_millis(),
                pair[0].at.as_millis()
            )));
        }
        Ok(())
    }

    /// Build the simulated surface described by the trace
    pub fn surface(&self, config: &AppConfig) -> SimulatedSurface {
        let mut surface = SimulatedSurface::new().with_native_smooth(self.surface.native_smooth);

        if !self.surface.elements.iter().any(|e| e.id == self.container) {
            surface.add_element(self.container, None, None);
        }
        for element in &self.surface.elements {
            let rect = element.top.zip(element.height).map(|(top, h)| Rect::new(top, h));
            surface.add_element(element.id, element.parent, rect);
        }
        for region in &self.surface.regions {
            surface.add_region(region.id, region.parent, region.viewport, region.content);
        }
        for carousel in &self.carousels {
            let elements: Vec<ElementId> = carousel.cards.iter().map(|c| c.element).collect();
            let gap = carousel.gap.unwrap_or(config.carousel.item_gap);
            let viewport = self
                .surface
                .regions
                .iter()
                .find(|r| r.id == carousel.region)
                .map(|r| r.viewport)
                .unwrap_or(0.0);
            let padding = carousel
                .padding
                .unwrap_or_else(|| folio_view::carousel::layout::edge_padding(viewport, carousel.item_height));
            surface.stack_items(carousel.region, &elements, carousel.item_height, gap, padding);
        }
        // offsets last so they clamp against the final content height
        for region in &self.surface.regions {
            surface.scroll_region(region.id, region.offset);
        }
        surface
    }

    /// Build a session over this trace's surface with its carousels attached
    pub fn session(&self, config: &AppConfig) -> Result<Session<SimulatedSurface>> {
        let mut session = Session::new(config.clone(), self.container, self.surface(config))?;
        for carousel in &self.carousels {
            session.add_carousel(carousel.page.clone(), carousel.region, carousel.cards.clone())?;
        }
        Ok(session)
    }
}
