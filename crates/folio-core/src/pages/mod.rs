//! Static ordered catalog of full-screen pages.
//!
//! Pages are defined once at startup and never mutated. Lookups are pure and
//! return `None` at the ends of the sequence instead of failing.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a page (e.g. `"home"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub order: u32,
}

impl Page {
    pub fn new(id: impl Into<PageId>, title: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order,
        }
    }
}

/// Ordered, validated set of pages
#[derive(Debug, Clone)]
pub struct PageCatalog {
    /// Sorted by `order`
    pages: Vec<Page>,
}

impl PageCatalog {
    /// Build a catalog, rejecting empty input and duplicate ids or orders
    pub fn new(mut pages: Vec<Page>) -> crate::Result<Self> {
        if pages.is_empty() {
            return Err(crate::Error::Catalog("catalog has no pages".to_string()));
        }

        let mut ids = HashSet::new();
        let mut orders = HashSet::new();
        for page in &pages {
            if !ids.insert(page.id.clone()) {
                return Err(crate::Error::Catalog(format!("duplicate page id '{}'", page.id)));
            }
            if !orders.insert(page.order) {
                return Err(crate::Error::Catalog(format!(
                    "duplicate page order {} ('{}')",
                    page.order, page.id
                )));
            }
        }

        pages.sort_by_key(|p| p.order);
        Ok(Self { pages })
    }

    fn position(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| &p.id == id)
    }

    /// Look up a page by id
    pub fn get(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    /// Look up a page by its order value
    pub fn by_order(&self, order: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.order == order)
    }

    /// The page with the lowest order
    pub fn first(&self) -> &Page {
        // non-empty by construction
        &self.pages[0]
    }

    /// The page after `id`, or `None` for the last (or an unknown) page
    pub fn next(&self, id: &PageId) -> Option<&Page> {
        let pos = self.position(id)?;
        self.pages.get(pos + 1)
    }

    /// The page before `id`, or `None` for the first (or an unknown) page
    pub fn previous(&self, id: &PageId) -> Option<&Page> {
        let pos = self.position(id)?;
        pos.checked_sub(1).and_then(|p| self.pages.get(p))
    }

    /// Order value of a page, `None` if the id is unknown
    pub fn order_of(&self, id: &PageId) -> Option<u32> {
        self.get(id).map(|p| p.order)
    }

    pub fn total(&self) -> usize {
        self.pages.len()
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }
}
