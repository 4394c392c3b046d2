//! Per-page placement store
//!
//! Holds at most one placement per page. Setting a page that already has a
//! placement replaces it; nothing is ever inserted implicitly.

use crate::types::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct PlacementRegistry {
    placements: BTreeMap<usize, Placement>,
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the placement for a page
    pub fn set(&mut self, page: usize, placement: Placement) {
        debug_assert_eq!(page, placement.page);
        self.placements.insert(page, placement);
    }

    /// Remove a page's placement; absent pages are not an error
    pub fn remove(&mut self, page: usize) -> Option<Placement> {
        self.placements.remove(&page)
    }

    /// Snapshot of all placements.
    ///
    /// Callers must not depend on the order of the returned list.
    pub fn list(&self) -> Vec<Placement> {
        self.placements.values().copied().collect()
    }

    pub fn clear(&mut self) {
        self.placements.clear();
    }

    pub fn get(&self, page: usize) -> Option<&Placement> {
        self.placements.get(&page)
    }

    pub fn contains(&self, page: usize) -> bool {
        self.placements.contains_key(&page)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Serialize the snapshot as the JSON array the backend expects
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.list())?)
    }
}
