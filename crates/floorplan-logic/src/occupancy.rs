//! Tile ownership for the data-center floor.
//!
//! `OccupancyMap` records which component owns each tile. The map lives
//! behind an `Arc` and every mutation goes through `Arc::make_mut`, so a
//! clone handed to a renderer or validity check is a frozen snapshot: later
//! reserves and releases never show up in it, and a multi-tile change is
//! never observable half-applied.

use std::collections::HashMap;
use std::sync::Arc;

use crate::coords::TileCoord;

/// Identifier of a placed component (`rack-3`, `ac-1`, ...).
pub type ComponentId = String;

/// Copy-on-write tile → owner map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyMap {
    tiles: Arc<HashMap<TileCoord, ComponentId>>,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self, tile: TileCoord) -> bool {
        self.tiles.contains_key(&tile)
    }

    /// Component owning `tile`, if any.
    pub fn owner(&self, tile: TileCoord) -> Option<&str> {
        self.tiles.get(&tile).map(String::as_str)
    }

    /// All tiles owned by `id`, sorted.
    pub fn tiles_of(&self, id: &str) -> Vec<TileCoord> {
        let mut out: Vec<TileCoord> = self
            .tiles
            .iter()
            .filter(|(_, owner)| owner.as_str() == id)
            .map(|(tile, _)| *tile)
            .collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TileCoord, &str)> {
        self.tiles.iter().map(|(t, id)| (t, id.as_str()))
    }

    /// Assign every tile to `id`.
    ///
    /// No availability check: existing owners are overwritten. Callers that
    /// must not steal tiles validate with `placement::can_place` first.
    pub fn reserve(&mut self, tiles: &[TileCoord], id: &str) {
        if tiles.is_empty() {
            return;
        }
        let map = Arc::make_mut(&mut self.tiles);
        for &tile in tiles {
            map.insert(tile, id.to_string());
        }
    }

    /// Drop every tile owned by `id`. Returns how many were freed.
    pub fn release(&mut self, id: &str) -> usize {
        let owned = self.tiles.values().filter(|owner| owner.as_str() == id).count();
        if owned == 0 {
            return 0;
        }
        Arc::make_mut(&mut self.tiles).retain(|_, owner| owner.as_str() != id);
        owned
    }

    pub fn clear(&mut self) {
        self.tiles = Arc::default();
    }
}
