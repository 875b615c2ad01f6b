//! Data-center floor session: selection, placement mode, components, equipment.

use floorplan_logic::collision::find_collision;
use floorplan_logic::coords::{GridSize, TileCoord, WorldPos};
use floorplan_logic::layout::{EquipmentRecord, FloorConfig, FloorInfo, RackRecord, UnitRecord};
use floorplan_logic::occupancy::{ComponentId, OccupancyMap};
use floorplan_logic::placement::{
    anchor_for_center, can_place, fits_floor, footprint_tiles, move_component, place, remove,
    ComponentKind, IdGenerator, PlacedComponent, PlacementError, SequentialIds,
};

/// Render state of one floor tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Free,
    Occupied,
    Selected,
    Preview,
}

/// Editing state of one data-center floor.
pub struct DataCenterSession {
    pub floor: Option<FloorInfo>,
    pub racks: Vec<RackRecord>,
    pub ac_units: Vec<UnitRecord>,
    pub generators: Vec<UnitRecord>,
    occupancy: OccupancyMap,
    ids: SequentialIds,
    selected_tile: Option<TileCoord>,
    placement_mode: Option<ComponentKind>,
    selected_rack: Option<ComponentId>,
    selected_equipment: Option<String>,
    dragging: bool,
}

impl DataCenterSession {
    pub fn new() -> Self {
        Self {
            floor: None,
            racks: Vec::new(),
            ac_units: Vec::new(),
            generators: Vec::new(),
            occupancy: OccupancyMap::new(),
            ids: SequentialIds::default(),
            selected_tile: None,
            placement_mode: None,
            selected_rack: None,
            selected_equipment: None,
            dragging: false,
        }
    }

    /// Replace the floor and its components with a fixture.
    ///
    /// Each loaded component reserves the footprint implied by its center.
    /// Components whose footprint is already taken stay in their list but
    /// hold no tiles.
    pub fn load_floor(&mut self, config: FloorConfig) {
        *self = Self::new();
        log::info!(
            "loading floor '{}' ({}x{}): {} racks, {} AC units, {} generators",
            config.floor.name,
            config.floor.grid_size.width,
            config.floor.grid_size.depth,
            config.racks.len(),
            config.ac_units.len(),
            config.generators.len()
        );

        let loaded = config
            .racks
            .iter()
            .map(|r| r.placed())
            .chain(config.ac_units.iter().map(|u| u.placed(ComponentKind::AcUnit)))
            .chain(config.generators.iter().map(|g| g.placed(ComponentKind::Generator)));
        for component in loaded {
            self.reserve_loaded(&component);
        }

        self.floor = Some(config.floor);
        self.racks = config.racks;
        self.ac_units = config.ac_units;
        self.generators = config.generators;
    }

    fn reserve_loaded(&mut self, component: &PlacedComponent) {
        let footprint = component.kind.footprint();
        let anchor = anchor_for_center(component.position, footprint);
        match footprint_tiles(anchor, footprint) {
            Some(tiles) if can_place(anchor, footprint, &self.occupancy) => {
                self.occupancy.reserve(&tiles, &component.id);
            }
            _ => {
                log::warn!(
                    "{} '{}' at {} overlaps an earlier component or leaves the tile range; tiles not reserved",
                    component.kind,
                    component.id,
                    anchor
                );
            }
        }
    }

    pub fn grid_size(&self) -> Option<GridSize> {
        self.floor.as_ref().map(|f| f.grid_size)
    }

    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    // ── Selection & placement mode ──────────────────────────────────────

    /// Select a tile as the next placement anchor.
    ///
    /// Occupied tiles are refused. With a placement mode active, anchors
    /// whose footprint would cover an occupied tile are refused too.
    pub fn select_tile(&mut self, tile: TileCoord) -> bool {
        if self.occupancy.is_occupied(tile) {
            log::debug!("tile {} is occupied", tile);
            return false;
        }
        if let Some(kind) = self.placement_mode {
            if !can_place(tile, kind.footprint(), &self.occupancy) {
                log::debug!("{} does not fit at {}", kind, tile);
                return false;
            }
        }
        self.selected_tile = Some(tile);
        true
    }

    pub fn selected_tile(&self) -> Option<TileCoord> {
        self.selected_tile
    }

    pub fn clear_tile_selection(&mut self) {
        self.selected_tile = None;
    }

    pub fn set_placement_mode(&mut self, mode: Option<ComponentKind>) {
        self.placement_mode = mode;
    }

    pub fn placement_mode(&self) -> Option<ComponentKind> {
        self.placement_mode
    }

    /// Tiles the pending placement would cover, empty without a selection and mode.
    pub fn preview_tiles(&self) -> Vec<TileCoord> {
        match (self.selected_tile, self.placement_mode) {
            (Some(anchor), Some(kind)) => footprint_tiles(anchor, kind.footprint()).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn tile_state(&self, tile: TileCoord) -> TileState {
        if self.selected_tile == Some(tile) {
            return TileState::Selected;
        }
        let occupied = self.occupancy.is_occupied(tile);
        if !occupied && self.preview_tiles().contains(&tile) {
            TileState::Preview
        } else if occupied {
            TileState::Occupied
        } else {
            TileState::Free
        }
    }

    /// Place a component of the active mode at the selected tile.
    ///
    /// On success the mode and tile selection are cleared.
    pub fn place_selected(&mut self) -> Result<ComponentId, PlacementError> {
        let (Some(anchor), Some(kind)) = (self.selected_tile, self.placement_mode) else {
            return Err(PlacementError::NothingSelected);
        };
        if let Some(floor) = self.grid_size() {
            if !fits_floor(anchor, kind.footprint(), floor) {
                return Err(PlacementError::OutOfBounds { kind, anchor });
            }
        }

        let mut fresh_ids = UniqueIds {
            inner: &mut self.ids,
            racks: &self.racks,
            ac_units: &self.ac_units,
            generators: &self.generators,
        };
        let placement = place(kind, anchor, &mut self.occupancy, &mut fresh_ids)?;
        let id = placement.component.id.clone();

        match kind {
            ComponentKind::Rack => {
                let name = kind.display_name(self.racks.len() + 1);
                self.racks.push(RackRecord::from_placement(&placement, name));
            }
            ComponentKind::AcUnit => {
                let name = kind.display_name(self.ac_units.len() + 1);
                self.ac_units.push(UnitRecord::from_placement(&placement, name));
            }
            ComponentKind::Generator => {
                let name = kind.display_name(self.generators.len() + 1);
                self.generators.push(UnitRecord::from_placement(&placement, name));
            }
        }

        log::info!("placed {} '{}' at {}", kind, id, anchor);
        self.placement_mode = None;
        self.selected_tile = None;
        Ok(id)
    }

    // ── Components ──────────────────────────────────────────────────────

    /// Every component on the floor as collision geometry.
    pub fn placed_components(&self) -> Vec<PlacedComponent> {
        self.racks
            .iter()
            .map(|r| r.placed())
            .chain(self.ac_units.iter().map(|u| u.placed(ComponentKind::AcUnit)))
            .chain(self.generators.iter().map(|g| g.placed(ComponentKind::Generator)))
            .collect()
    }

    /// Drop a dragged rack at `raw`, snapped and clamped to the floor.
    ///
    /// Overlaps are logged, not prevented, and occupancy keeps the tiles
    /// reserved at placement time.
    pub fn move_rack(&mut self, id: &str, raw: WorldPos) -> Option<WorldPos> {
        let floor = self.grid_size()?;
        let target = move_component(raw, floor);

        let (width, depth) = {
            let rack = self.racks.iter().find(|r| r.id == id)?;
            (rack.width, rack.depth)
        };
        let others = self.placed_components();
        if let Some(hit) = find_collision(target.x, target.z, width, depth, &others, Some(id)) {
            log::warn!("rack '{}' moved onto {} '{}'", id, hit.kind, hit.id);
        }

        let rack = self.racks.iter_mut().find(|r| r.id == id)?;
        rack.position = target;
        Some(target)
    }

    /// Remove a component of any kind and release its tiles.
    pub fn remove_component(&mut self, id: &str) -> bool {
        let before = self.racks.len() + self.ac_units.len() + self.generators.len();
        self.racks.retain(|r| r.id != id);
        self.ac_units.retain(|u| u.id != id);
        self.generators.retain(|g| g.id != id);
        let removed = self.racks.len() + self.ac_units.len() + self.generators.len() < before;

        let freed = remove(id, &mut self.occupancy);
        if self.selected_rack.as_deref() == Some(id) {
            self.selected_rack = None;
            self.selected_equipment = None;
        }
        if removed {
            log::info!("removed '{}', freed {} tiles", id, freed);
        }
        removed
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    // ── Rack detail ─────────────────────────────────────────────────────

    /// Select a rack; clears any equipment selection.
    pub fn select_rack(&mut self, id: Option<&str>) {
        self.selected_rack = id.map(str::to_string);
        self.selected_equipment = None;
    }

    pub fn selected_rack(&self) -> Option<&RackRecord> {
        let id = self.selected_rack.as_deref()?;
        self.racks.iter().find(|r| r.id == id)
    }

    pub fn select_equipment(&mut self, id: Option<&str>) {
        self.selected_equipment = id.map(str::to_string);
    }

    pub fn selected_equipment(&self) -> Option<&str> {
        self.selected_equipment.as_deref()
    }

    pub fn add_equipment(&mut self, rack_id: &str, equipment: EquipmentRecord) -> bool {
        match self.racks.iter_mut().find(|r| r.id == rack_id) {
            Some(rack) => {
                rack.equipment.push(equipment);
                true
            }
            None => false,
        }
    }

    pub fn remove_equipment(&mut self, rack_id: &str, equipment_id: &str) -> bool {
        let Some(rack) = self.racks.iter_mut().find(|r| r.id == rack_id) else {
            return false;
        };
        let before = rack.equipment.len();
        rack.equipment.retain(|e| e.id != equipment_id);
        if self.selected_equipment.as_deref() == Some(equipment_id) {
            self.selected_equipment = None;
        }
        rack.equipment.len() < before
    }
}

impl Default for DataCenterSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Skips generated ids already used by loaded components.
struct UniqueIds<'a> {
    inner: &'a mut SequentialIds,
    racks: &'a [RackRecord],
    ac_units: &'a [UnitRecord],
    generators: &'a [UnitRecord],
}

impl UniqueIds<'_> {
    fn taken(&self, id: &str) -> bool {
        self.racks.iter().any(|r| r.id == id)
            || self.ac_units.iter().any(|u| u.id == id)
            || self.generators.iter().any(|g| g.id == id)
    }
}

impl IdGenerator for UniqueIds<'_> {
    fn next_id(&mut self, kind: ComponentKind) -> ComponentId {
        loop {
            let id = self.inner.next_id(kind);
            if !self.taken(&id) {
                return id;
            }
        }
    }
}
