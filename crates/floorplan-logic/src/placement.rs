//! Placement of fixed-footprint components on the data-center floor.
//!
//! A component occupies the rectangle of tiles starting at its anchor
//! (`[ax, ax+w) × [az, az+d)`). Placement is validate-then-commit: a
//! rejected [`place`] leaves the occupancy map untouched.
//!
//! # Lifecycle
//!
//! ```text
//! Unplaced --place--> Placed --move_component--> Moved (self loop) --remove--> Removed
//! ```
//!
//! `move_component` only snaps and clamps; it neither re-checks nor
//! re-reserves tiles. The tiles reserved at placement time stay with the
//! component until [`remove`].
//!
//! ```
//! use floorplan_logic::coords::TileCoord;
//! use floorplan_logic::occupancy::OccupancyMap;
//! use floorplan_logic::placement::{place, ComponentKind, SequentialIds};
//!
//! let mut occ = OccupancyMap::new();
//! let mut ids = SequentialIds::default();
//! let placed = place(ComponentKind::Rack, TileCoord::new(0, 0), &mut occ, &mut ids).unwrap();
//! assert_eq!(placed.tiles.len(), 4);
//! assert!(place(ComponentKind::Rack, TileCoord::new(1, 1), &mut occ, &mut ids).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{footprints, heights, COMPONENT_INSET, MOVE_EXTENT_FACTOR, TILE_SIZE};
use crate::coords::{grid_to_world, snap_to_grid, world_to_grid, GridSize, TileCoord, WorldPos};
use crate::occupancy::{ComponentId, OccupancyMap};

/// Placeable data-center component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    #[serde(rename = "rack")]
    Rack,
    #[serde(rename = "ac")]
    AcUnit,
    #[serde(rename = "generator")]
    Generator,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [Self::Rack, Self::AcUnit, Self::Generator];

    pub fn footprint(self) -> Footprint {
        let (width, depth) = match self {
            Self::Rack => footprints::RACK,
            Self::AcUnit => footprints::AC_UNIT,
            Self::Generator => footprints::GENERATOR,
        };
        Footprint { width, depth }
    }

    pub fn height(self) -> f32 {
        match self {
            Self::Rack => heights::RACK,
            Self::AcUnit => heights::AC_UNIT,
            Self::Generator => heights::GENERATOR,
        }
    }

    /// Wire name, as used in placement-mode requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rack => "rack",
            Self::AcUnit => "ac",
            Self::Generator => "generator",
        }
    }

    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Rack => "rack",
            Self::AcUnit => "ac",
            Self::Generator => "gen",
        }
    }

    /// Display name for the `ordinal`-th component of this kind (1-based).
    pub fn display_name(self, ordinal: usize) -> String {
        match self {
            Self::Rack => format!("Rack {}", ordinal),
            Self::AcUnit => format!("AC-{}", ordinal),
            Self::Generator => format!("Generator {}", ordinal),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PlacementError::UnknownComponentType(s.to_string()))
    }
}

/// Tile footprint of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub depth: u32,
}

impl Footprint {
    pub fn tile_count(&self) -> usize {
        (self.width * self.depth) as usize
    }

    pub fn metric_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE * COMPONENT_INSET
    }

    pub fn metric_depth(&self) -> f32 {
        self.depth as f32 * TILE_SIZE * COMPONENT_INSET
    }
}

/// Geometry of a component on the floor. Position is the footprint center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedComponent {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub position: WorldPos,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// A committed placement: the component and the tiles now reserved for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub component: PlacedComponent,
    pub tiles: Vec<TileCoord>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("cannot place {kind} at {anchor}: tile {tile} is occupied by {owner}")]
    TilesOccupied {
        kind: ComponentKind,
        anchor: TileCoord,
        tile: TileCoord,
        owner: ComponentId,
    },
    #[error("unknown component type `{0}`")]
    UnknownComponentType(String),
    #[error("{kind} at {anchor} extends past the floor edge")]
    OutOfBounds { kind: ComponentKind, anchor: TileCoord },
    #[error("no tile selected or no placement mode active")]
    NothingSelected,
}

/// Source of fresh component ids.
pub trait IdGenerator {
    fn next_id(&mut self, kind: ComponentKind) -> ComponentId;
}

impl<F> IdGenerator for F
where
    F: FnMut(ComponentKind) -> ComponentId,
{
    fn next_id(&mut self, kind: ComponentKind) -> ComponentId {
        self(kind)
    }
}

/// Per-kind counters: `rack-1`, `rack-2`, `ac-1`, `gen-1`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    counters: HashMap<ComponentKind, u64>,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: ComponentKind) -> ComponentId {
        let n = self.counters.entry(kind).or_insert(0);
        *n += 1;
        format!("{}-{}", kind.id_prefix(), n)
    }
}

/// Tiles covered by `footprint` anchored at `anchor`, x-major.
///
/// `None` when part of the footprint lies past the `i32` tile range.
pub fn footprint_tiles(anchor: TileCoord, footprint: Footprint) -> Option<Vec<TileCoord>> {
    let mut tiles = Vec::with_capacity(footprint.tile_count());
    for dx in 0..footprint.width {
        for dz in 0..footprint.depth {
            let dx = i32::try_from(dx).ok()?;
            let dz = i32::try_from(dz).ok()?;
            tiles.push(anchor.checked_offset(dx, dz)?);
        }
    }
    Some(tiles)
}

/// Whether every tile of the footprint exists and is free.
pub fn can_place(anchor: TileCoord, footprint: Footprint, occupancy: &OccupancyMap) -> bool {
    footprint_tiles(anchor, footprint)
        .is_some_and(|tiles| tiles.iter().all(|&t| !occupancy.is_occupied(t)))
}

/// Whether the whole footprint lies on the floor.
pub fn fits_floor(anchor: TileCoord, footprint: Footprint, floor: GridSize) -> bool {
    footprint_tiles(anchor, footprint).is_some_and(|tiles| tiles.iter().all(|&t| floor.contains(t)))
}

/// Center position of a footprint anchored at `anchor`.
pub fn footprint_center(anchor: TileCoord, footprint: Footprint) -> WorldPos {
    grid_to_world(
        anchor.grid_x as f32 + (footprint.width as f32 - 1.0) / 2.0,
        anchor.grid_z as f32 + (footprint.depth as f32 - 1.0) / 2.0,
    )
}

/// Inverse of [`footprint_center`] for components loaded with only a position.
pub fn anchor_for_center(center: WorldPos, footprint: Footprint) -> TileCoord {
    world_to_grid(
        center.x - (footprint.width as f32 - 1.0) * TILE_SIZE / 2.0,
        center.z - (footprint.depth as f32 - 1.0) * TILE_SIZE / 2.0,
    )
}

/// Validate and commit a new component of `kind` at `anchor`.
pub fn place(
    kind: ComponentKind,
    anchor: TileCoord,
    occupancy: &mut OccupancyMap,
    ids: &mut impl IdGenerator,
) -> Result<Placement, PlacementError> {
    let footprint = kind.footprint();
    let Some(tiles) = footprint_tiles(anchor, footprint) else {
        log::debug!("rejected {} at {}: footprint leaves the tile range", kind, anchor);
        return Err(PlacementError::OutOfBounds { kind, anchor });
    };
    if let Some(&tile) = tiles.iter().find(|&&t| occupancy.is_occupied(t)) {
        let owner = occupancy.owner(tile).unwrap_or_default().to_string();
        log::debug!("rejected {} at {}: {} held by {}", kind, anchor, tile, owner);
        return Err(PlacementError::TilesOccupied {
            kind,
            anchor,
            tile,
            owner,
        });
    }

    let id = ids.next_id(kind);
    occupancy.reserve(&tiles, &id);

    Ok(Placement {
        component: PlacedComponent {
            id,
            kind,
            position: footprint_center(anchor, footprint),
            width: footprint.metric_width(),
            height: kind.height(),
            depth: footprint.metric_depth(),
        },
        tiles,
    })
}

/// Snap a dragged position to the lattice and clamp it to the floor.
///
/// Each axis is clamped independently to
/// `[0, (extent - 1) * TILE_SIZE * MOVE_EXTENT_FACTOR]`. Collision with other
/// components is not checked and occupancy is not updated.
pub fn move_component(raw: WorldPos, floor: GridSize) -> WorldPos {
    let max_x = (floor.width as f32 - 1.0) * TILE_SIZE * MOVE_EXTENT_FACTOR;
    let max_z = (floor.depth as f32 - 1.0) * TILE_SIZE * MOVE_EXTENT_FACTOR;
    WorldPos {
        x: snap_to_grid(raw.x).min(max_x).max(0.0),
        z: snap_to_grid(raw.z).min(max_z).max(0.0),
    }
}

/// Release every tile held by `id`. Returns the number of freed tiles.
pub fn remove(id: &str, occupancy: &mut OccupancyMap) -> usize {
    occupancy.release(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprints_are_fixed_per_kind() {
        assert_eq!(ComponentKind::Rack.footprint(), Footprint { width: 2, depth: 2 });
        assert_eq!(ComponentKind::AcUnit.footprint(), Footprint { width: 2, depth: 4 });
        assert_eq!(ComponentKind::Generator.footprint(), Footprint { width: 4, depth: 4 });
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("rack".parse::<ComponentKind>(), Ok(ComponentKind::Rack));
        assert_eq!("ac".parse::<ComponentKind>(), Ok(ComponentKind::AcUnit));
        assert_eq!("generator".parse::<ComponentKind>(), Ok(ComponentKind::Generator));
        assert_eq!(
            "ups".parse::<ComponentKind>(),
            Err(PlacementError::UnknownComponentType("ups".into()))
        );
    }

    #[test]
    fn rack_placement_scenario() {
        let mut occ = OccupancyMap::new();
        let mut ids = SequentialIds::default();

        let placed = place(ComponentKind::Rack, TileCoord::new(0, 0), &mut occ, &mut ids).unwrap();
        for t in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert!(occ.is_occupied(TileCoord::new(t.0, t.1)));
        }
        assert_eq!(placed.component.position, grid_to_world(0.5, 0.5));
        assert_eq!(placed.component.id, "rack-1");
        assert!((placed.component.width - 3.6).abs() < 1e-6);

        let before = occ.clone();
        let err = place(ComponentKind::Rack, TileCoord::new(1, 1), &mut occ, &mut ids).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::TilesOccupied { tile, ref owner, .. }
                if tile == TileCoord::new(1, 1) && owner == "rack-1"
        ));
        assert_eq!(occ, before, "rejection must not touch occupancy");
    }

    #[test]
    fn generator_is_centered() {
        let mut occ = OccupancyMap::new();
        let mut ids = SequentialIds::default();
        let placed = place(ComponentKind::Generator, TileCoord::new(2, 3), &mut occ, &mut ids).unwrap();
        assert_eq!(placed.tiles.len(), 16);
        assert_eq!(placed.component.position, WorldPos::new(7.0, 9.0));
        assert_eq!(placed.component.id, "gen-1");
        assert_eq!(anchor_for_center(placed.component.position, ComponentKind::Generator.footprint()), TileCoord::new(2, 3));
    }

    #[test]
    fn closure_id_generator() {
        let mut occ = OccupancyMap::new();
        let mut ids = |kind: ComponentKind| format!("{}-fixed", kind.id_prefix());
        let placed = place(ComponentKind::AcUnit, TileCoord::new(0, 0), &mut occ, &mut ids).unwrap();
        assert_eq!(placed.component.id, "ac-fixed");
        assert_eq!(placed.tiles.len(), 8);
    }

    #[test]
    fn adjacent_placements_are_allowed() {
        let mut occ = OccupancyMap::new();
        let mut ids = SequentialIds::default();
        place(ComponentKind::Rack, TileCoord::new(0, 0), &mut occ, &mut ids).unwrap();
        assert!(can_place(TileCoord::new(2, 0), ComponentKind::Rack.footprint(), &occ));
        assert!(place(ComponentKind::Rack, TileCoord::new(2, 0), &mut occ, &mut ids).is_ok());
        assert_eq!(occ.len(), 8);
    }

    #[test]
    fn remove_frees_footprint() {
        let mut occ = OccupancyMap::new();
        let mut ids = SequentialIds::default();
        let placed = place(ComponentKind::AcUnit, TileCoord::new(3, 3), &mut occ, &mut ids).unwrap();
        assert_eq!(remove(&placed.component.id, &mut occ), 8);
        for t in &placed.tiles {
            assert!(!occ.is_occupied(*t));
        }
        assert_eq!(remove(&placed.component.id, &mut occ), 0);
    }

    #[test]
    fn floor_fit() {
        let floor = GridSize::new(10, 10);
        assert!(fits_floor(TileCoord::new(8, 8), ComponentKind::Rack.footprint(), floor));
        assert!(!fits_floor(TileCoord::new(9, 8), ComponentKind::Rack.footprint(), floor));
        assert!(!fits_floor(TileCoord::new(-1, 0), ComponentKind::Rack.footprint(), floor));
    }

    #[test]
    fn move_snaps_and_clamps() {
        let floor = GridSize::new(20, 10);
        // max_x = 19 * 0.6 = 11.4, max_z = 9 * 0.6 = 5.4
        assert_eq!(move_component(WorldPos::new(3.1, 1.2), floor), WorldPos::new(4.0, 2.0));
        let far = move_component(WorldPos::new(100.0, 100.0), floor);
        assert!((far.x - 11.4).abs() < 1e-5);
        assert!((far.z - 5.4).abs() < 1e-5);
        assert_eq!(move_component(WorldPos::new(-7.0, -0.2), floor), WorldPos::new(0.0, 0.0));
    }

    #[test]
    fn move_leaves_occupancy_untouched() {
        // Dragging rack A onto rack B's center is accepted; tiles stay where they were reserved.
        let mut occ = OccupancyMap::new();
        let mut ids = SequentialIds::default();
        let a = place(ComponentKind::Rack, TileCoord::new(0, 0), &mut occ, &mut ids).unwrap();
        let b = place(ComponentKind::Rack, TileCoord::new(4, 0), &mut occ, &mut ids).unwrap();
        let before = occ.clone();

        let moved = move_component(b.component.position, GridSize::new(50, 50));
        assert_eq!(b.component.position, WorldPos::new(9.0, 1.0));
        assert_eq!(moved, WorldPos::new(10.0, 2.0));
        assert_eq!(occ, before);
        assert_eq!(occ.tiles_of(&a.component.id).len(), 4);
    }

    #[test]
    fn far_anchor_is_not_placeable() {
        let mut occ = OccupancyMap::new();
        let mut ids = SequentialIds::default();
        let far = TileCoord::new(i32::MAX, 0);
        let rack = ComponentKind::Rack.footprint();

        assert_eq!(footprint_tiles(far, rack), None);
        assert!(!can_place(far, rack, &occ));
        assert!(!fits_floor(far, rack, GridSize::new(u32::MAX, u32::MAX)));
        assert_eq!(
            place(ComponentKind::Rack, far, &mut occ, &mut ids),
            Err(PlacementError::OutOfBounds { kind: ComponentKind::Rack, anchor: far })
        );
        assert!(occ.is_empty());

        // the last anchor whose footprint still fits the range
        assert!(can_place(TileCoord::new(i32::MAX - 1, i32::MAX - 1), rack, &occ));
    }

    #[test]
    fn degenerate_floor_clamps_to_origin() {
        assert_eq!(move_component(WorldPos::new(5.0, 5.0), GridSize::new(0, 0)), WorldPos::new(0.0, 0.0));
    }
}
