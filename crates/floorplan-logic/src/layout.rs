//! Fixture records and the exported layout schema.
//!
//! These are the JSON shapes exchanged with the renderer and with fixture
//! files (camelCase on the wire). The core never reads files itself;
//! callers hand it parsed values.
//!
//! Warehouse inventory uses 1-based `row`/`column`; the paint grid is
//! 0-based. [`InventoryItem::cell`] is the single conversion point.

use serde::{Deserialize, Serialize};

use crate::constants::RACK_UNITS;
use crate::coords::{warehouse_cell_center, CellPos, GridSize, WorldPos};
use crate::occupancy::ComponentId;
use crate::paint::{CellKind, CellValue, WarehouseGrid};
use crate::placement::{ComponentKind, PlacedComponent, Placement};
use crate::regions::{extract_regions, Region};

// ── Data-center floor ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorInfo {
    pub name: String,
    pub grid_size: GridSize,
}

/// Floor fixture: the room and the components already on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorConfig {
    pub floor: FloorInfo,
    #[serde(default)]
    pub racks: Vec<RackRecord>,
    #[serde(default)]
    pub ac_units: Vec<UnitRecord>,
    #[serde(default)]
    pub generators: Vec<UnitRecord>,
}

/// A colored band of rack units on a rack face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RackSection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub ru_start: u32,
    pub ru_height: u32,
    pub color: String,
}

/// A device mounted in a rack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub ru_start: u32,
    pub ru_height: u32,
    pub color: String,
}

fn default_units() -> u32 {
    RACK_UNITS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RackRecord {
    pub id: ComponentId,
    pub name: String,
    pub position: WorldPos,
    #[serde(default = "default_units")]
    pub units: u32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    #[serde(default)]
    pub sections: Vec<RackSection>,
    #[serde(default)]
    pub equipment: Vec<EquipmentRecord>,
}

impl RackRecord {
    pub fn from_placement(placement: &Placement, name: String) -> Self {
        let c = &placement.component;
        Self {
            id: c.id.clone(),
            name,
            position: c.position,
            units: RACK_UNITS,
            width: c.width,
            height: c.height,
            depth: c.depth,
            sections: Vec::new(),
            equipment: Vec::new(),
        }
    }

    pub fn placed(&self) -> PlacedComponent {
        PlacedComponent {
            id: self.id.clone(),
            kind: ComponentKind::Rack,
            position: self.position,
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }
}

/// AC unit or generator record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    pub id: ComponentId,
    pub name: String,
    pub position: WorldPos,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl UnitRecord {
    pub fn from_placement(placement: &Placement, name: String) -> Self {
        let c = &placement.component;
        Self {
            id: c.id.clone(),
            name,
            position: c.position,
            width: c.width,
            height: c.height,
            depth: c.depth,
        }
    }

    pub fn placed(&self, kind: ComponentKind) -> PlacedComponent {
        PlacedComponent {
            id: self.id.clone(),
            kind,
            position: self.position,
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }
}

// ── Warehouse ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryKind {
    Box,
    Pallet,
    Sack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InventoryKind,
    /// 1-based.
    pub row: usize,
    /// 1-based.
    pub column: usize,
    #[serde(default = "default_stack")]
    pub stack_height: u32,
    #[serde(default)]
    pub position: WorldPos,
}

fn default_stack() -> u32 {
    1
}

impl InventoryItem {
    /// Zero-based grid cell, `None` when row or column is 0.
    pub fn cell(&self) -> Option<CellPos> {
        Some(CellPos::new(self.row.checked_sub(1)?, self.column.checked_sub(1)?))
    }

    /// Scene position of the item's cell center.
    pub fn scene_position(&self) -> Option<WorldPos> {
        self.cell().map(warehouse_cell_center)
    }
}

/// Partial update of an inventory item; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    #[serde(rename = "type")]
    pub kind: Option<InventoryKind>,
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub stack_height: Option<u32>,
    pub position: Option<WorldPos>,
}

impl ItemUpdate {
    pub fn apply(&self, item: &mut InventoryItem) {
        if let Some(kind) = self.kind {
            item.kind = kind;
        }
        if let Some(row) = self.row {
            item.row = row;
        }
        if let Some(column) = self.column {
            item.column = column;
        }
        if let Some(stack_height) = self.stack_height {
            item.stack_height = stack_height;
        }
        if let Some(position) = self.position {
            item.position = position;
        }
    }
}

/// Rendering style of a displayed pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathwayType {
    #[default]
    Floor,
    Elevated,
    Bridge,
    Pathway,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayRecord {
    pub id: String,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
    pub width: f32,
    pub color: String,
    pub opacity: f32,
    #[serde(rename = "type", default)]
    pub kind: PathwayType,
}

impl PathwayRecord {
    pub fn from_region(region: &Region, kind: PathwayType) -> Self {
        Self {
            id: region.id.clone(),
            start_row: region.start_row,
            start_col: region.start_col,
            end_row: region.end_row,
            end_col: region.end_col,
            width: region.width,
            color: region.color.clone(),
            opacity: region.opacity,
            kind,
        }
    }
}

/// Partial update of a displayed pathway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayUpdate {
    pub start_row: Option<usize>,
    pub start_col: Option<usize>,
    pub end_row: Option<usize>,
    pub end_col: Option<usize>,
    pub width: Option<f32>,
    pub color: Option<String>,
    pub opacity: Option<f32>,
    #[serde(rename = "type")]
    pub kind: Option<PathwayType>,
}

impl PathwayUpdate {
    pub fn apply(&self, record: &mut PathwayRecord) {
        let bounds = [
            (self.start_row, &mut record.start_row),
            (self.start_col, &mut record.start_col),
            (self.end_row, &mut record.end_row),
            (self.end_col, &mut record.end_col),
        ];
        for (value, slot) in bounds {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(width) = self.width {
            record.width = width;
        }
        if let Some(color) = &self.color {
            record.color = color.clone();
        }
        if let Some(opacity) = self.opacity {
            record.opacity = opacity;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
    }
}

/// Warehouse fixture: inventory plus the pathways to display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseFixture {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub pathways: Vec<PathwayRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseDims {
    pub rows: usize,
    pub columns: usize,
}

/// One painted floor cell in the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorTile {
    pub id: String,
    pub row: usize,
    pub col: usize,
    #[serde(rename = "type")]
    pub kind: CellKind,
}

/// Full warehouse export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedLayout {
    pub warehouse: WarehouseDims,
    pub inventory: Vec<InventoryItem>,
    pub pathways: Vec<PathwayRecord>,
    pub floors: Vec<FloorTile>,
}

/// Every floor cell, row-major, numbered `floor-1`, `floor-2`, ...
pub fn floor_tiles(grid: &WarehouseGrid) -> Vec<FloorTile> {
    grid.iter()
        .filter(|(_, v)| matches!(v, Some(CellValue::Floor)))
        .enumerate()
        .map(|(i, (cell, _))| FloorTile {
            id: format!("floor-{}", i + 1),
            row: cell.row,
            col: cell.col,
            kind: CellKind::Floor,
        })
        .collect()
}

/// Painted pathways as displayable records of the given type.
pub fn pathway_records(grid: &WarehouseGrid, kind: PathwayType) -> Vec<PathwayRecord> {
    extract_regions(grid, CellKind::Pathway)
        .iter()
        .map(|r| PathwayRecord::from_region(r, kind))
        .collect()
}

/// Assemble the export document.
///
/// Extracted pathways are tagged `type: "floor"`; existing consumers of the
/// export read that value.
pub fn export_layout(
    grid: &WarehouseGrid,
    dims: WarehouseDims,
    inventory: &[InventoryItem],
) -> ExportedLayout {
    ExportedLayout {
        warehouse: dims,
        inventory: inventory.to_vec(),
        pathways: pathway_records(grid, PathwayType::Floor),
        floors: floor_tiles(grid),
    }
}
