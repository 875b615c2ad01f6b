//! JSON load/save for floor fixtures, warehouse fixtures, and exports.
//!
//! Everything is plain `serde_json` over strings; reading and writing
//! files is left to the caller.

use thiserror::Error;

use floorplan_logic::layout::{ExportedLayout, FloorConfig, WarehouseFixture};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("floor '{name}' has an empty grid ({width}x{depth})")]
    EmptyFloor { name: String, width: u32, depth: u32 },
}

pub fn parse_floor_config(json: &str) -> Result<FloorConfig, PersistenceError> {
    let config: FloorConfig = serde_json::from_str(json)?;
    let size = config.floor.grid_size;
    if size.width == 0 || size.depth == 0 {
        return Err(PersistenceError::EmptyFloor {
            name: config.floor.name,
            width: size.width,
            depth: size.depth,
        });
    }
    Ok(config)
}

pub fn parse_warehouse_fixture(json: &str) -> Result<WarehouseFixture, PersistenceError> {
    Ok(serde_json::from_str(json)?)
}

/// Pretty-printed export document.
pub fn layout_to_json(layout: &ExportedLayout) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(layout)?)
}

pub fn parse_layout(json: &str) -> Result<ExportedLayout, PersistenceError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_logic::layout::{floor_tiles, WarehouseDims};
    use floorplan_logic::paint::{CellValue, WarehouseGrid};
    use floorplan_logic::coords::CellPos;

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_floor_config("{"), Err(PersistenceError::Json(_))));
        assert!(matches!(parse_warehouse_fixture("[1, 2]"), Err(PersistenceError::Json(_))));
    }

    #[test]
    fn zero_sized_floor_is_rejected() {
        let json = r#"{"floor": {"name": "Empty", "gridSize": {"width": 0, "depth": 10}}}"#;
        let err = parse_floor_config(json).unwrap_err();
        assert!(err.to_string().contains("Empty"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let fixture = parse_warehouse_fixture("{}").unwrap();
        assert!(fixture.inventory.is_empty());
        assert!(fixture.pathways.is_empty());
    }

    #[test]
    fn exported_layout_reloads() {
        let mut grid = WarehouseGrid::new(4, 4);
        grid.set(CellPos::new(1, 2), Some(CellValue::Floor));
        let layout = ExportedLayout {
            warehouse: WarehouseDims { rows: 4, columns: 4 },
            inventory: Vec::new(),
            pathways: Vec::new(),
            floors: floor_tiles(&grid),
        };
        let json = layout_to_json(&layout).unwrap();
        assert!(json.contains("\"floor-1\""));
        assert_eq!(parse_layout(&json).unwrap(), layout);
    }
}
