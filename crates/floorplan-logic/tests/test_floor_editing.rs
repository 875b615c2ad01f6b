//! Integration tests across the floor-plan pipeline.
//!
//! Exercises: placement → occupancy → collision, and
//! paint editor → history → region extraction → export.
//!
//! All tests are pure logic, no rendering or file I/O.

use floorplan_logic::collision::check_collision;
use floorplan_logic::coords::{grid_to_world, CellPos, GridSize, TileCoord, WorldPos};
use floorplan_logic::layout::{export_layout, InventoryItem, InventoryKind, PathwayType, WarehouseDims};
use floorplan_logic::occupancy::OccupancyMap;
use floorplan_logic::paint::{CellKind, GridPaintEditor, PathwayStyle, Tool};
use floorplan_logic::placement::{
    can_place, fits_floor, move_component, place, remove, ComponentKind, PlacementError,
    SequentialIds,
};
use floorplan_logic::regions::extract_regions;

// ── Helpers ────────────────────────────────────────────────────────────

fn gold() -> PathwayStyle {
    PathwayStyle {
        color: "#FFD700".into(),
        ..PathwayStyle::default()
    }
}

// ── Data-center floor ──────────────────────────────────────────────────

#[test]
fn rack_then_overlapping_rack_is_rejected() {
    let floor = GridSize::new(20, 20);
    let mut occ = OccupancyMap::new();
    let mut ids = SequentialIds::default();

    assert!(fits_floor(TileCoord::new(0, 0), ComponentKind::Rack.footprint(), floor));
    let first = place(ComponentKind::Rack, TileCoord::new(0, 0), &mut occ, &mut ids).unwrap();

    for (x, z) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        assert_eq!(occ.owner(TileCoord::new(x, z)), Some(first.component.id.as_str()));
    }
    assert_eq!(occ.len(), 4);
    assert_eq!(first.component.position, grid_to_world(0.5, 0.5));

    let snapshot = occ.clone();
    let err = place(ComponentKind::Rack, TileCoord::new(1, 1), &mut occ, &mut ids).unwrap_err();
    assert!(matches!(err, PlacementError::TilesOccupied { tile, .. } if tile == TileCoord::new(1, 1)));
    assert_eq!(occ, snapshot);
}

#[test]
fn mixed_components_share_floor_without_overlap() {
    let mut occ = OccupancyMap::new();
    let mut ids = SequentialIds::default();

    let rack = place(ComponentKind::Rack, TileCoord::new(0, 0), &mut occ, &mut ids).unwrap();
    let ac = place(ComponentKind::AcUnit, TileCoord::new(2, 0), &mut occ, &mut ids).unwrap();
    let generator = place(ComponentKind::Generator, TileCoord::new(4, 0), &mut occ, &mut ids).unwrap();

    assert_eq!(occ.len(), 4 + 8 + 16);
    assert_eq!(rack.component.id, "rack-1");
    assert_eq!(ac.component.id, "ac-1");
    assert_eq!(generator.component.id, "gen-1");

    // Neighbouring footprints only touch; the bounding boxes must agree.
    let placed = vec![rack.component.clone(), ac.component.clone()];
    let g = &generator.component;
    assert!(!check_collision(g.position.x, g.position.z, g.width, g.depth, &placed, None));
}

#[test]
fn remove_frees_tiles_for_reuse() {
    let mut occ = OccupancyMap::new();
    let mut ids = SequentialIds::default();

    let generator = place(ComponentKind::Generator, TileCoord::new(3, 3), &mut occ, &mut ids).unwrap();
    assert!(!can_place(TileCoord::new(4, 4), ComponentKind::Rack.footprint(), &occ));

    assert_eq!(remove(&generator.component.id, &mut occ), 16);
    assert!(occ.is_empty());
    assert!(place(ComponentKind::Rack, TileCoord::new(4, 4), &mut occ, &mut ids).is_ok());
}

#[test]
fn dragged_rack_is_snapped_and_clamped() {
    let floor = GridSize::new(20, 20);
    let moved = move_component(WorldPos::new(4.9, -3.0), floor);
    assert_eq!(moved, WorldPos::new(4.0, 0.0));

    let far = move_component(WorldPos::new(500.0, 500.0), floor);
    assert!((far.x - 11.4).abs() < 1e-4);
    assert!((far.z - 11.4).abs() < 1e-4);
}

// ── Warehouse paint grid ───────────────────────────────────────────────

#[test]
fn painted_run_becomes_one_region() {
    let mut editor = GridPaintEditor::new(10, 10, 100);
    for col in 2..=4 {
        assert!(editor.paint(CellPos::new(2, col), Tool::Pathway, &gold()));
    }

    let regions = extract_regions(editor.grid(), CellKind::Pathway);
    assert_eq!(regions.len(), 1);
    let r = &regions[0];
    assert_eq!((r.start_row, r.end_row, r.start_col, r.end_col), (2, 2, 2, 4));
    assert_eq!(r.color, "#FFD700");
}

#[test]
fn undo_all_edits_returns_to_blank() {
    let mut editor = GridPaintEditor::new(10, 10, 100);
    editor.paint(CellPos::new(0, 0), Tool::Floor, &gold());
    editor.fill_rectangle(CellPos::new(3, 3), CellPos::new(6, 8), Tool::Pathway, &gold());
    editor.erase_rectangle(CellPos::new(4, 4), CellPos::new(5, 5));
    editor.paint(CellPos::new(9, 9), Tool::Floor, &gold());
    let last = editor.snapshot();

    while editor.undo() {}
    assert!(editor.grid().is_blank());
    assert_eq!(editor.history_index(), -1);

    while editor.redo() {}
    assert_eq!(editor.grid(), &last);
}

#[test]
fn history_capacity_drops_oldest() {
    let mut editor = GridPaintEditor::new(10, 10, 3);
    for col in 0..5 {
        editor.paint(CellPos::new(0, col), Tool::Floor, &gold());
    }
    assert_eq!(editor.history_len(), 3);

    while editor.undo() {}
    // The two oldest paints can no longer be undone.
    assert_eq!(editor.grid().painted_count(), 2);
}

#[test]
fn export_after_editing() {
    let mut editor = GridPaintEditor::new(10, 10, 100);
    editor.fill_rectangle(CellPos::new(0, 0), CellPos::new(0, 9), Tool::Pathway, &gold());
    editor.fill_rectangle(CellPos::new(5, 5), CellPos::new(6, 6), Tool::Floor, &gold());

    let inventory = vec![InventoryItem {
        id: "P-1".into(),
        kind: InventoryKind::Pallet,
        row: 6,
        column: 6,
        stack_height: 3,
        position: WorldPos::default(),
    }];
    let layout = export_layout(editor.grid(), WarehouseDims { rows: 10, columns: 10 }, &inventory);

    assert_eq!(layout.pathways.len(), 1);
    assert_eq!(layout.pathways[0].kind, PathwayType::Floor);
    assert_eq!(layout.pathways[0].end_col, 9);
    assert_eq!(layout.floors.len(), 4);
    assert_eq!(layout.inventory[0].cell(), Some(CellPos::new(5, 5)));
}
