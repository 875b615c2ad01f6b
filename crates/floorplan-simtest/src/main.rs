//! Floorplan Headless Harness
//!
//! Validates the layout logic, the editing sessions, and the bundled
//! fixtures. Runs entirely in-process, with no frontend and no files
//! written.
//!
//! Usage:
//!   cargo run -p floorplan-simtest
//!   cargo run -p floorplan-simtest -- --verbose
//!   cargo run -p floorplan-simtest -- --seed 7

use floorplan_core::datacenter::DataCenterSession;
use floorplan_core::persistence::{layout_to_json, parse_floor_config, parse_warehouse_fixture};
use floorplan_core::warehouse::{EditMode, ViewMode, WarehouseSession};
use floorplan_logic::collision::check_collision;
use floorplan_logic::constants::MAX_GRID_DIM;
use floorplan_logic::coords::{grid_to_world, CellPos, GridSize, TileCoord, WorldPos};
use floorplan_logic::occupancy::OccupancyMap;
use floorplan_logic::paint::{CellKind, CellValue, GridPaintEditor, PathwayStyle, Tool, WarehouseGrid};
use floorplan_logic::placement::{move_component, place, ComponentKind, SequentialIds};
use floorplan_logic::regions::extract_regions;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

// ── Fixtures (same JSON a frontend loads) ───────────────────────────────
const FLOOR_JSON: &str = include_str!("../../../data/datacenter_floor.json");
const WAREHOUSE_JSON: &str = include_str!("../../../data/warehouse_inventory.json");

/// Top-level keys consumers of the export rely on.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct ExportShape {
    warehouse: serde_json::Value,
    inventory: Vec<serde_json::Value>,
    pathways: Vec<serde_json::Value>,
    floors: Vec<serde_json::Value>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let seed = args
        .iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);
    println!("=== Floorplan Headless Harness (seed {}) ===\n", seed);
    log::info!("fixtures: {} + {} bytes", FLOOR_JSON.len(), WAREHOUSE_JSON.len());

    let mut results = Vec::new();

    // 1. Fixture parsing and loading
    results.extend(validate_fixtures(verbose));

    // 2. Data-center placement scenario
    results.extend(validate_placement());

    // 3. Collision and drag clamping
    results.extend(validate_collision_and_move());

    // 4. Warehouse paint and undo scenario
    results.extend(validate_paint_scenario());

    // 5. Seeded random edit sweep
    results.extend(validate_random_edits(seed, verbose));

    // 6. Region extraction coverage
    results.extend(validate_region_coverage(seed));

    // 7. Export document shape
    results.extend(validate_export_shape(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Fixtures ─────────────────────────────────────────────────────────

fn validate_fixtures(verbose: bool) -> Vec<TestResult> {
    println!("--- Fixtures ---");
    let mut results = Vec::new();

    let floor = match parse_floor_config(FLOOR_JSON) {
        Ok(f) => f,
        Err(e) => {
            results.push(check("floor_parse", false, format!("{}", e)));
            return results;
        }
    };
    let warehouse = match parse_warehouse_fixture(WAREHOUSE_JSON) {
        Ok(w) => w,
        Err(e) => {
            results.push(check("warehouse_parse", false, format!("{}", e)));
            return results;
        }
    };

    let counts = (floor.racks.len(), floor.ac_units.len(), floor.generators.len());
    let mut session = DataCenterSession::new();
    session.load_floor(floor);

    // Every fixture component holds exactly its footprint
    let mut unreserved = Vec::new();
    for c in session.placed_components() {
        let held = session.occupancy().tiles_of(&c.id).len();
        if held != c.kind.footprint().tile_count() {
            unreserved.push(format!("{} holds {}", c.id, held));
        }
    }
    results.push(check(
        "floor_components_reserved",
        unreserved.is_empty(),
        if unreserved.is_empty() {
            format!(
                "{} racks, {} AC units, {} generators, {} tiles held",
                counts.0,
                counts.1,
                counts.2,
                session.occupancy().len()
            )
        } else {
            unreserved.join(", ")
        },
    ));

    // Fixture components sit on the floor
    let floor_size = session.grid_size().unwrap_or(GridSize::new(0, 0));
    let off_floor: Vec<_> = session
        .occupancy()
        .iter()
        .filter(|(t, _)| !floor_size.contains(**t))
        .map(|(t, id)| format!("{}@{}", id, t))
        .collect();
    results.push(check(
        "floor_components_on_floor",
        off_floor.is_empty(),
        if off_floor.is_empty() {
            "all reserved tiles inside the floor".into()
        } else {
            off_floor.join(", ")
        },
    ));

    // Inventory inside a default warehouse
    let mut wh = WarehouseSession::new();
    wh.load_fixture(warehouse);
    let dims = wh.dims();
    let outside: Vec<_> = wh
        .inventory
        .iter()
        .filter(|i| !matches!(i.cell(), Some(c) if c.row < dims.rows && c.col < dims.columns))
        .map(|i| i.id.as_str())
        .collect();
    results.push(check(
        "inventory_in_grid",
        outside.is_empty(),
        if outside.is_empty() {
            format!("{} items, {} pathways", wh.inventory.len(), wh.pathways.len())
        } else {
            format!("outside grid: {}", outside.join(", "))
        },
    ));

    if verbose {
        println!("  Inventory:");
        for item in &wh.inventory {
            println!(
                "    {:8} {:?} r{} c{} x{}",
                item.id, item.kind, item.row, item.column, item.stack_height
            );
        }
    }

    results
}

// ── 2. Placement ────────────────────────────────────────────────────────

fn validate_placement() -> Vec<TestResult> {
    println!("--- Placement ---");
    let mut results = Vec::new();

    let mut occ = OccupancyMap::new();
    let mut ids = SequentialIds::default();

    let first = match place(ComponentKind::Rack, TileCoord::new(0, 0), &mut occ, &mut ids) {
        Ok(p) => p,
        Err(e) => {
            results.push(check("rack_at_origin", false, format!("{}", e)));
            return results;
        }
    };

    let expected: Vec<_> = [(0, 0), (0, 1), (1, 0), (1, 1)]
        .iter()
        .map(|&(x, z)| TileCoord::new(x, z))
        .collect();
    let held = occ.tiles_of(&first.component.id);
    results.push(check(
        "rack_tiles",
        held == expected,
        format!("{:?}", held),
    ));
    results.push(check(
        "rack_centered",
        first.component.position == grid_to_world(0.5, 0.5),
        format!("{:?}", first.component.position),
    ));

    let snapshot = occ.clone();
    let second = place(ComponentKind::Rack, TileCoord::new(1, 1), &mut occ, &mut ids);
    results.push(check(
        "overlap_rejected",
        second.is_err() && occ == snapshot,
        match second {
            Ok(p) => format!("unexpectedly placed {}", p.component.id),
            Err(e) => format!("{}", e),
        },
    ));

    // Session-level flow with mode and selection
    let mut session = DataCenterSession::new();
    if let Ok(floor) = parse_floor_config(FLOOR_JSON) {
        session.load_floor(floor);
    }
    session.set_placement_mode(Some(ComponentKind::Generator));
    let selected = session.select_tile(TileCoord::new(0, 10));
    let placed = session.place_selected();
    results.push(check(
        "session_place_generator",
        selected && placed.is_ok() && session.placement_mode().is_none(),
        format!("{:?}", placed),
    ));

    results
}

// ── 3. Collision & move ─────────────────────────────────────────────────

fn validate_collision_and_move() -> Vec<TestResult> {
    println!("--- Collision & Move ---");
    let mut results = Vec::new();

    let mut occ = OccupancyMap::new();
    let mut ids = SequentialIds::default();
    let placed: Vec<_> = [(0, 0), (2, 0)]
        .iter()
        .filter_map(|&(x, z)| place(ComponentKind::Rack, TileCoord::new(x, z), &mut occ, &mut ids).ok())
        .map(|p| p.component)
        .collect();

    let Some(a) = placed.first() else {
        results.push(check("adjacent_racks_clear", false, "no racks placed".into()));
        return results;
    };
    let touching = check_collision(a.position.x, a.position.z, a.width, a.depth, &placed, Some(a.id.as_str()));
    results.push(check(
        "adjacent_racks_clear",
        placed.len() == 2 && !touching,
        format!("{} racks, collision={}", placed.len(), touching),
    ));

    let overlapping = check_collision(a.position.x + 1.0, a.position.z, a.width, a.depth, &placed, None);
    results.push(check(
        "shifted_box_collides",
        overlapping,
        format!("collision={}", overlapping),
    ));

    let floor = GridSize::new(20, 20);
    let limit = 19.0 * 2.0 * 0.3;
    let samples = [
        WorldPos::new(-5.0, -5.0),
        WorldPos::new(3.1, 4.9),
        WorldPos::new(100.0, 7.0),
    ];
    let out_of_range: Vec<_> = samples
        .iter()
        .map(|&p| move_component(p, floor))
        .filter(|m| m.x < 0.0 || m.z < 0.0 || m.x > limit + 1e-4 || m.z > limit + 1e-4)
        .collect();
    results.push(check(
        "move_clamped",
        out_of_range.is_empty(),
        format!("limit {:.1}, violations {:?}", limit, out_of_range),
    ));

    results
}

// ── 4. Paint scenario ───────────────────────────────────────────────────

fn validate_paint_scenario() -> Vec<TestResult> {
    println!("--- Paint Scenario ---");
    let mut results = Vec::new();

    let mut wh = WarehouseSession::new();
    if let Err(errors) = wh.configure(10, 10) {
        results.push(check("configure", false, format!("{:?}", errors)));
        return results;
    }
    wh.set_view_mode(ViewMode::Edit);
    wh.set_tool(Tool::Pathway);

    wh.pointer_down(Some(CellPos::new(2, 2)));
    wh.pointer_move(Some(CellPos::new(2, 3)));
    wh.pointer_move(Some(CellPos::new(2, 4)));
    wh.pointer_up();

    let regions = extract_regions(wh.grid(), CellKind::Pathway);
    let bounds: Vec<_> = regions
        .iter()
        .map(|r| (r.start_row, r.end_row, r.start_col, r.end_col))
        .collect();
    results.push(check(
        "single_pathway_region",
        bounds == vec![(2, 2, 2, 4)],
        format!("{:?}", bounds),
    ));

    let painted = wh.grid().clone();
    let mut undone = 0;
    while wh.undo() {
        undone += 1;
    }
    results.push(check(
        "undo_to_blank",
        undone == 3 && wh.grid().is_blank(),
        format!("{} undos, {} cells left", undone, wh.grid().painted_count()),
    ));

    while wh.redo() {}
    results.push(check(
        "redo_to_painted",
        wh.grid() == &painted,
        format!("{} cells", wh.grid().painted_count()),
    ));

    wh.set_edit_mode(EditMode::Selection);
    wh.set_tool(Tool::Eraser);
    wh.pointer_down(Some(CellPos::new(0, 0)));
    wh.pointer_move(Some(CellPos::new(9, 9)));
    let erased = wh.pointer_up();
    results.push(check(
        "selection_erase",
        erased && wh.grid().is_blank() && wh.editor().history_len() == 4,
        format!("history {}", wh.editor().history_len()),
    ));

    results
}

// ── 5. Random edits ─────────────────────────────────────────────────────

fn random_cell(rng: &mut StdRng, rows: usize, columns: usize) -> CellPos {
    CellPos::new(rng.gen_range(0..rows), rng.gen_range(0..columns))
}

fn random_style(rng: &mut StdRng) -> PathwayStyle {
    const COLORS: [&str; 3] = ["#FFD700", "#FF5722", "#03A9F4"];
    PathwayStyle {
        color: COLORS[rng.gen_range(0..COLORS.len())].to_string(),
        width: rng.gen_range(0.3..=1.5),
        opacity: rng.gen_range(0.1..=1.0),
    }
}

fn validate_random_edits(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Random Edit Sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    const EDITS: usize = 400;
    let mut editor = GridPaintEditor::new(MAX_GRID_DIM, MAX_GRID_DIM, EDITS);
    let tools = [Tool::Floor, Tool::Pathway, Tool::Eraser];

    let mut recorded = 0;
    let mut states = vec![editor.snapshot()];
    for _ in 0..EDITS {
        let tool = tools[rng.gen_range(0..tools.len())];
        let style = random_style(&mut rng);
        let a = random_cell(&mut rng, MAX_GRID_DIM, MAX_GRID_DIM);
        let changed = if rng.gen_bool(0.7) {
            editor.paint(a, tool, &style)
        } else {
            let b = random_cell(&mut rng, MAX_GRID_DIM, MAX_GRID_DIM);
            editor.fill_rectangle(a, b, tool, &style)
        };
        if changed {
            recorded += 1;
            states.push(editor.snapshot());
        }
    }

    results.push(check(
        "history_counts_changes",
        editor.history_len() == recorded,
        format!("{} of {} edits recorded", recorded, EDITS),
    ));

    // Walk back through every recorded state
    let mut mismatches = 0;
    for expected in states.iter().rev().skip(1) {
        if !editor.undo() || editor.grid() != expected {
            mismatches += 1;
        }
    }
    results.push(check(
        "undo_replays_states",
        mismatches == 0 && editor.grid().is_blank() && !editor.can_undo(),
        format!("{} mismatched states", mismatches),
    ));

    let mut redone = 0;
    while editor.redo() {
        redone += 1;
    }
    let last = states.last().cloned().unwrap_or_else(|| WarehouseGrid::new(0, 0));
    results.push(check(
        "redo_replays_states",
        redone == recorded && editor.grid() == &last,
        format!("{} redos", redone),
    ));

    if verbose {
        println!(
            "  Final grid: {} painted cells, {} pathway regions, {} floor regions",
            editor.grid().painted_count(),
            extract_regions(editor.grid(), CellKind::Pathway).len(),
            extract_regions(editor.grid(), CellKind::Floor).len()
        );
    }

    results
}

// ── 6. Region coverage ──────────────────────────────────────────────────

fn validate_region_coverage(seed: u64) -> Vec<TestResult> {
    println!("--- Region Coverage ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    let mut grid = WarehouseGrid::new(30, 30);
    for _ in 0..300 {
        let cell = random_cell(&mut rng, 30, 30);
        let value = if rng.gen_bool(0.5) {
            CellValue::Floor
        } else {
            CellValue::Pathway(random_style(&mut rng))
        };
        grid.set(cell, Some(value));
    }

    for kind in [CellKind::Floor, CellKind::Pathway] {
        let regions = extract_regions(&grid, kind);
        let uncovered = grid
            .iter()
            .filter(|(_, v)| v.map(|v| v.kind()) == Some(kind))
            .filter(|(cell, v)| {
                !regions.iter().any(|r| {
                    r.contains(*cell)
                        && v.and_then(|v| v.style()).map_or(true, |s| s.color == r.color)
                })
            })
            .count();
        let painted = grid
            .iter()
            .filter(|(_, v)| v.map(|v| v.kind()) == Some(kind))
            .count();
        results.push(check(
            &format!("{:?}_cells_covered", kind).to_lowercase(),
            uncovered == 0 && regions.len() <= painted,
            format!("{} regions over {} cells, {} uncovered", regions.len(), painted, uncovered),
        ));
    }

    results
}

// ── 7. Export shape ─────────────────────────────────────────────────────

fn validate_export_shape(verbose: bool) -> Vec<TestResult> {
    println!("--- Export Shape ---");
    let mut results = Vec::new();

    let mut wh = WarehouseSession::new();
    if let Ok(fixture) = parse_warehouse_fixture(WAREHOUSE_JSON) {
        wh.load_fixture(fixture);
    }
    if let Err(errors) = wh.configure(10, 10) {
        results.push(check("configure", false, format!("{:?}", errors)));
        return results;
    }
    wh.set_view_mode(ViewMode::Edit);
    wh.set_edit_mode(EditMode::Selection);
    wh.set_tool(Tool::Pathway);
    wh.pointer_down(Some(CellPos::new(2, 0)));
    wh.pointer_move(Some(CellPos::new(2, 9)));
    wh.pointer_up();
    wh.set_tool(Tool::Floor);
    wh.pointer_down(Some(CellPos::new(4, 4)));
    wh.pointer_move(Some(CellPos::new(5, 5)));
    wh.pointer_up();

    let layout = wh.export_all_data();
    let json = match layout_to_json(&layout) {
        Ok(j) => j,
        Err(e) => {
            results.push(check("export_serialize", false, format!("{}", e)));
            return results;
        }
    };

    let shape: Result<ExportShape, _> = serde_json::from_str(&json);
    results.push(check(
        "export_top_level_keys",
        shape.is_ok(),
        match &shape {
            Ok(s) => format!(
                "{} inventory, {} pathways, {} floors",
                s.inventory.len(),
                s.pathways.len(),
                s.floors.len()
            ),
            Err(e) => format!("{}", e),
        },
    ));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();
    let pathway_type = value["pathways"][0]["type"].as_str().unwrap_or("").to_string();
    results.push(check(
        "export_pathway_type",
        pathway_type == "floor",
        format!("type={:?}", pathway_type),
    ));

    let legacy = wh.export_grid_to_pathways();
    results.push(check(
        "legacy_pathway_type",
        legacy.len() == 1 && serde_json::to_value(&legacy[0]).map_or(false, |v| v["type"] == "pathway"),
        format!("{} legacy pathways", legacy.len()),
    ));

    let floor_ids: Vec<_> = layout.floors.iter().map(|f| f.id.as_str()).collect();
    results.push(check(
        "floor_tiles_numbered",
        floor_ids == ["floor-1", "floor-2", "floor-3", "floor-4"],
        format!("{:?}", floor_ids),
    ));

    if verbose {
        println!("  Export document:\n{}", json);
    }

    results
}
