//! Layout constants — tile sizes, footprints, grid limits, style defaults.
//!
//! Plain `const` values with no runtime dependency. The sessions, the
//! harness, and the tests all read them from here.

/// Metric side length of one data-center floor tile.
pub const TILE_SIZE: f32 = 2.0;

/// Metric side length of one warehouse cell in the 3D scene.
pub const CELL_SIZE: f32 = 2.0;

/// Placed components are drawn slightly smaller than their tile footprint.
pub const COMPONENT_INSET: f32 = 0.9;

/// Fraction of the floor's metric extent a dragged component may reach.
pub const MOVE_EXTENT_FACTOR: f32 = 0.3;

/// Largest rows/columns count accepted for a warehouse grid.
pub const MAX_GRID_DIM: usize = 50;

/// Undo depth kept by the paint editor unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

pub mod footprints {
    //! Tile footprints `(width, depth)` per component kind.
    pub const RACK: (u32, u32) = (2, 2);
    pub const AC_UNIT: (u32, u32) = (2, 4);
    pub const GENERATOR: (u32, u32) = (4, 4);
}

pub mod heights {
    //! Metric heights per component kind.
    pub const RACK: f32 = 2.0;
    pub const AC_UNIT: f32 = 1.2;
    pub const GENERATOR: f32 = 1.5;
}

/// Rack unit count for newly placed racks.
pub const RACK_UNITS: u32 = 42;

pub mod pathway {
    //! Pathway tool defaults and slider limits.
    pub const DEFAULT_COLOR: &str = "#FFD700";
    pub const DEFAULT_WIDTH: f32 = 0.8;
    pub const DEFAULT_OPACITY: f32 = 0.5;
    pub const MIN_WIDTH: f32 = 0.3;
    pub const MAX_WIDTH: f32 = 1.5;
    pub const MIN_OPACITY: f32 = 0.1;
    pub const MAX_OPACITY: f32 = 1.0;
}

/// Warehouse dimensions before the user configures anything.
pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLUMNS: usize = 10;
