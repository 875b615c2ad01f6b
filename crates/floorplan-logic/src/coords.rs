//! Coordinate transforms between tile space, world space, and canvas pixels.
//!
//! All functions are pure and total. Out-of-range inputs produce out-of-range
//! outputs; callers check them with [`is_in_bounds`] or the occupancy map.
//!
//! Rounding is half-up (`floor(v + 0.5)`) so `-0.5` maps to `0`, not `-1`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CELL_SIZE, TILE_SIZE};

/// Integer tile index on the data-center floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileCoord {
    pub grid_x: i32,
    pub grid_z: i32,
}

impl TileCoord {
    pub const fn new(grid_x: i32, grid_z: i32) -> Self {
        Self { grid_x, grid_z }
    }

    /// Tile `dx, dz` away, or `None` past the `i32` range.
    pub fn checked_offset(self, dx: i32, dz: i32) -> Option<Self> {
        Some(Self {
            grid_x: self.grid_x.checked_add(dx)?,
            grid_z: self.grid_z.checked_add(dz)?,
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.grid_x, self.grid_z)
    }
}

/// Metric position on the floor plane (y is implicit, always 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// Zero-based warehouse grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Floor extent in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub depth: u32,
}

impl GridSize {
    pub const fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }

    /// Whether a tile index lies on this floor.
    pub fn contains(&self, tile: TileCoord) -> bool {
        tile.grid_x >= 0
            && tile.grid_z >= 0
            && (tile.grid_x as i64) < self.width as i64
            && (tile.grid_z as i64) < self.depth as i64
    }
}

fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// Snap a free world coordinate onto the tile lattice.
pub fn snap_to_grid(value: f32) -> f32 {
    round_half_up(value / TILE_SIZE) * TILE_SIZE
}

/// World position of a (possibly fractional) grid coordinate.
///
/// Fractional inputs are how multi-tile components get a centered position:
/// a 2×2 rack anchored at `(0, 0)` sits at `grid_to_world(0.5, 0.5)`.
pub fn grid_to_world(grid_x: f32, grid_z: f32) -> WorldPos {
    WorldPos {
        x: grid_x * TILE_SIZE,
        z: grid_z * TILE_SIZE,
    }
}

/// Nearest tile index for a world position.
pub fn world_to_grid(x: f32, z: f32) -> TileCoord {
    TileCoord {
        grid_x: round_half_up(x / TILE_SIZE) as i32,
        grid_z: round_half_up(z / TILE_SIZE) as i32,
    }
}

/// Whether a world position snaps to a tile inside a `grid_width × grid_depth` floor.
pub fn is_in_bounds(x: f32, z: f32, grid_width: u32, grid_depth: u32) -> bool {
    GridSize::new(grid_width, grid_depth).contains(world_to_grid(x, z))
}

/// Scene-space center of a warehouse cell.
pub fn warehouse_cell_center(cell: CellPos) -> WorldPos {
    WorldPos {
        x: cell.col as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        z: cell.row as f32 * CELL_SIZE + CELL_SIZE / 2.0,
    }
}

/// Map a canvas pixel to the editor cell under it.
///
/// `offset` is the pan offset in pixels and `cell_px` the on-screen cell
/// size after zoom. Returns `None` for pixels outside the grid, which is how
/// pointer events past the canvas edge become no-ops.
pub fn canvas_to_cell(
    px: f32,
    py: f32,
    offset: (f32, f32),
    cell_px: f32,
    rows: usize,
    columns: usize,
) -> Option<CellPos> {
    if cell_px <= 0.0 {
        return None;
    }
    let col = ((px - offset.0) / cell_px).floor();
    let row = ((py - offset.1) / cell_px).floor();
    if row < 0.0 || col < 0.0 {
        return None;
    }
    let (row, col) = (row as usize, col as usize);
    (row < rows && col < columns).then_some(CellPos { row, col })
}
