//! Compress painted cells into rectangular regions for export.
//!
//! Cells of the requested kind are grouped by 4-neighbour connectivity
//! (diagonals do not connect). Pathway cells additionally only join when
//! their colors match. Each group is reported as its bounding rectangle, so
//! an L-shaped run comes out as the rectangle enclosing it, empty corner
//! included. Consumers of the exported layout expect rectangles.
//!
//! Seeds are discovered in row-major order and regions are numbered
//! `region-1`, `region-2`, ... in that order. Ids are not stable across
//! edits.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::pathway;
use crate::coords::CellPos;
use crate::paint::{CellKind, CellValue, WarehouseGrid};

/// Bounding rectangle of one connected run of same-kind cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
    pub width: f32,
    pub color: String,
    pub opacity: f32,
    #[serde(rename = "type")]
    pub kind: CellKind,
}

impl Region {
    pub fn contains(&self, cell: CellPos) -> bool {
        (self.start_row..=self.end_row).contains(&cell.row)
            && (self.start_col..=self.end_col).contains(&cell.col)
    }

    /// Number of cells covered by the rectangle.
    pub fn area(&self) -> usize {
        (self.end_row - self.start_row + 1) * (self.end_col - self.start_col + 1)
    }
}

fn connects(seed: &CellValue, other: Option<&CellValue>) -> bool {
    match (seed, other) {
        (CellValue::Floor, Some(CellValue::Floor)) => true,
        (CellValue::Pathway(a), Some(CellValue::Pathway(b))) => a.color == b.color,
        _ => false,
    }
}

// Zero or empty attributes fall back to the tool defaults.
fn region_style(seed: &CellValue) -> (f32, String, f32) {
    let style = seed.style();
    let width = style
        .map(|s| s.width)
        .filter(|w| *w != 0.0)
        .unwrap_or(pathway::DEFAULT_WIDTH);
    let color = style
        .map(|s| s.color.clone())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| pathway::DEFAULT_COLOR.to_string());
    let opacity = style
        .map(|s| s.opacity)
        .filter(|o| *o != 0.0)
        .unwrap_or(pathway::DEFAULT_OPACITY);
    (width, color, opacity)
}

/// Bounding rectangles of every connected run of `kind` cells.
pub fn extract_regions(grid: &WarehouseGrid, kind: CellKind) -> Vec<Region> {
    let (rows, columns) = (grid.rows(), grid.columns());
    let mut visited = vec![false; rows * columns];
    let mut regions = Vec::new();

    for row in 0..rows {
        for col in 0..columns {
            let start = CellPos::new(row, col);
            let Some(seed) = grid.get(start).filter(|v| v.kind() == kind) else {
                continue;
            };
            if visited[row * columns + col] {
                continue;
            }

            let (mut min_row, mut max_row, mut min_col, mut max_col) = (row, row, col, col);
            let mut queue = VecDeque::new();
            visited[row * columns + col] = true;
            queue.push_back(start);

            while let Some(cur) = queue.pop_front() {
                min_row = min_row.min(cur.row);
                max_row = max_row.max(cur.row);
                min_col = min_col.min(cur.col);
                max_col = max_col.max(cur.col);

                let mut neighbors = Vec::with_capacity(4);
                if cur.row > 0 {
                    neighbors.push(CellPos::new(cur.row - 1, cur.col));
                }
                if cur.row + 1 < rows {
                    neighbors.push(CellPos::new(cur.row + 1, cur.col));
                }
                if cur.col > 0 {
                    neighbors.push(CellPos::new(cur.row, cur.col - 1));
                }
                if cur.col + 1 < columns {
                    neighbors.push(CellPos::new(cur.row, cur.col + 1));
                }

                for next in neighbors {
                    let idx = next.row * columns + next.col;
                    if !visited[idx] && connects(seed, grid.get(next)) {
                        visited[idx] = true;
                        queue.push_back(next);
                    }
                }
            }

            let (width, color, opacity) = region_style(seed);
            regions.push(Region {
                id: format!("region-{}", regions.len() + 1),
                start_row: min_row,
                start_col: min_col,
                end_row: max_row,
                end_col: max_col,
                width,
                color,
                opacity,
                kind,
            });
        }
    }

    regions
}
