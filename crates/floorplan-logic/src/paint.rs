//! Warehouse paint grid and the free-form grid editor.
//!
//! `WarehouseGrid` is a fixed `rows × columns` matrix of optional cell
//! values, stored row-major behind an `Arc`. Cloning is a snapshot:
//! mutations go through `Arc::make_mut`, so history entries and render
//! copies never change after they are handed out.
//!
//! `GridPaintEditor` layers the editing tools and a linear undo history
//! on top. Every discrete edit that changes the grid (one painted cell, or
//! one whole rectangle fill/erase) is exactly one history entry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::pathway;
use crate::coords::CellPos;
use crate::history::History;

/// Visual attributes of a painted pathway cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayStyle {
    pub color: String,
    pub width: f32,
    pub opacity: f32,
}

impl Default for PathwayStyle {
    fn default() -> Self {
        Self {
            color: pathway::DEFAULT_COLOR.to_string(),
            width: pathway::DEFAULT_WIDTH,
            opacity: pathway::DEFAULT_OPACITY,
        }
    }
}

/// Content of a non-empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellValue {
    Floor,
    Pathway(PathwayStyle),
}

impl CellValue {
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Floor => CellKind::Floor,
            CellValue::Pathway(_) => CellKind::Pathway,
        }
    }

    pub fn style(&self) -> Option<&PathwayStyle> {
        match self {
            CellValue::Floor => None,
            CellValue::Pathway(style) => Some(style),
        }
    }
}

/// Discriminant of [`CellValue`], used to select what to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Floor,
    Pathway,
}

/// Active paint tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Floor,
    Pathway,
    Eraser,
}

impl Tool {
    /// Value this tool writes into a cell.
    pub fn cell_value(self, style: &PathwayStyle) -> Option<CellValue> {
        match self {
            Tool::Floor => Some(CellValue::Floor),
            Tool::Pathway => Some(CellValue::Pathway(style.clone())),
            Tool::Eraser => None,
        }
    }
}

/// Inclusive rectangle of cells, normalized so `min <= max` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min: CellPos,
    pub max: CellPos,
}

impl CellRect {
    /// Rectangle spanned by two arbitrary corners.
    pub fn spanning(a: CellPos, b: CellPos) -> Self {
        Self {
            min: CellPos::new(a.row.min(b.row), a.col.min(b.col)),
            max: CellPos::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        (self.min.row..=self.max.row)
            .flat_map(move |row| (self.min.col..=self.max.col).map(move |col| CellPos::new(row, col)))
    }

    /// Part of this rectangle inside a `rows × columns` grid, if any.
    pub fn clip(&self, rows: usize, columns: usize) -> Option<CellRect> {
        if rows == 0 || columns == 0 || self.min.row >= rows || self.min.col >= columns {
            return None;
        }
        Some(CellRect {
            min: self.min,
            max: CellPos::new(self.max.row.min(rows - 1), self.max.col.min(columns - 1)),
        })
    }
}

/// Fixed-size paint grid. Clones are immutable snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseGrid {
    rows: usize,
    columns: usize,
    cells: Arc<Vec<Option<CellValue>>>,
}

impl WarehouseGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: Arc::new(vec![None; rows * columns]),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, cell: CellPos) -> bool {
        cell.row < self.rows && cell.col < self.columns
    }

    fn index(&self, cell: CellPos) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.columns + cell.col)
    }

    /// Value at `cell`; `None` for empty or out-of-bounds cells.
    pub fn get(&self, cell: CellPos) -> Option<&CellValue> {
        self.index(cell).and_then(|i| self.cells[i].as_ref())
    }

    /// Write `value` into `cell`. Returns whether the grid changed.
    ///
    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, cell: CellPos, value: Option<CellValue>) -> bool {
        let Some(i) = self.index(cell) else {
            return false;
        };
        if self.cells[i] == value {
            return false;
        }
        Arc::make_mut(&mut self.cells)[i] = value;
        true
    }

    /// Every cell with its value, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, Option<&CellValue>)> + '_ {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (CellPos::new(i / columns, i % columns), v.as_ref()))
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// Paint tools plus linear undo/redo over grid snapshots.
#[derive(Debug, Clone)]
pub struct GridPaintEditor {
    grid: WarehouseGrid,
    history: History<WarehouseGrid>,
}

impl GridPaintEditor {
    pub fn new(rows: usize, columns: usize, history_capacity: usize) -> Self {
        Self {
            grid: WarehouseGrid::new(rows, columns),
            history: History::with_capacity(history_capacity),
        }
    }

    pub fn grid(&self) -> &WarehouseGrid {
        &self.grid
    }

    /// Immutable copy of the current grid.
    pub fn snapshot(&self) -> WarehouseGrid {
        self.grid.clone()
    }

    /// Apply `tool` to one cell as its own edit.
    ///
    /// Returns `false` (no edit, no history) for out-of-bounds cells and for
    /// paints that leave the cell unchanged.
    pub fn paint(&mut self, cell: CellPos, tool: Tool, style: &PathwayStyle) -> bool {
        if !self.grid.contains(cell) {
            log::debug!("paint outside grid at ({}, {}) ignored", cell.row, cell.col);
            return false;
        }
        let before = self.grid.clone();
        let changed = self.grid.set(cell, tool.cell_value(style));
        self.commit(before, changed)
    }

    /// Apply `tool` to every cell of the rectangle spanned by `a` and `b`, as one edit.
    pub fn fill_rectangle(&mut self, a: CellPos, b: CellPos, tool: Tool, style: &PathwayStyle) -> bool {
        self.apply_rect(a, b, tool.cell_value(style))
    }

    /// Clear every cell of the rectangle spanned by `a` and `b`, as one edit.
    pub fn erase_rectangle(&mut self, a: CellPos, b: CellPos) -> bool {
        self.apply_rect(a, b, None)
    }

    fn apply_rect(&mut self, a: CellPos, b: CellPos, value: Option<CellValue>) -> bool {
        let Some(rect) = CellRect::spanning(a, b).clip(self.grid.rows(), self.grid.columns()) else {
            return false;
        };
        let before = self.grid.clone();
        let mut changed = false;
        for cell in rect.cells() {
            changed |= self.grid.set(cell, value.clone());
        }
        self.commit(before, changed)
    }

    fn commit(&mut self, before: WarehouseGrid, changed: bool) -> bool {
        if changed {
            self.history.push(before, self.grid.clone());
        }
        changed
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(prev) => {
                self.grid = prev.clone();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.grid = next.clone();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// `-1` when there is nothing to undo.
    pub fn history_index(&self) -> isize {
        self.history.index()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Blank the grid and forget all history. Not undoable.
    pub fn clear(&mut self) {
        self.grid = WarehouseGrid::new(self.grid.rows(), self.grid.columns());
        self.history.clear();
    }
}
