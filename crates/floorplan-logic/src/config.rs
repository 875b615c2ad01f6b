//! Warehouse editor configuration and validation.
//!
//! The configuration dialog collects grid dimensions and the pathway tool
//! settings. Validation returns every problem found rather than stopping
//! at the first, so a form can show them all at once.
//!
//! ```
//! use floorplan_logic::config::{validate_editor_config, EditorConfig};
//!
//! let config = EditorConfig { rows: 20, columns: 30, ..EditorConfig::default() };
//! assert!(validate_editor_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{pathway, DEFAULT_COLUMNS, DEFAULT_HISTORY_CAPACITY, DEFAULT_ROWS, MAX_GRID_DIM};
use crate::paint::PathwayStyle;

/// Dimensions and undo depth of a warehouse paint grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    pub rows: usize,
    pub columns: usize,
    pub history_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Rows outside `1..=MAX_GRID_DIM`.
    InvalidRows(usize),
    /// Columns outside `1..=MAX_GRID_DIM`.
    InvalidColumns(usize),
    /// Undo history must keep at least one entry.
    ZeroHistoryCapacity,
    /// Pathway width outside the slider range.
    InvalidPathwayWidth(f32),
    /// Opacity outside the slider range.
    InvalidOpacity(f32),
    /// Color is not `#RRGGBB`.
    InvalidColor(String),
}

pub fn validate_editor_config(config: &EditorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !(1..=MAX_GRID_DIM).contains(&config.rows) {
        errors.push(ConfigError::InvalidRows(config.rows));
    }
    if !(1..=MAX_GRID_DIM).contains(&config.columns) {
        errors.push(ConfigError::InvalidColumns(config.columns));
    }
    if config.history_capacity == 0 {
        errors.push(ConfigError::ZeroHistoryCapacity);
    }

    errors
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn validate_pathway_style(style: &PathwayStyle) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !(pathway::MIN_WIDTH..=pathway::MAX_WIDTH).contains(&style.width) {
        errors.push(ConfigError::InvalidPathwayWidth(style.width));
    }
    if !(pathway::MIN_OPACITY..=pathway::MAX_OPACITY).contains(&style.opacity) {
        errors.push(ConfigError::InvalidOpacity(style.opacity));
    }
    if !is_hex_color(&style.color) {
        errors.push(ConfigError::InvalidColor(style.color.clone()));
    }

    errors
}
