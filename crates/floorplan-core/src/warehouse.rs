//! Warehouse session: configuration, inventory, pathways, and the paint editor.
//!
//! Pointer input arrives as already-resolved cells (`None` when the pointer
//! is outside the grid). In draw mode every painted cell is its own undo
//! step; in selection mode the drag rectangle is applied once on release.

use serde::{Deserialize, Serialize};

use floorplan_logic::config::{validate_editor_config, validate_pathway_style, ConfigError, EditorConfig};
use floorplan_logic::coords::CellPos;
use floorplan_logic::layout::{
    export_layout, pathway_records, ExportedLayout, InventoryItem, ItemUpdate, PathwayRecord,
    PathwayType, PathwayUpdate, WarehouseDims, WarehouseFixture,
};
use floorplan_logic::paint::{CellRect, GridPaintEditor, PathwayStyle, Tool, WarehouseGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Display,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Draw,
    Selection,
}

#[derive(Debug, Clone, Default)]
struct Gesture {
    drawing: bool,
    start: Option<CellPos>,
    end: Option<CellPos>,
}

pub struct WarehouseSession {
    config: EditorConfig,
    configured: bool,
    pub inventory: Vec<InventoryItem>,
    pub pathways: Vec<PathwayRecord>,
    view_mode: ViewMode,
    edit_mode: EditMode,
    tool: Tool,
    style: PathwayStyle,
    editor: GridPaintEditor,
    gesture: Gesture,
}

impl WarehouseSession {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Unconfigured session whose grid and history follow `config`.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            configured: false,
            inventory: Vec::new(),
            pathways: Vec::new(),
            view_mode: ViewMode::default(),
            edit_mode: EditMode::default(),
            tool: Tool::default(),
            style: PathwayStyle::default(),
            editor: GridPaintEditor::new(config.rows, config.columns, config.history_capacity),
            gesture: Gesture::default(),
        }
    }

    /// Set the grid dimensions. Rebuilds the paint grid and drops its history.
    pub fn configure(&mut self, rows: usize, columns: usize) -> Result<(), Vec<ConfigError>> {
        let config = EditorConfig {
            rows,
            columns,
            ..self.config
        };
        let errors = validate_editor_config(&config);
        if !errors.is_empty() {
            log::warn!("rejected warehouse configuration {}x{}: {:?}", rows, columns, errors);
            return Err(errors);
        }

        log::info!("warehouse configured as {}x{}", rows, columns);
        self.config = config;
        self.editor = GridPaintEditor::new(rows, columns, config.history_capacity);
        self.gesture = Gesture::default();
        self.configured = true;
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn dims(&self) -> WarehouseDims {
        WarehouseDims {
            rows: self.config.rows,
            columns: self.config.columns,
        }
    }

    /// Back to a 10×10 unconfigured, empty warehouse in display mode.
    ///
    /// The edit mode, tool, and pathway style carry over.
    pub fn reset(&mut self) {
        let history_capacity = self.config.history_capacity;
        let fresh = Self::with_config(EditorConfig {
            history_capacity,
            ..EditorConfig::default()
        });
        let previous = std::mem::replace(self, fresh);
        self.edit_mode = previous.edit_mode;
        self.tool = previous.tool;
        self.style = previous.style;
        log::info!("warehouse reset");
    }

    // ── Inventory ───────────────────────────────────────────────────────

    pub fn load_fixture(&mut self, fixture: WarehouseFixture) {
        self.load_inventory(fixture.inventory);
        self.load_pathways(fixture.pathways);
    }

    pub fn load_inventory(&mut self, items: Vec<InventoryItem>) {
        let (rows, columns) = (self.config.rows, self.config.columns);
        for item in &items {
            match item.cell() {
                Some(cell) if cell.row < rows && cell.col < columns => {}
                _ => log::warn!(
                    "inventory item '{}' at row {}, column {} is outside the {}x{} grid",
                    item.id,
                    item.row,
                    item.column,
                    rows,
                    columns
                ),
            }
        }
        self.inventory = items;
    }

    pub fn add_item(&mut self, item: InventoryItem) {
        self.inventory.push(item);
    }

    pub fn update_item(&mut self, id: &str, update: &ItemUpdate) -> bool {
        match self.inventory.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                update.apply(item);
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.inventory.len();
        self.inventory.retain(|i| i.id != id);
        self.inventory.len() < before
    }

    // ── Displayed pathways ──────────────────────────────────────────────

    pub fn load_pathways(&mut self, pathways: Vec<PathwayRecord>) {
        self.pathways = pathways;
    }

    pub fn add_pathway(&mut self, pathway: PathwayRecord) {
        self.pathways.push(pathway);
    }

    pub fn update_pathway(&mut self, id: &str, update: &PathwayUpdate) -> bool {
        match self.pathways.iter_mut().find(|p| p.id == id) {
            Some(pathway) => {
                update.apply(pathway);
                true
            }
            None => false,
        }
    }

    pub fn remove_pathway(&mut self, id: &str) -> bool {
        let before = self.pathways.len();
        self.pathways.retain(|p| p.id != id);
        self.pathways.len() < before
    }

    // ── Modes & tools ───────────────────────────────────────────────────

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.gesture = Gesture::default();
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        let next = match self.view_mode {
            ViewMode::Display => ViewMode::Edit,
            ViewMode::Edit => ViewMode::Display,
        };
        self.set_view_mode(next);
        next
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.edit_mode = mode;
        self.gesture = Gesture::default();
    }

    pub fn toggle_edit_mode(&mut self) -> EditMode {
        let next = match self.edit_mode {
            EditMode::Draw => EditMode::Selection,
            EditMode::Selection => EditMode::Draw,
        };
        self.set_edit_mode(next);
        next
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn style(&self) -> &PathwayStyle {
        &self.style
    }

    pub fn set_pathway_style(&mut self, style: PathwayStyle) -> Result<(), Vec<ConfigError>> {
        let errors = validate_pathway_style(&style);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.style = style;
        Ok(())
    }

    // ── Pointer protocol ────────────────────────────────────────────────

    /// Start a gesture. Returns whether the grid changed.
    pub fn pointer_down(&mut self, cell: Option<CellPos>) -> bool {
        if self.view_mode != ViewMode::Edit {
            return false;
        }
        match self.edit_mode {
            EditMode::Selection => {
                self.gesture.start = cell;
                self.gesture.end = cell;
                false
            }
            EditMode::Draw => {
                self.gesture.drawing = true;
                self.paint(cell)
            }
        }
    }

    pub fn pointer_move(&mut self, cell: Option<CellPos>) -> bool {
        if self.view_mode != ViewMode::Edit {
            return false;
        }
        match self.edit_mode {
            EditMode::Selection => {
                if self.gesture.start.is_some() && cell.is_some() {
                    self.gesture.end = cell;
                }
                false
            }
            EditMode::Draw if self.gesture.drawing => self.paint(cell),
            EditMode::Draw => false,
        }
    }

    /// End a gesture; in selection mode this applies the rectangle.
    pub fn pointer_up(&mut self) -> bool {
        let gesture = std::mem::take(&mut self.gesture);
        if self.view_mode != ViewMode::Edit || self.edit_mode != EditMode::Selection {
            return false;
        }
        let (Some(start), Some(end)) = (gesture.start, gesture.end) else {
            return false;
        };
        match self.tool {
            Tool::Eraser => self.editor.erase_rectangle(start, end),
            tool => self.editor.fill_rectangle(start, end, tool, &self.style),
        }
    }

    fn paint(&mut self, cell: Option<CellPos>) -> bool {
        match cell {
            Some(cell) => self.editor.paint(cell, self.tool, &self.style),
            None => false,
        }
    }

    /// Rectangle of the selection drag in progress, for the overlay.
    pub fn selection_rect(&self) -> Option<CellRect> {
        Some(CellRect::spanning(self.gesture.start?, self.gesture.end?))
    }

    // ── Grid & history ──────────────────────────────────────────────────

    pub fn grid(&self) -> &WarehouseGrid {
        self.editor.grid()
    }

    pub fn editor(&self) -> &GridPaintEditor {
        &self.editor
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn clear_grid(&mut self) {
        self.editor.clear();
        self.gesture = Gesture::default();
    }

    // ── Export ──────────────────────────────────────────────────────────

    pub fn export_all_data(&self) -> ExportedLayout {
        export_layout(self.editor.grid(), self.dims(), &self.inventory)
    }

    /// Painted pathways in the older `type: "pathway"` shape.
    pub fn export_grid_to_pathways(&self) -> Vec<PathwayRecord> {
        pathway_records(self.editor.grid(), PathwayType::Pathway)
    }

    /// Replace the displayed pathways with the ones painted on the grid.
    pub fn apply_grid_to_display(&mut self) -> usize {
        self.pathways = self.export_grid_to_pathways();
        log::info!("displaying {} painted pathways", self.pathways.len());
        self.pathways.len()
    }
}

impl Default for WarehouseSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_logic::layout::InventoryKind;
    use floorplan_logic::paint::CellValue;

    fn editing(rows: usize, columns: usize) -> WarehouseSession {
        let mut s = WarehouseSession::new();
        s.configure(rows, columns).unwrap();
        s.set_view_mode(ViewMode::Edit);
        s
    }

    fn cell(row: usize, col: usize) -> Option<CellPos> {
        Some(CellPos::new(row, col))
    }

    #[test]
    fn configure_validates_dimensions() {
        let mut s = WarehouseSession::new();
        assert!(!s.is_configured());
        let errs = s.configure(0, 60).unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(!s.is_configured());

        s.configure(20, 30).unwrap();
        assert!(s.is_configured());
        assert_eq!((s.grid().rows(), s.grid().columns()), (20, 30));
    }

    #[test]
    fn display_mode_ignores_pointer() {
        let mut s = WarehouseSession::new();
        s.configure(10, 10).unwrap();
        assert!(!s.pointer_down(cell(1, 1)));
        assert!(s.grid().is_blank());
    }

    #[test]
    fn draw_gesture_paints_each_cell() {
        let mut s = editing(10, 10);
        s.set_tool(Tool::Pathway);
        assert!(s.pointer_down(cell(2, 2)));
        assert!(s.pointer_move(cell(2, 3)));
        assert!(s.pointer_move(cell(2, 4)));
        assert!(!s.pointer_move(None));
        s.pointer_up();
        assert!(!s.pointer_move(cell(2, 5)));

        assert_eq!(s.grid().painted_count(), 3);
        assert_eq!(s.editor().history_len(), 3);

        let paths = s.export_grid_to_pathways();
        assert_eq!(paths.len(), 1);
        assert_eq!((paths[0].start_col, paths[0].end_col), (2, 4));
        assert_eq!(paths[0].kind, PathwayType::Pathway);
    }

    #[test]
    fn selection_gesture_is_one_edit() {
        let mut s = editing(10, 10);
        s.set_edit_mode(EditMode::Selection);
        assert!(!s.pointer_down(cell(1, 1)));
        s.pointer_move(cell(3, 4));
        assert_eq!(
            s.selection_rect(),
            Some(CellRect::spanning(CellPos::new(1, 1), CellPos::new(3, 4)))
        );
        assert!(s.grid().is_blank());

        assert!(s.pointer_up());
        assert_eq!(s.grid().painted_count(), 12);
        assert_eq!(s.editor().history_len(), 1);
        assert_eq!(s.selection_rect(), None);

        s.set_tool(Tool::Eraser);
        s.pointer_down(cell(1, 1));
        s.pointer_move(cell(1, 4));
        assert!(s.pointer_up());
        assert_eq!(s.grid().painted_count(), 8);

        assert!(s.undo());
        assert_eq!(s.grid().painted_count(), 12);
        assert!(s.redo());
        assert_eq!(s.grid().painted_count(), 8);
    }

    #[test]
    fn selection_without_start_is_noop() {
        let mut s = editing(10, 10);
        s.set_edit_mode(EditMode::Selection);
        s.pointer_down(None);
        s.pointer_move(cell(4, 4));
        assert!(!s.pointer_up());
        assert_eq!(s.editor().history_index(), -1);
    }

    #[test]
    fn pathway_style_is_validated() {
        let mut s = editing(5, 5);
        let bad = PathwayStyle {
            color: "#FFD700".into(),
            width: 3.0,
            opacity: 0.5,
        };
        assert!(s.set_pathway_style(bad).is_err());
        let blue = PathwayStyle {
            color: "#0000FF".into(),
            width: 1.2,
            opacity: 0.9,
        };
        s.set_pathway_style(blue.clone()).unwrap();
        s.set_tool(Tool::Pathway);
        s.pointer_down(cell(0, 0));
        assert_eq!(s.grid().get(CellPos::new(0, 0)), Some(&CellValue::Pathway(blue)));
    }

    #[test]
    fn inventory_crud() {
        let mut s = WarehouseSession::new();
        s.add_item(InventoryItem {
            id: "S-1".into(),
            kind: InventoryKind::Sack,
            row: 1,
            column: 2,
            stack_height: 1,
            position: Default::default(),
        });
        let update = ItemUpdate {
            row: Some(4),
            ..ItemUpdate::default()
        };
        assert!(s.update_item("S-1", &update));
        assert_eq!(s.inventory[0].row, 4);
        assert!(!s.update_item("S-2", &update));
        assert!(s.remove_item("S-1"));
        assert!(s.inventory.is_empty());
    }

    #[test]
    fn apply_grid_replaces_displayed_pathways() {
        let mut s = editing(10, 10);
        s.set_tool(Tool::Pathway);
        s.pointer_down(cell(5, 5));
        s.pointer_up();

        let json = r##"{"id": "old", "startRow": 0, "startCol": 0, "endRow": 0, "endCol": 0,
                        "width": 1, "color": "#FF0000", "opacity": 1, "type": "bridge"}"##;
        s.add_pathway(serde_json::from_str(json).unwrap());
        assert_eq!(s.apply_grid_to_display(), 1);
        assert_eq!(s.pathways[0].start_row, 5);
        assert!(s.update_pathway(
            "region-1",
            &PathwayUpdate {
                kind: Some(PathwayType::Elevated),
                ..PathwayUpdate::default()
            }
        ));
        assert!(s.remove_pathway("region-1"));
    }

    #[test]
    fn export_uses_configured_dims() {
        let mut s = editing(12, 8);
        s.pointer_down(cell(11, 7));
        s.pointer_up();
        let layout = s.export_all_data();
        assert_eq!(layout.warehouse, WarehouseDims { rows: 12, columns: 8 });
        assert_eq!(layout.floors.len(), 1);
        assert_eq!((layout.floors[0].row, layout.floors[0].col), (11, 7));
    }

    #[test]
    fn clear_and_reset() {
        let mut s = editing(10, 10);
        s.pointer_down(cell(0, 0));
        s.pointer_up();
        s.clear_grid();
        assert!(s.grid().is_blank());
        assert!(!s.undo());

        s.configure(30, 30).unwrap();
        s.set_edit_mode(EditMode::Selection);
        s.set_tool(Tool::Eraser);
        let style = PathwayStyle {
            color: "#00FF00".into(),
            width: 1.2,
            opacity: 0.8,
        };
        s.set_pathway_style(style.clone()).unwrap();
        s.reset();
        assert!(!s.is_configured());
        assert_eq!(s.view_mode(), ViewMode::Display);
        assert_eq!(s.dims(), WarehouseDims { rows: 10, columns: 10 });
        assert!(s.pathways.is_empty());
        assert!(s.grid().is_blank());
        assert_eq!(s.edit_mode(), EditMode::Selection);
        assert_eq!(s.tool(), Tool::Eraser);
        assert_eq!(s.style(), &style);
    }
}
