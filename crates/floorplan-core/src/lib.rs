//! Floorplan Core - editing sessions over the pure layout logic
//!
//! Holds the mutable state a frontend drives: the data-center floor with its
//! tile selection and placement mode, and the warehouse with its inventory,
//! displayed pathways, and paint editor.
//!
//! # Example
//!
//! ```rust
//! use floorplan_core::prelude::*;
//!
//! let mut warehouse = WarehouseSession::new();
//! warehouse.configure(10, 10).unwrap();
//! warehouse.set_view_mode(ViewMode::Edit);
//! warehouse.set_tool(Tool::Pathway);
//! warehouse.pointer_down(Some(CellPos::new(2, 2)));
//! warehouse.pointer_up();
//! assert_eq!(warehouse.export_all_data().pathways.len(), 1);
//! ```

pub mod datacenter;
pub mod persistence;
pub mod warehouse;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::datacenter::{DataCenterSession, TileState};
    pub use crate::persistence::{parse_floor_config, parse_warehouse_fixture, PersistenceError};
    pub use crate::warehouse::{EditMode, ViewMode, WarehouseSession};
    pub use floorplan_logic::coords::{CellPos, TileCoord, WorldPos};
    pub use floorplan_logic::paint::Tool;
    pub use floorplan_logic::placement::ComponentKind;
}
