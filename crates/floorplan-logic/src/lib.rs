//! Pure floor-plan logic for the data-center and warehouse editors.
//!
//! This crate contains everything about layouts that is independent of
//! rendering, UI, or I/O. Functions take plain data and return results, so
//! the sessions in `floorplan-core`, the headless harness, and any future
//! frontend share one implementation.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`collision`] | Strict AABB overlap between placed components |
//! | [`config`] | Editor dimensions, pathway style limits, validation |
//! | [`constants`] | Tile size, footprints, grid limits, defaults |
//! | [`coords`] | Grid ↔ world mapping, snapping, canvas picking |
//! | [`history`] | Linear snapshot undo/redo with bounded capacity |
//! | [`layout`] | Fixture records and the exported layout schema |
//! | [`occupancy`] | Copy-on-write tile → component ownership map |
//! | [`paint`] | Warehouse paint grid and the paint editor |
//! | [`placement`] | Component kinds, footprint validation, place/move/remove |
//! | [`regions`] | Flood-fill compression of painted cells into rectangles |

pub mod collision;
pub mod config;
pub mod constants;
pub mod coords;
pub mod history;
pub mod layout;
pub mod occupancy;
pub mod paint;
pub mod placement;
pub mod regions;
