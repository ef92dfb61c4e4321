//! `sheetsense-structure`: financial table structure inference.
//!
//! Pure engine crate: receives a grid snapshot (values, formula text, number
//! formats), returns a `StructuredTable`. No CLI or IO dependencies.

pub mod address;
pub mod cell;
pub mod config;
mod context;
pub mod engine;
pub mod error;
pub mod format;
pub mod formula;
pub mod grid;
pub mod header;
pub mod histogram;
pub mod model;
pub mod quarter;
pub mod rows;
pub mod sampling;
pub mod session;
pub mod summary;

pub use cell::{Cell, CellType};
pub use config::StructureConfig;
pub use engine::analyze;
pub use error::StructureError;
pub use grid::{GridSnapshot, RawValue, WorkbookObjects};
pub use model::StructuredTable;
pub use rows::{Row, RowCategory};
pub use session::StructureSession;
