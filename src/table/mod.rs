//! Flat tables of feature properties
//!
//! A [`Table`] is an ordered list of sparse [`Row`]s plus the union of their
//! column names. Cells are [`CellValue`]s: null, boolean, integer, float,
//! string, or a raw JSON value for anything that isn't a scalar.

pub mod builder;
pub mod types;
pub mod value;

pub use builder::TableBuilder;
pub use types::{ColumnSummary, Row, Table};
pub use value::{CellType, CellValue};
