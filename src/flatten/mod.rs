//! GeoJSON flattening - one table row per feature
//!
//! Every feature in a collection gets a sequential identifier, written both
//! on the feature and into its `properties`, and the properties become the
//! rows of a [`Table`](crate::table::Table). The identifier is the join key
//! between the table and the geometries left behind in the document.

pub mod types;
pub mod flattener;
pub mod writer;

pub use types::{FlattenConfig, Flattened};
pub use flattener::{flatten, Flattener};
pub use writer::RowWriter;
