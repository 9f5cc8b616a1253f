//! # geoflat - GeoJSON properties as flat tables
//!
//! Turns a GeoJSON feature collection into a table with one row per feature,
//! built from each feature's `properties`. Every feature is tagged with a
//! sequential `id`, on the feature and inside its properties, so the table
//! can be joined back to the geometries it came from (a choropleth renderer
//! matching rows to shapes, for instance).
//!
//! ## Modules
//!
//! - **flatten**: the flattener, its configuration, and a JSON Lines row writer
//! - **table**: rows, cells and the column-union table they form
//! - **error**: the error taxonomy for malformed collections
//!
//! ## Quick Start
//!
//! ```rust
//! use geoflat::flatten;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut collection = json!({
//!     "type": "FeatureCollection",
//!     "features": [
//!         {"type": "Feature", "geometry": null, "properties": {"name": "A"}},
//!         {"type": "Feature", "geometry": null, "properties": {"name": "B", "pop": 100}}
//!     ]
//! });
//!
//! let table = flatten(&mut collection)?;
//!
//! assert_eq!(table.len(), 2);
//! assert!(table.get(0, "pop").is_null());
//! assert_eq!(table.get(1, "pop"), 100i64);
//! // The collection was tagged in place
//! assert_eq!(collection["features"][1]["id"], 1);
//! # Ok(())
//! # }
//! ```
//!
//! To leave the input alone, use [`Flattener::flatten_copy`], which returns
//! the tagged copy alongside the table.

use anyhow::{Context, Result};
use std::io::Read;

pub mod error;
pub mod flatten;
pub mod table;

// Re-export commonly used types for convenience
pub use error::FlattenError;
pub use flatten::{flatten, FlattenConfig, Flattened, Flattener, RowWriter};
pub use table::{CellType, CellValue, ColumnSummary, Row, Table, TableBuilder};

/// Parse one GeoJSON document from `reader` and flatten it
pub fn flatten_reader<R: Read>(reader: R, config: FlattenConfig) -> Result<Flattened> {
    let document: serde_json::Value = serde_json::from_reader(reader)
        .context("Failed to parse GeoJSON document")?;

    Flattener::new(config)
        .flatten(document)
        .context("Failed to flatten feature collection")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_reader() {
        let input = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "A", "pop": 5}, "geometry": null},
                {"type": "Feature", "properties": {"name": "B"}, "geometry": null}
            ]
        }"#;

        let flattened = flatten_reader(input.as_bytes(), FlattenConfig::default()).unwrap();

        assert_eq!(flattened.table.len(), 2);
        assert_eq!(flattened.table.columns(), ["name", "pop", "id"]);
        assert_eq!(flattened.document["features"][1]["properties"]["id"], 1);
    }

    #[test]
    fn test_flatten_reader_reports_context() {
        let err = flatten_reader("{\"type\": \"FeatureCollection\"}".as_bytes(), FlattenConfig::default())
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to flatten feature collection");
        let root = err.downcast_ref::<FlattenError>().unwrap();
        assert_eq!(root, &FlattenError::MissingKey { key: "features", feature: None });
    }

    #[test]
    fn test_flatten_reader_rejects_invalid_json() {
        let err = flatten_reader("{not json".as_bytes(), FlattenConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
