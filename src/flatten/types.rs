use crate::table::Table;
use serde_json::Value;

/// Configuration for flattening a feature collection
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Key the sequential identifier is written under, both on the feature
    /// and inside its properties. This is also the id column's name.
    /// Must not be `type`, `geometry` or `properties` while `tag_feature` is
    /// set.
    pub id_field: String,

    /// Identifier given to the first feature. Every assigned id has to fit
    /// in an `i64`.
    pub start_id: u64,

    /// Whether the feature object itself receives the identifier. The
    /// properties always do.
    pub tag_feature: bool,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            id_field: String::from("id"),
            start_id: 0,
            tag_feature: true,
        }
    }
}

/// Result of flattening without touching the caller's document: the
/// id-tagged copy of the document together with its table
#[derive(Debug, Clone)]
pub struct Flattened {
    pub document: Value,
    pub table: Table,
}

impl Flattened {
    pub fn into_parts(self) -> (Value, Table) {
        (self.document, self.table)
    }
}
