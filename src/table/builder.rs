//! Streaming table construction
//!
//! Rows arrive one at a time and may introduce columns no earlier row had.
//! The builder keeps the column union as it goes, so the final table is
//! produced without a second pass over the rows.

use crate::table::types::{Row, Table};
use indexmap::IndexSet;

/// Accumulates rows and the union of their column names
#[derive(Debug, Default)]
pub struct TableBuilder {
    /// Column names in the order they were first seen
    columns: IndexSet<String>,
    rows: Vec<Row>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize) -> Self {
        TableBuilder {
            columns: IndexSet::new(),
            rows: Vec::with_capacity(rows),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        for key in row.keys() {
            if !self.columns.contains(key) {
                self.columns.insert(key.to_string());
            }
        }
        self.rows.push(row);
    }

    pub fn finish(self) -> Table {
        Table::from_parts(self.columns.into_iter().collect(), self.rows)
    }
}

impl Extend<Row> for TableBuilder {
    fn extend<I: IntoIterator<Item = Row>>(&mut self, iter: I) {
        for row in iter {
            self.push_row(row);
        }
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        let mut builder = TableBuilder::new();
        builder.extend(iter);
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    #[test]
    fn test_empty_builder() {
        let table = TableBuilder::new().finish();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_columns_union_in_first_seen_order() {
        let mut first = Row::new();
        first.insert("b", CellValue::Integer(1));
        first.insert("a", CellValue::Integer(2));

        let mut second = Row::new();
        second.insert("c", "x");
        second.insert("a", CellValue::Null);

        let table: Table = vec![first, second].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["b", "a", "c"]);
    }
}
