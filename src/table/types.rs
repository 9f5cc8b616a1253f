use crate::table::value::{CellType, CellValue};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

static NULL_CELL: CellValue = CellValue::Null;

/// One row of a table: column name to cell, in the order the keys appeared
/// in the feature's properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Row {
            cells: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a cell, replacing and returning any previous value for `column`.
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Option<CellValue> {
        self.cells.insert(column.into(), value.into())
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl From<&Map<String, Value>> for Row {
    fn from(properties: &Map<String, Value>) -> Self {
        let mut row = Row::with_capacity(properties.len());
        for (key, value) in properties.iter() {
            row.insert(key.clone(), CellValue::from(value));
        }
        row
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Row {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Observed types of one column across every row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Non-null cell types seen in this column
    pub types: BTreeSet<CellType>,

    /// Rows where the column is absent or explicitly null
    pub null_count: usize,
}

impl ColumnSummary {
    /// True when more than one non-null type appears in the column
    pub fn is_mixed(&self) -> bool {
        self.types.len() > 1
    }
}

/// A flattened table: ordered rows plus the union of their column names.
///
/// Rows are stored sparsely. A column that a row lacks reads as
/// `CellValue::Null` through [`Table::get`] and [`Table::column`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Assemble a table from parts. Callers outside the builder must make
    /// sure `columns` covers every key of every row.
    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Table { columns, rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in first-seen order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Cell at `(index, column)`. Missing columns and out-of-range rows both
    /// read as null.
    pub fn get(&self, index: usize, column: &str) -> &CellValue {
        self.rows
            .get(index)
            .and_then(|row| row.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// Every value of `column`, one per row, null-filled
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&NULL_CELL))
    }

    /// Per-column type summary, in column order
    pub fn column_types(&self) -> IndexMap<String, ColumnSummary> {
        let mut summaries: IndexMap<String, ColumnSummary> = self
            .columns
            .iter()
            .map(|c| (c.clone(), ColumnSummary::default()))
            .collect();

        for row in &self.rows {
            for (name, summary) in summaries.iter_mut() {
                match row.get(name) {
                    None | Some(CellValue::Null) => summary.null_count += 1,
                    Some(cell) => {
                        summary.types.insert(cell.cell_type());
                    }
                }
            }
        }

        summaries
    }

    /// Row `index` with every column present, absent ones filled with null
    pub fn dense_row(&self, index: usize) -> Option<Row> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .map(|c| (c.clone(), row.get(c).cloned().unwrap_or_default()))
                .collect(),
        )
    }
}
