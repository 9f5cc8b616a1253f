use crate::table::Table;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes table rows as JSON Lines, one object per row
pub struct RowWriter<W: Write> {
    writer: W,
    fill_missing: bool,
}

impl<W: Write> RowWriter<W> {
    pub fn new(writer: W) -> Self {
        RowWriter {
            writer,
            fill_missing: false,
        }
    }

    /// Emit every table column on every row, null where the row lacks it
    pub fn fill_missing(mut self, fill: bool) -> Self {
        self.fill_missing = fill;
        self
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for (idx, row) in table.rows().iter().enumerate() {
            let json = if self.fill_missing {
                let dense = table
                    .dense_row(idx)
                    .context("Row index out of range")?;
                serde_json::to_string(&dense)
            } else {
                serde_json::to_string(row)
            }
            .with_context(|| format!("Failed to serialize row {}", idx))?;

            writeln!(self.writer, "{}", json)
                .context("Failed to write row")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use serde_json::json;

    fn table() -> Table {
        let mut doc = json!({
            "features": [
                {"properties": {"name": "A"}},
                {"properties": {"name": "B", "pop": 100}}
            ]
        });
        flatten(&mut doc).unwrap()
    }

    #[test]
    fn test_sparse_rows() {
        let mut writer = RowWriter::new(Vec::new());
        writer.write_table(&table()).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec![
            r#"{"name":"A","id":0}"#,
            r#"{"name":"B","pop":100,"id":1}"#,
        ]);
    }

    #[test]
    fn test_filled_rows() {
        let mut writer = RowWriter::new(Vec::new()).fill_missing(true);
        writer.write_table(&table()).unwrap();
        writer.flush().unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec![
            r#"{"name":"A","id":0,"pop":null}"#,
            r#"{"name":"B","id":1,"pop":100}"#,
        ]);
    }
}
