//! Normalized tabular output.
//!
//! A [`Frame`] is the labeled row/column structure every reshaping query
//! returns: rows are observations, columns are named fields or instruments,
//! and the row index is either positional or a composite key built from one
//! or more columns (for dataset queries, date and instrument code).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AdapterError;

/// Composite row index of a frame.
///
/// `keys` holds one entry per row; each entry has one value per index level
/// named in `names`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameIndex {
    /// Index level names, in order (e.g., `["date", "wind_code"]`).
    pub names: Vec<String>,

    /// Row keys, one per row, each with one value per level.
    pub keys: Vec<Vec<Value>>,
}

/// Labeled row/column table produced fresh by each reshaping query.
///
/// Cell values are dynamic ([`serde_json::Value`]): the terminal mixes
/// dates, instrument codes, and numerics in a single payload and the
/// adapter passes them through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    index: Option<FrameIndex>,
}

impl Frame {
    /// Create a frame from row-major data.
    ///
    /// Every row must have exactly one value per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, AdapterError> {
        if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(AdapterError::MalformedResponse(format!(
                "row width {} does not match {} columns",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self {
            columns,
            rows,
            index: None,
        })
    }

    /// Create a frame from a column-major payload, transposing into rows.
    ///
    /// This is the shape the terminal delivers: one series per column.
    /// All series must have the same length.
    pub fn from_columns(
        columns: Vec<String>,
        series: Vec<Vec<Value>>,
    ) -> Result<Self, AdapterError> {
        if series.len() != columns.len() {
            return Err(AdapterError::MalformedResponse(format!(
                "{} column series for {} column labels",
                series.len(),
                columns.len()
            )));
        }
        let height = series.first().map(|s| s.len()).unwrap_or(0);
        if series.iter().any(|s| s.len() != height) {
            return Err(AdapterError::MalformedResponse(
                "ragged column series".to_string(),
            ));
        }
        let rows = (0..height)
            .map(|r| series.iter().map(|s| s[r].clone()).collect())
            .collect();
        Ok(Self {
            columns,
            rows,
            index: None,
        })
    }

    /// Attach an externally supplied row index.
    ///
    /// Used for time-series results, where the row keys (timestamps) come
    /// from the response rather than from a column.
    pub fn with_index(
        mut self,
        names: Vec<String>,
        keys: Vec<Vec<Value>>,
    ) -> Result<Self, AdapterError> {
        if keys.len() != self.rows.len() {
            return Err(AdapterError::MalformedResponse(format!(
                "{} index keys for {} rows",
                keys.len(),
                self.rows.len()
            )));
        }
        self.index = Some(FrameIndex { names, keys });
        Ok(self)
    }

    /// Move the named columns into a composite row index.
    ///
    /// The indexed columns no longer appear as regular columns. Fails with
    /// [`AdapterError::UnknownColumn`] when a name is not present.
    pub fn set_index(mut self, names: &[&str]) -> Result<Self, AdapterError> {
        let mut positions = Vec::with_capacity(names.len());
        for name in names {
            let position = self
                .columns
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| AdapterError::UnknownColumn(name.to_string()))?;
            positions.push(position);
        }

        let keys = self
            .rows
            .iter()
            .map(|row| positions.iter().map(|&p| row[p].clone()).collect())
            .collect();

        // Drop indexed columns from the body, highest position first so the
        // remaining positions stay valid.
        let mut drop = positions.clone();
        drop.sort_unstable();
        drop.dedup();
        for &position in drop.iter().rev() {
            self.columns.remove(position);
            for row in &mut self.rows {
                row.remove(position);
            }
        }

        self.index = Some(FrameIndex {
            names: names.iter().map(|n| n.to_string()).collect(),
            keys,
        });
        Ok(self)
    }

    /// Column labels, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row-major cell data.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// The composite row index, if one is set.
    pub fn index(&self) -> Option<&FrameIndex> {
        self.index.as_ref()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of regular columns (index levels excluded).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the frame holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` in the column named `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let position = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(position))
    }

    /// All values of the column named `name`, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let position = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[position]).collect())
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Leading cells are either the index key values or a positional
        // row number.
        let (lead_header, lead_cells): (Vec<String>, Vec<Vec<String>>) = match &self.index {
            Some(index) => (
                index.names.clone(),
                index
                    .keys
                    .iter()
                    .map(|key| key.iter().map(cell_text).collect())
                    .collect(),
            ),
            None => (
                vec![String::new()],
                (0..self.rows.len()).map(|r| vec![r.to_string()]).collect(),
            ),
        };

        let mut header = lead_header;
        header.extend(self.columns.iter().cloned());

        let mut table: Vec<Vec<String>> = vec![header];
        for (r, row) in self.rows.iter().enumerate() {
            let mut cells = lead_cells[r].clone();
            cells.extend(row.iter().map(cell_text));
            table.push(cells);
        }

        let width = table[0].len();
        let widths: Vec<usize> = (0..width)
            .map(|c| table.iter().map(|row| row[c].len()).max().unwrap_or(0))
            .collect();

        for (r, row) in table.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .enumerate()
                .map(|(c, cell)| format!("{:>width$}", cell, width = widths[c]))
                .collect::<Vec<_>>()
                .join("  ");
            write!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Frame {
        Frame::from_columns(
            vec![
                "date".to_string(),
                "wind_code".to_string(),
                "i_weight".to_string(),
            ],
            vec![
                vec![json!("2020-01-02"), json!("2020-01-02")],
                vec![json!("000001.SZ"), json!("600000.SH")],
                vec![json!(3.5), json!(1.2)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_columns_transposes() {
        let frame = sample();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.get(0, "wind_code"), Some(&json!("000001.SZ")));
        assert_eq!(frame.get(1, "i_weight"), Some(&json!(1.2)));
    }

    #[test]
    fn test_from_columns_rejects_ragged_series() {
        let result = Frame::from_columns(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![json!(1)], vec![json!(1), json!(2)]],
        );
        assert!(matches!(result, Err(AdapterError::MalformedResponse(_))));
    }

    #[test]
    fn test_from_columns_rejects_label_mismatch() {
        let result = Frame::from_columns(vec!["a".to_string()], vec![]);
        assert!(matches!(result, Err(AdapterError::MalformedResponse(_))));
    }

    #[test]
    fn test_new_rejects_short_row() {
        let result = Frame::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![json!(1)]],
        );
        assert!(matches!(result, Err(AdapterError::MalformedResponse(_))));
    }

    #[test]
    fn test_set_index_moves_columns_out_of_body() {
        let frame = sample().set_index(&["date", "wind_code"]).unwrap();
        assert_eq!(frame.columns(), &["i_weight".to_string()]);
        let index = frame.index().unwrap();
        assert_eq!(index.names, vec!["date", "wind_code"]);
        assert_eq!(index.keys[0], vec![json!("2020-01-02"), json!("000001.SZ")]);
        assert_eq!(index.keys[1], vec![json!("2020-01-02"), json!("600000.SH")]);
    }

    #[test]
    fn test_set_index_unknown_column() {
        let result = sample().set_index(&["sector"]);
        assert!(matches!(result, Err(AdapterError::UnknownColumn(name)) if name == "sector"));
    }

    #[test]
    fn test_positional_index_by_default() {
        let frame = sample();
        assert!(frame.index().is_none());
        assert_eq!(frame.columns().len(), 3);
    }

    #[test]
    fn test_with_index_length_check() {
        let result = sample().with_index(vec!["time".to_string()], vec![vec![json!("t0")]]);
        assert!(matches!(result, Err(AdapterError::MalformedResponse(_))));
    }

    #[test]
    fn test_column_access() {
        let frame = sample();
        let weights = frame.column("i_weight").unwrap();
        assert_eq!(weights, vec![&json!(3.5), &json!(1.2)]);
        assert!(frame.column("sector").is_none());
    }

    #[test]
    fn test_display_renders_index_and_columns() {
        let frame = sample().set_index(&["date", "wind_code"]).unwrap();
        let text = format!("{}", frame);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("i_weight"));
        assert!(lines[1].contains("2020-01-02"));
        assert!(lines[1].contains("000001.SZ"));
        assert!(lines[1].contains("3.5"));
    }
}
