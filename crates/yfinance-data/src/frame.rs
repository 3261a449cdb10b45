//! Tabular provider results
//!
//! A [`Frame`] is an indexed table: an optional named index, an ordered list
//! of column names, and one row of cells per index entry. Tools reshape frames
//! into plain mappings and sequences with [`Frame::to_records`],
//! [`Frame::reset_index`] and [`Frame::to_dict`].

use crate::value::{DataValue, Record};

/// Column name given to an unnamed index by [`Frame::reset_index`]
pub const DEFAULT_INDEX_NAME: &str = "index";

/// An indexed table of values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    index_name: Option<String>,
    index: Vec<DataValue>,
    columns: Vec<String>,
    rows: Vec<Vec<DataValue>>,
}

impl Frame {
    /// Create an empty frame with the given columns
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index_name: None,
            index: Vec::new(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Name the index
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Append a row
    ///
    /// Rows shorter than the column list are padded with nulls; extra cells
    /// are dropped.
    pub fn push_row(&mut self, index: impl Into<DataValue>, mut cells: Vec<DataValue>) {
        cells.resize(self.columns.len(), DataValue::Null);
        self.index.push(index.into());
        self.rows.push(cells);
    }

    /// Builder-style [`Frame::push_row`]
    pub fn with_row(mut self, index: impl Into<DataValue>, cells: Vec<DataValue>) -> Self {
        self.push_row(index, cells);
        self
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn index(&self) -> &[DataValue] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<DataValue>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a single cell by row position and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&DataValue> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    /// Move the index into the first column and replace it with row positions
    pub fn reset_index(&self) -> Frame {
        let name = self
            .index_name
            .clone()
            .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());

        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(name);
        columns.extend(self.columns.iter().cloned());

        let rows = self
            .index
            .iter()
            .zip(&self.rows)
            .map(|(idx, cells)| {
                let mut row = Vec::with_capacity(cells.len() + 1);
                row.push(idx.clone());
                row.extend(cells.iter().cloned());
                row
            })
            .collect();

        Frame {
            index_name: None,
            index: (0..self.len() as i64).map(DataValue::Int).collect(),
            columns,
            rows,
        }
    }

    /// One mapping per row, keyed by column name, in row order
    ///
    /// The index is not included; call [`Frame::reset_index`] first to keep it.
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|cells| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(cells.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Mapping of column name to a mapping of index key to cell value
    pub fn to_dict(&self) -> Record {
        self.columns
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let column: Record = self
                    .index
                    .iter()
                    .zip(&self.rows)
                    .map(|(idx, cells)| (idx.to_key(), cells[col].clone()))
                    .collect();
                (name.clone(), DataValue::Map(column))
            })
            .collect()
    }
}

/// Convert records into a `DataValue::List` of mappings
pub fn records_value(records: Vec<Record>) -> DataValue {
    DataValue::List(records.into_iter().map(DataValue::Map).collect())
}
