//! Flat attribute tables produced by lineage and impact traversals.
//!
//! Each row describes one object reached by the traversal. Attributes are
//! flattened into columns named `level_<n>_<attributeId>`, where level 1 is
//! the containing object (e.g. a table) and level 2 the object itself (e.g.
//! a column). The `ID` column holds the slash-delimited object path; its
//! second-to-last segment is the parent table.

use crate::error::{Result, ToolsError};
use serde_json::{Map, Value};

/// Name of the object path column.
pub const ID_COLUMN: &str = "ID";

/// Column name of `attribute` at hierarchy `level`.
///
/// ```
/// assert_eq!(
///     edc_catalog_tools::level_column(1, "core.classType"),
///     "level_1_core.classType"
/// );
/// ```
pub fn level_column(level: u32, attribute: &str) -> String {
    format!("level_{}_{}", level, attribute)
}

/// A rectangular table of JSON cells with named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl AttributeTable {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; it must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ToolsError::InvalidTable(format!(
                "row {} has {} cells, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Build a table from records. Columns are the union of all record
    /// keys; keys missing from a record become nulls.
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| record.remove(column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<Map<String, Value>> = serde_json::from_str(json)
            .map_err(|e| ToolsError::InvalidTable(format!("expected an array of records: {}", e)))?;
        Ok(Self::from_records(records))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of `column`, or [`ToolsError::MissingColumn`].
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| ToolsError::MissingColumn(column.to_string()))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
