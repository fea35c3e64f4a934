//! Table and column dependency lists from an attribute table.

use crate::error::{Result, ToolsError};
use crate::table::{level_column, AttributeTable, ID_COLUMN};
use edc_catalog_client::{attributes, class_types};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A table reached by a lineage or impact traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDependency {
    /// Table name
    pub table: String,
    /// Object path of the table
    pub path: String,
}

/// A column reached by a lineage or impact traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDependency {
    /// Name of the owning table
    pub table: String,
    /// Column name
    pub column: String,
    /// Object path of the column
    pub path: String,
}

/// Tables referenced by `attributes`, one entry per table path.
///
/// Only rows whose level-1 class type is a relational Table are used; views
/// and temporary objects are not tables here. The row path is cut back to
/// its parent. When several rows share a path the last one wins, placed at
/// the position of that last row.
pub fn extract_tables(table: &AttributeTable) -> Result<Vec<TableDependency>> {
    let class_type = table.column_index(&level_column(1, attributes::CLASS_TYPE))?;
    let name_column = level_column(1, attributes::NAME);
    let name = table.column_index(&name_column)?;
    let id = table.column_index(ID_COLUMN)?;

    let mut tables = Vec::new();
    for (index, row) in table.rows().enumerate() {
        if row[class_type].as_str() != Some(class_types::TABLE) {
            continue;
        }
        let path = text(row, id, index, ID_COLUMN)?;
        tables.push(TableDependency {
            table: text(row, name, index, &name_column)?.to_string(),
            path: parent_path(path).to_string(),
        });
    }

    Ok(keep_last_per_path(tables))
}

/// Columns referenced by `attributes`.
///
/// Only rows whose level-2 class type is a relational Column are used. No
/// deduplication happens.
pub fn extract_columns(table: &AttributeTable) -> Result<Vec<ColumnDependency>> {
    let class_type = table.column_index(&level_column(2, attributes::CLASS_TYPE))?;
    let table_column = level_column(1, attributes::NAME);
    let column_column = level_column(2, attributes::NAME);
    let table_name = table.column_index(&table_column)?;
    let column_name = table.column_index(&column_column)?;
    let id = table.column_index(ID_COLUMN)?;

    table
        .rows()
        .enumerate()
        .filter(|(_, row)| row[class_type].as_str() == Some(class_types::COLUMN))
        .map(|(index, row)| {
            Ok(ColumnDependency {
                table: text(row, table_name, index, &table_column)?.to_string(),
                column: text(row, column_name, index, &column_column)?.to_string(),
                path: text(row, id, index, ID_COLUMN)?.to_string(),
            })
        })
        .collect()
}

fn text<'a>(row: &'a [Value], column: usize, index: usize, name: &str) -> Result<&'a str> {
    row[column].as_str().ok_or_else(|| ToolsError::InvalidCell {
        row: index,
        column: name.to_string(),
    })
}

/// Drop the last slash-delimited segment; paths without a slash are kept.
fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(parent, _)| parent)
}

fn keep_last_per_path(tables: Vec<TableDependency>) -> Vec<TableDependency> {
    let last: HashMap<String, usize> = tables
        .iter()
        .enumerate()
        .map(|(index, t)| (t.path.clone(), index))
        .collect();

    tables
        .into_iter()
        .enumerate()
        .filter(|(index, t)| last.get(&t.path) == Some(index))
        .map(|(_, t)| t)
        .collect()
}
