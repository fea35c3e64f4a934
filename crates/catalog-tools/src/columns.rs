//! Column listing for a single table or view.

use crate::error::Result;
use crate::observer::ExtractionObserver;
use crate::tools::CatalogTools;
use edc_catalog_client::{class_types, CatalogObject, Transport};

/// Outcome of [`CatalogTools::extract_table_columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnExtraction {
    /// Column names of the table or view, sorted ascending
    Columns(Vec<String>),
    /// The object is not a table or view
    NotATable {
        object_id: String,
        /// First `core.classType` value found, if any
        class_type: Option<String>,
    },
}

impl ColumnExtraction {
    pub fn is_table(&self) -> bool {
        matches!(self, ColumnExtraction::Columns(_))
    }

    /// Column names; empty for [`ColumnExtraction::NotATable`].
    pub fn columns(&self) -> &[String] {
        match self {
            ColumnExtraction::Columns(columns) => columns,
            ColumnExtraction::NotATable { .. } => &[],
        }
    }

    pub fn into_columns(self) -> Vec<String> {
        match self {
            ColumnExtraction::Columns(columns) => columns,
            ColumnExtraction::NotATable { .. } => Vec::new(),
        }
    }
}

impl<T: Transport, O: ExtractionObserver> CatalogTools<T, O> {
    /// Fetch `object_id` and list the columns it links to.
    ///
    /// Only tables and views have columns; anything else yields
    /// [`ColumnExtraction::NotATable`] and a `not_a_table` diagnostic.
    pub async fn extract_table_columns(&self, object_id: &str) -> Result<ColumnExtraction> {
        let object = self.client.fetch_object(object_id).await?;
        let class_type = object.class_type();

        if !matches!(class_type, Some(class_types::TABLE | class_types::VIEW)) {
            self.observer.not_a_table(object_id, class_type);
            return Ok(ColumnExtraction::NotATable {
                object_id: object_id.to_string(),
                class_type: class_type.map(String::from),
            });
        }

        Ok(ColumnExtraction::Columns(column_names(&object)))
    }
}

/// Sorted names of the column links of a table or view. Unnamed links are
/// skipped.
fn column_names(object: &CatalogObject) -> Vec<String> {
    let mut columns: Vec<String> = object
        .dst_links
        .iter()
        .filter(|link| {
            matches!(
                link.class_type.as_str(),
                class_types::COLUMN | class_types::VIEW_COLUMN
            ) && !link.name.is_empty()
        })
        .map(|link| link.name.clone())
        .collect();
    columns.sort();
    columns
}
