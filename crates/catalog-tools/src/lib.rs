//! Object resolution and lineage extraction for the Enterprise Data Catalog.
//!
//! Built on [`edc_catalog_client`], this crate adds:
//!
//! - **Name resolution**: [`CatalogTools::search_object`] pages through
//!   fuzzy search hits until one matches a name (ignoring case) and a class
//!   type (exactly)
//! - **Column listing**: [`CatalogTools::extract_table_columns`] returns the
//!   sorted columns of a table or view
//! - **Dependency extraction**: [`extract_tables`] and [`extract_columns`]
//!   reshape a flat lineage/impact [`AttributeTable`] into dependency lists
//!
//! # Example
//!
//! ```rust,ignore
//! use edc_catalog_client::{class_types, ClientConfig};
//! use edc_catalog_tools::CatalogTools;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tools = CatalogTools::connect(
//!         ClientConfig::builder("https://edc.example.com:9085")
//!             .credentials("svc_lineage", "secret")
//!             .verbose(true)
//!             .build()?,
//!     )?;
//!
//!     if let Some(id) = tools.search_object("ORDERS", class_types::TABLE).await? {
//!         let columns = tools.extract_table_columns(&id).await?.into_columns();
//!         println!("{}: {:?}", id, columns);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Diagnostics
//!
//! Matches, exhausted searches and non-table lookups are reported through an
//! [`ExtractionObserver`]. The default [`TracingObserver`] logs them with
//! `tracing`; install a subscriber to see them.

mod columns;
mod dependencies;
mod error;
mod observer;
mod search;
mod table;
mod tools;

#[cfg(test)]
mod test_utils;

pub use columns::ColumnExtraction;
pub use dependencies::{extract_columns, extract_tables, ColumnDependency, TableDependency};
pub use error::{Result, ToolsError};
pub use observer::{ExtractionObserver, TracingObserver};
pub use search::DEFAULT_MAX_HITS;
pub use table::{level_column, AttributeTable, ID_COLUMN};
pub use tools::CatalogTools;
