//! Error types for object resolution and dependency extraction.

use edc_catalog_client::ClientError;
use thiserror::Error;

/// Errors that can occur in the extraction layer.
#[derive(Debug, Error)]
pub enum ToolsError {
    /// The underlying catalog request failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A column the extraction needs is not part of the attribute table
    #[error("Attribute table has no column '{0}'")]
    MissingColumn(String),

    /// A selected row holds a null or non-string value where text is required
    #[error("Row {row}: column '{column}' must hold a string")]
    InvalidCell {
        /// Zero-based row index
        row: usize,
        /// Column name
        column: String,
    },

    /// The attribute table itself is malformed
    #[error("Invalid attribute table: {0}")]
    InvalidTable(String),
}

/// A specialized Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ToolsError>;
