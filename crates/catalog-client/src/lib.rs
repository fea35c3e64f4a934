//! Enterprise Data Catalog client
//!
//! A Rust HTTP client for the catalog access API (`/access/2/catalog/data`).
//! It fetches object detail records, pages through search results and
//! writes objects back.
//!
//! # Features
//!
//! - **Authenticated session**: HTTP Basic login with optional security domain
//! - **Automatic Retries**: Exponential backoff with jitter for transient failures
//! - **Typed responses**: object and search bodies decode into [`CatalogObject`]
//!   and [`SearchResponse`], keeping unknown fields intact
//! - **Pluggable transport**: everything above the wire goes through the
//!   [`Transport`] trait
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use edc_catalog_client::{CatalogClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(
//!         ClientConfig::builder("https://edc.example.com:9085")
//!             .security_domain("CORP")
//!             .credentials("svc_lineage", "secret")
//!             .build()?,
//!     )?;
//!
//!     let page = client.search("ORDERS", 0).await?;
//!     for hit in &page.hits {
//!         println!("{}", hit.id);
//!     }
//!
//!     let object = client.fetch_object("resource://DW/SALES/ORDERS").await?;
//!     println!("{:?}", object.class_type());
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`. Transport failures are
//! passed through; status codes map to `NotFound`, `Unauthorized`,
//! `Forbidden`, `Conflict`, `RateLimited` and `ServerError`. Payloads the
//! service would reject are caught locally as `Validation`.

pub mod client;
pub mod config;
pub mod connection;
pub mod encoding;
pub mod error;
pub mod types;

pub use client::{CatalogClient, SEARCH_PAGE_SIZE};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use connection::{CatalogConnection, Transport};
pub use encoding::encode_id;
pub use error::{ClientError, Result};
pub use types::{
    attributes, class_types, AttributeValue, CatalogObject, Fact, Link, SearchHit,
    SearchMetadata, SearchResponse,
};
