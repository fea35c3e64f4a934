//! Catalog access operations: fetch, search and update objects.

use crate::config::ClientConfig;
use crate::connection::{CatalogConnection, Transport};
use crate::error::{ClientError, Result};
use crate::types::{CatalogObject, SearchResponse};
use serde::Serialize;
use serde_json::Value;

/// Number of hits requested per search page.
pub const SEARCH_PAGE_SIZE: usize = 5;

const DATA_PATH: &str = "/access/2/catalog/data";

/// Client for the catalog data endpoints.
///
/// Generic over the [`Transport`] so sessions can be swapped out; the
/// default is an authenticated [`CatalogConnection`].
pub struct CatalogClient<T = CatalogConnection> {
    transport: T,
}

impl CatalogClient<CatalogConnection> {
    /// Open a connection with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(CatalogConnection::new(config)?))
    }
}

impl<T: Transport> CatalogClient<T> {
    /// Wrap an existing transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Base URL of the catalog service.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    fn object_url(&self, object_id: &str) -> String {
        format!(
            "{}{}/objects/{}",
            self.transport.base_url(),
            DATA_PATH,
            self.transport.encode_id(object_id, true)
        )
    }

    /// Fetch the raw detail document of an object, including referenced
    /// objects.
    pub async fn fetch_object_json(&self, object_id: &str) -> Result<Value> {
        let url = format!("{}?includeRefObjects=true", self.object_url(object_id));
        self.transport.get_json(&url).await
    }

    /// Fetch the detail record of an object.
    pub async fn fetch_object(&self, object_id: &str) -> Result<CatalogObject> {
        let body = self.fetch_object_json(object_id).await?;
        serde_json::from_value(body).map_err(|e| {
            ClientError::InvalidResponse(format!("Unexpected object body for {}: {}", object_id, e))
        })
    }

    /// Fetch one page of search results starting at `offset`.
    pub async fn search(&self, query: &str, offset: usize) -> Result<SearchResponse> {
        let url = format!(
            "{}{}/search?q={}&facet=false&defaultFacets=true&highlight=false&offset={}&pageSize={}\
             &enableLegacySearch=false&disableSemanticSearch=false&includeRefObjects=false",
            self.transport.base_url(),
            DATA_PATH,
            urlencoding::encode(query),
            offset,
            SEARCH_PAGE_SIZE
        );
        let body = self.transport.get_json(&url).await?;
        serde_json::from_value(body).map_err(|e| {
            ClientError::InvalidResponse(format!("Unexpected search body for {:?}: {}", query, e))
        })
    }

    /// Replace an object with `data`.
    ///
    /// `data` must serialize to a JSON object; anything else is rejected
    /// with [`ClientError::Validation`] before a request is made.
    pub async fn update_object<D: Serialize + ?Sized>(
        &self,
        object_id: &str,
        data: &D,
    ) -> Result<()> {
        let body = serde_json::to_value(data)?;
        if !body.is_object() {
            tracing::warn!(
                object_id = %object_id,
                "Refusing to update object: payload is not a JSON object"
            );
            return Err(ClientError::Validation(format!(
                "update payload for {} must be a JSON object, got {}",
                object_id,
                json_kind(&body)
            )));
        }

        let url = self.object_url(object_id);
        self.transport.put_json(&url, &body).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
