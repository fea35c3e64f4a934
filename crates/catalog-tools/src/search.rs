//! Resolve a human-readable object name to its catalog ID.
//!
//! Catalog search is full-text and fuzzy: a query for `ORDERS` also returns
//! `ORDERS_ARCHIVE`, columns named `ORDERS`, objects whose description
//! mentions orders, and so on. Resolution pages through those hits and
//! picks the first one whose `core.name` equals the query ignoring case and
//! whose `core.classType` equals the requested type exactly.

use crate::error::Result;
use crate::observer::ExtractionObserver;
use crate::tools::CatalogTools;
use edc_catalog_client::{attributes, SearchHit, Transport};

/// Number of hits inspected before a search gives up.
pub const DEFAULT_MAX_HITS: usize = 250;

impl<T: Transport, O: ExtractionObserver> CatalogTools<T, O> {
    /// Find the ID of the object named `object_name` with class type
    /// `object_type`, inspecting at most [`DEFAULT_MAX_HITS`] hits.
    ///
    /// Returns `Ok(None)` when no hit matches.
    pub async fn search_object(
        &self,
        object_name: &str,
        object_type: &str,
    ) -> Result<Option<String>> {
        self.search_object_with_limit(object_name, object_type, DEFAULT_MAX_HITS)
            .await
    }

    /// Like [`search_object`](Self::search_object) with an explicit ceiling.
    ///
    /// The offset advances by one per inspected hit. No further page is
    /// requested once the offset exceeds `max_hits`.
    pub async fn search_object_with_limit(
        &self,
        object_name: &str,
        object_type: &str,
        max_hits: usize,
    ) -> Result<Option<String>> {
        let wanted_name = object_name.to_lowercase();
        let mut offset = 0;

        while offset <= max_hits {
            let page = self.client.search(object_name, offset).await?;
            if page.hits.is_empty() {
                break;
            }

            for hit in &page.hits {
                offset += 1;
                if hit_matches(hit, &wanted_name, object_type) {
                    self.observer.match_found(object_name, object_type, &hit.id);
                    return Ok(Some(hit.id.clone()));
                }
            }
        }

        self.observer.search_exhausted(object_name, object_type, offset);
        Ok(None)
    }
}

/// `wanted_name` must already be lowercased.
fn hit_matches(hit: &SearchHit, wanted_name: &str, object_type: &str) -> bool {
    let mut name_matches = false;
    let mut type_matches = false;

    for value in &hit.values {
        let Some(text) = value.value.as_str() else {
            continue;
        };
        if value.attribute_id == attributes::NAME {
            name_matches |= text.to_lowercase() == wanted_name;
        } else if value.attribute_id == attributes::CLASS_TYPE {
            type_matches |= text == object_type;
        }
    }

    name_matches && type_matches
}
