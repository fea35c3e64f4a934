//! In-process fakes shared by the unit tests.

use crate::observer::ExtractionObserver;
use async_trait::async_trait;
use edc_catalog_client::{class_types, ClientError, Result, Transport};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Transport that answers from canned responses and records every call.
///
/// Search responses are keyed by offset; offsets without a canned page get
/// `fallback_page` (empty by default). Object responses are keyed by ID.
#[derive(Default)]
pub struct ScriptedTransport {
    pub search_pages: HashMap<usize, Value>,
    pub fallback_page: Option<Value>,
    pub objects: HashMap<String, Value>,
    pub search_offsets: Mutex<Vec<usize>>,
}

impl ScriptedTransport {
    pub fn with_page(mut self, offset: usize, hits: Vec<Value>) -> Self {
        self.search_pages.insert(offset, json!({ "hits": hits }));
        self
    }

    pub fn with_fallback_page(mut self, hits: Vec<Value>) -> Self {
        self.fallback_page = Some(json!({ "hits": hits }));
        self
    }

    pub fn with_object(mut self, id: &str, body: Value) -> Self {
        self.objects.insert(id.to_string(), body);
        self
    }

    pub fn search_calls(&self) -> Vec<usize> {
        self.search_offsets.lock().unwrap().clone()
    }
}

fn query_offset(url: &str) -> Option<usize> {
    url.split(['?', '&'])
        .find_map(|pair| pair.strip_prefix("offset="))
        .and_then(|v| v.parse().ok())
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn base_url(&self) -> &str {
        "https://edc.test"
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        if url.contains("/search?") {
            let offset = query_offset(url).unwrap_or(0);
            self.search_offsets.lock().unwrap().push(offset);
            return Ok(self
                .search_pages
                .get(&offset)
                .or(self.fallback_page.as_ref())
                .cloned()
                .unwrap_or_else(|| json!({ "hits": [] })));
        }

        self.objects
            .iter()
            .find(|(id, _)| url.contains(&format!("/objects/{}?", self.encode_id(id, true))))
            .map(|(_, body)| body.clone())
            .ok_or_else(|| ClientError::NotFound(url.to_string()))
    }

    async fn put_json(&self, url: &str, _body: &Value) -> Result<()> {
        Err(ClientError::Validation(format!("unexpected PUT to {}", url)))
    }
}

/// Search hit with the given name and class type.
pub fn hit(id: &str, name: &str, class_type: &str) -> Value {
    json!({
        "id": id,
        "values": [
            {"attributeId": "core.name", "value": name},
            {"attributeId": "core.classType", "value": class_type}
        ]
    })
}

/// A page of `count` hits that never match a table named `ORDERS`.
pub fn decoy_page(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| {
            hit(
                &format!("resource://DW/SALES/ORDERS_{}", i),
                &format!("ORDERS_{}", i),
                class_types::TABLE,
            )
        })
        .collect()
}

/// Observer that records what it was told.
#[derive(Default)]
pub struct RecordingObserver {
    pub matches: Mutex<Vec<String>>,
    pub exhausted: Mutex<Vec<usize>>,
    pub not_tables: Mutex<Vec<(String, Option<String>)>>,
}

impl ExtractionObserver for RecordingObserver {
    fn match_found(&self, _object_name: &str, _object_type: &str, object_id: &str) {
        self.matches.lock().unwrap().push(object_id.to_string());
    }

    fn search_exhausted(&self, _object_name: &str, _object_type: &str, hits_inspected: usize) {
        self.exhausted.lock().unwrap().push(hits_inspected);
    }

    fn not_a_table(&self, object_id: &str, class_type: Option<&str>) {
        self.not_tables
            .lock()
            .unwrap()
            .push((object_id.to_string(), class_type.map(String::from)));
    }
}
