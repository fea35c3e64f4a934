//! Response types for the catalog access API.
//!
//! These types mirror the JSON bodies of the object and search endpoints.
//! Fields the client does not interpret are kept in `extra` maps so a
//! fetched object can be inspected or written back without losing data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Well-known attribute identifiers.
pub mod attributes {
    /// Object name attribute.
    pub const NAME: &str = "core.name";
    /// Type discriminator attribute.
    pub const CLASS_TYPE: &str = "core.classType";
}

/// Well-known `classType` values of the relational model.
pub mod class_types {
    /// Relational table.
    pub const TABLE: &str = "com.infa.ldm.relational.Table";
    /// Relational view.
    pub const VIEW: &str = "com.infa.ldm.relational.View";
    /// Column of a table.
    pub const COLUMN: &str = "com.infa.ldm.relational.Column";
    /// Column of a view.
    pub const VIEW_COLUMN: &str = "com.infa.ldm.relational.ViewColumn";
}

/// A single attribute value attached to an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    /// Attribute identifier (e.g. `core.classType`)
    pub attribute_id: String,
    /// Attribute value, normally a string
    #[serde(default)]
    pub value: Value,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Fact {
    /// The value as a string, if it is one.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// A directional link from one object to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// ID of the linked object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `classType` of the linked object; empty when absent or not a string
    #[serde(default, deserialize_with = "string_or_empty")]
    pub class_type: String,
    /// Name of the linked object; empty when absent or not a string
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    /// Association type (e.g. `com.infa.ldm.relational.TableColumn`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Links come back with `null` names on some resource types.
fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Object detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogObject {
    /// Object ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Canonical href of the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Attribute facts; `None` when the response carries no `facts` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<Vec<Fact>>,
    /// Outgoing links
    #[serde(default)]
    pub dst_links: Vec<Link>,
    /// Incoming links
    #[serde(default)]
    pub src_links: Vec<Link>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogObject {
    /// First fact with the given attribute ID.
    pub fn fact(&self, attribute_id: &str) -> Option<&Fact> {
        self.facts
            .as_ref()?
            .iter()
            .find(|fact| fact.attribute_id == attribute_id)
    }

    /// Value of the first `core.classType` fact.
    pub fn class_type(&self) -> Option<&str> {
        self.fact(attributes::CLASS_TYPE)?.value_str()
    }

    /// Value of the first `core.name` fact.
    pub fn name(&self) -> Option<&str> {
        self.fact(attributes::NAME)?.value_str()
    }
}

/// An (attributeId, value) pair on a search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    pub attribute_id: String,
    #[serde(default)]
    pub value: Value,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Object ID of the hit
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Attribute values returned for the hit
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl SearchHit {
    /// String value of the given attribute, if present on the hit.
    pub fn value(&self, attribute_id: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.attribute_id == attribute_id)
            .and_then(|v| v.value.as_str())
    }
}

/// Search metadata block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
    /// Total number of matches reported by the service
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub metadata: Option<SearchMetadata>,
    /// Hits on this page, at most one page size long
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}
