use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One named, typed field within a product type's schema.
///
/// Only `name` is interpreted here (it is the identity the diff engine
/// matches on); everything else is opaque payload forwarded to the
/// catalog as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeDefinition(Map<String, Value>);

impl AttributeDefinition {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The attribute name, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A candidate product type definition, parsed from validated input.
///
/// `key` is the reconciliation key: unique per catalog, used to decide
/// between create and update. Drafts without a key always take the
/// create path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTypeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeDefinition>,
}

impl ProductTypeDraft {
    /// Parse a draft out of raw input. Callers are expected to have run
    /// the input through `ProductTypeValidator` first; unknown fields
    /// that survived a strip-policy validation are dropped here.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}

/// A product type as it exists in the remote catalog: the draft fields
/// plus the server-assigned `id` and the optimistic-concurrency
/// `version` that every update must present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: String,
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}
