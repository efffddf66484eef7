use std::fmt;

use serde_json::Value;

/// Top-level properties a definition may carry.
pub const RECOGNIZED_FIELDS: &[&str] = &["name", "key", "description", "attributes"];

/// A single structural violation found in an input definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Whether the reconciliation key is mandatory on input definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Definitions without a key are accepted and always create.
    #[default]
    Optional,
    /// Definitions without a key are rejected.
    Required,
}

/// What to do with top-level properties outside the recognized set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Unrecognized properties fail validation.
    #[default]
    Reject,
    /// Unrecognized properties are dropped when the draft is parsed.
    Strip,
}

/// Structural validator for incoming product type definitions.
///
/// Owned by one importer instance, never process-global, so importers
/// configured with different policies do not interfere. Side-effect
/// free; never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductTypeValidator {
    key_policy: KeyPolicy,
    unknown_fields: UnknownFieldPolicy,
}

impl ProductTypeValidator {
    pub fn new(key_policy: KeyPolicy, unknown_fields: UnknownFieldPolicy) -> Self {
        Self {
            key_policy,
            unknown_fields,
        }
    }

    /// Check `def` against the recognized shape. Attribute internals are
    /// opaque payload: they are only required to be objects.
    pub fn validate(&self, def: &Value) -> Result<(), Vec<Violation>> {
        let Some(fields) = def.as_object() else {
            return Err(vec![Violation::new("$", "definition must be an object")]);
        };

        let mut violations = Vec::new();

        for required in ["name", "description"] {
            if !fields.contains_key(required) {
                violations.push(Violation::new(required, "is required"));
            }
        }
        if self.key_policy == KeyPolicy::Required && !fields.contains_key("key") {
            violations.push(Violation::new("key", "is required"));
        }

        for field in ["name", "key", "description"] {
            if let Some(value) = fields.get(field) {
                if !value.is_string() {
                    violations.push(Violation::new(field, "must be a string"));
                }
            }
        }

        if let Some(attributes) = fields.get("attributes") {
            match attributes.as_array() {
                Some(items) => {
                    if items.iter().any(|item| !item.is_object()) {
                        violations
                            .push(Violation::new("attributes", "items must be objects"));
                    }
                }
                None => violations.push(Violation::new("attributes", "must be an array")),
            }
        }

        if self.unknown_fields == UnknownFieldPolicy::Reject {
            for field in fields.keys() {
                if !RECOGNIZED_FIELDS.contains(&field.as_str()) {
                    violations.push(Violation::new(
                        field.clone(),
                        "is not a recognized property",
                    ));
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
