use serde::Serialize;
use serde_json::Value;

/// One failed input definition paired with what went wrong.
///
/// Serialized field names match the report consumed by downstream
/// tooling, so the offending definition rides along verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEntry {
    #[serde(rename = "productType")]
    pub product_type: Value,
    pub error: String,
}

/// Append-only ledger for one import run.
///
/// An importer owns exactly one summary for its whole life; it is never
/// reset and never shared across instances. Invariant:
/// `successfull_imports == inserted.len()` at all times.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub errors: Vec<ErrorEntry>,
    pub inserted: Vec<String>,
    #[serde(rename = "successfullImports")]
    pub successfull_imports: u64,
}

impl ImportSummary {
    pub(crate) fn record_error(&mut self, def: &Value, error: impl ToString) {
        self.errors.push(ErrorEntry {
            product_type: def.clone(),
            error: error.to_string(),
        });
    }

    pub(crate) fn record_inserted(&mut self, name: &str) {
        self.inserted.push(name.to_owned());
        self.successfull_imports += 1;
    }
}
