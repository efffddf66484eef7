use std::sync::Mutex;

use serde_json::Value;

use crate::actions::build_update_actions;
use crate::catalog::{CatalogClient, CatalogError};
use crate::definition::ProductTypeDraft;
use crate::summary::ImportSummary;
use crate::validation::{KeyPolicy, ProductTypeValidator, UnknownFieldPolicy, Violation};

/// How a validation failure affects the caller of `import_one`.
///
/// Network-stage failures (lookup, create, update) always propagate
/// regardless of this setting; only validation failures are gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Abort,
    Continue,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportConfig {
    pub failure_policy: FailurePolicy,
    pub key_policy: KeyPolicy,
    pub unknown_fields: UnknownFieldPolicy,
}

/// Errors surfaced by a single reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Validation error on productType \"{subject}\" - {message}")]
    Validation { subject: String, message: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// What `import_one` did for a single definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Created(String),
    Updated(String),
    /// The existing record already carries every attribute of the new
    /// definition; no mutation call was issued.
    Unchanged(String),
    /// Validation failed and `FailurePolicy::Continue` swallowed it.
    /// Recorded in the ledger, invisible to the chunk outcome.
    SkippedInvalid,
}

/// Reconciles candidate product type definitions against the remote
/// catalog: create if absent, diff-and-patch if present.
///
/// One importer owns one validator and one run summary for its whole
/// life. The summary is the only state a reconciliation mutates; it is
/// append-only and safe to update from concurrently settling items.
pub struct ProductTypeImporter<C: CatalogClient> {
    client: C,
    validator: ProductTypeValidator,
    config: ImportConfig,
    summary: Mutex<ImportSummary>,
}

impl<C: CatalogClient> ProductTypeImporter<C> {
    pub fn new(client: C, config: ImportConfig) -> Self {
        Self {
            client,
            validator: ProductTypeValidator::new(config.key_policy, config.unknown_fields),
            config,
            summary: Mutex::new(ImportSummary::default()),
        }
    }

    /// Snapshot of the run ledger so far.
    pub fn summary(&self) -> ImportSummary {
        self.summary.lock().unwrap().clone()
    }

    /// The ledger as a pretty-printed JSON report.
    pub fn summary_report(&self) -> String {
        serde_json::to_string_pretty(&self.summary()).unwrap_or_default()
    }

    /// Validate and reconcile one definition.
    ///
    /// Every failure is appended to the ledger before any propagation
    /// decision is made. Validation failures resolve as
    /// `SkippedInvalid` under `FailurePolicy::Continue`; failures from
    /// the catalog always return `Err`.
    pub async fn import_one(&self, def: &Value) -> Result<ImportOutcome, ImportError> {
        let draft = match self.validate(def) {
            Ok(draft) => draft,
            Err(error) => {
                self.summary.lock().unwrap().record_error(def, &error);
                return match self.config.failure_policy {
                    FailurePolicy::Abort => Err(error),
                    FailurePolicy::Continue => Ok(ImportOutcome::SkippedInvalid),
                };
            }
        };

        match self.upsert(&draft).await {
            Ok(outcome) => {
                self.summary.lock().unwrap().record_inserted(&draft.name);
                Ok(outcome)
            }
            Err(error) => {
                self.summary.lock().unwrap().record_error(def, &error);
                Err(error)
            }
        }
    }

    fn validate(&self, def: &Value) -> Result<ProductTypeDraft, ImportError> {
        self.validator
            .validate(def)
            .map_err(|violations| validation_error(def, &violations))?;

        // Cannot fail on a definition that passed validation; kept as a
        // violation rather than a panic in case the shapes ever drift.
        ProductTypeDraft::from_value(def).map_err(|error| ImportError::Validation {
            subject: subject_of(def),
            message: error.to_string(),
        })
    }

    async fn upsert(&self, draft: &ProductTypeDraft) -> Result<ImportOutcome, ImportError> {
        let existing = match &draft.key {
            Some(key) => {
                let page = self.client.find_by_key(key).await?;
                // The key is expected unique. Should the catalog ever
                // return more than one match, the first one wins.
                page.results.into_iter().next()
            }
            None => None,
        };

        match existing {
            None => {
                self.client.create(draft).await?;
                Ok(ImportOutcome::Created(draft.name.clone()))
            }
            Some(existing) => {
                let actions = build_update_actions(draft, &existing);
                if actions.is_empty() {
                    Ok(ImportOutcome::Unchanged(draft.name.clone()))
                } else {
                    self.client
                        .update(&existing.id, existing.version, &actions)
                        .await?;
                    Ok(ImportOutcome::Updated(draft.name.clone()))
                }
            }
        }
    }
}

fn validation_error(def: &Value, violations: &[Violation]) -> ImportError {
    let message = violations
        .first()
        .map(|violation| violation.to_string())
        .unwrap_or_else(|| "invalid definition".to_owned());

    ImportError::Validation {
        subject: subject_of(def),
        message,
    }
}

fn subject_of(def: &Value) -> String {
    def.get("key")
        .and_then(Value::as_str)
        .or_else(|| def.get("name").and_then(Value::as_str))
        .unwrap_or("unknown")
        .to_owned()
}
