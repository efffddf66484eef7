use std::sync::Mutex;

use crate::actions::UpdateAction;
use crate::catalog::{CatalogClient, CatalogError, PagedResult};
use crate::definition::{ProductType, ProductTypeDraft};

/// Every call an `InMemoryCatalog` has served, in arrival order.
/// Lets tests assert that no network call was attempted at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindByKey(String),
    Create(String),
    Update(String),
}

#[derive(Default)]
struct State {
    records: Vec<ProductType>,
    calls: Vec<Call>,
    next_id: u64,
    fail_find: Option<CatalogError>,
    fail_create: Option<CatalogError>,
    fail_update: Option<CatalogError>,
}

/// In-memory catalog for testing. Assigns ids and versions the way the
/// remote service does, records every call, and can be armed to fail
/// the next request of a given kind.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<State>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing record, as if a previous run created it.
    pub fn add(&self, record: ProductType) {
        self.state.lock().unwrap().records.push(record);
    }

    pub fn records(&self) -> Vec<ProductType> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Fail the next `find_by_key` with `error`.
    pub fn fail_next_find(&self, error: CatalogError) {
        self.state.lock().unwrap().fail_find = Some(error);
    }

    /// Fail the next `create` with `error`.
    pub fn fail_next_create(&self, error: CatalogError) {
        self.state.lock().unwrap().fail_create = Some(error);
    }

    /// Fail the next `update` with `error`.
    pub fn fail_next_update(&self, error: CatalogError) {
        self.state.lock().unwrap().fail_update = Some(error);
    }
}

#[async_trait::async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn find_by_key(&self, key: &str) -> Result<PagedResult, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::FindByKey(key.to_owned()));

        if let Some(error) = state.fail_find.take() {
            return Err(error);
        }

        let results: Vec<ProductType> = state
            .records
            .iter()
            .filter(|record| record.key.as_deref() == Some(key))
            .cloned()
            .collect();

        Ok(PagedResult {
            total: results.len() as u64,
            results,
        })
    }

    async fn create(&self, draft: &ProductTypeDraft) -> Result<ProductType, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(draft.name.clone()));

        if let Some(error) = state.fail_create.take() {
            return Err(error);
        }

        let duplicate = state.records.iter().any(|record| {
            record.name == draft.name
                || (draft.key.is_some() && record.key == draft.key)
        });
        if duplicate {
            return Err(CatalogError::Conflict(format!(
                "duplicate product type \"{}\"",
                draft.name
            )));
        }

        state.next_id += 1;
        let record = ProductType {
            id: format!("pt-{}", state.next_id),
            version: 1,
            key: draft.key.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            attributes: draft.attributes.clone(),
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        version: u64,
        actions: &[UpdateAction],
    ) -> Result<ProductType, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update(id.to_owned()));

        if let Some(error) = state.fail_update.take() {
            return Err(error);
        }

        let record = state
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| CatalogError::Mutation(format!("no product type \"{id}\"")))?;

        if record.version != version {
            return Err(CatalogError::Conflict(format!(
                "version mismatch on \"{id}\": have {}, got {version}",
                record.version
            )));
        }

        for action in actions {
            match action {
                UpdateAction::AddAttributeDefinition { attribute } => {
                    record.attributes.push(attribute.clone());
                }
            }
        }
        record.version += 1;
        Ok(record.clone())
    }
}
