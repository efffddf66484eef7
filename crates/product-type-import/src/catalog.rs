use std::sync::Arc;

use serde::Deserialize;

use crate::actions::UpdateAction;
use crate::definition::{ProductType, ProductTypeDraft};

/// Errors surfaced by the remote catalog collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// Create or update rejected on a uniqueness or version constraint
    /// (duplicate key, stale optimistic-concurrency version).
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("mutation rejected: {0}")]
    Mutation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Result page of an exact-match key query.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResult {
    pub total: u64,
    pub results: Vec<ProductType>,
}

/// The remote catalog the importer reconciles against.
///
/// Implementations own transport concerns (auth, retries, pagination);
/// the importer only issues one lookup and at most one mutation per
/// definition.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Exact-match query on the reconciliation key.
    async fn find_by_key(&self, key: &str) -> Result<PagedResult, CatalogError>;

    /// Create a new product type. Fails on constraint violations such
    /// as a duplicate key.
    async fn create(&self, draft: &ProductTypeDraft) -> Result<ProductType, CatalogError>;

    /// Apply update actions to an existing product type. `version` is
    /// the optimistic-concurrency token; the catalog rejects a stale one.
    async fn update(
        &self,
        id: &str,
        version: u64,
        actions: &[UpdateAction],
    ) -> Result<ProductType, CatalogError>;
}

#[async_trait::async_trait]
impl<T: CatalogClient + ?Sized> CatalogClient for Arc<T> {
    async fn find_by_key(&self, key: &str) -> Result<PagedResult, CatalogError> {
        (**self).find_by_key(key).await
    }

    async fn create(&self, draft: &ProductTypeDraft) -> Result<ProductType, CatalogError> {
        (**self).create(draft).await
    }

    async fn update(
        &self,
        id: &str,
        version: u64,
        actions: &[UpdateAction],
    ) -> Result<ProductType, CatalogError> {
        (**self).update(id, version, actions).await
    }
}
