pub mod actions;
pub mod batch;
pub mod catalog;
pub mod definition;
pub mod import;
pub mod summary;
pub mod validation;

pub use actions::{UpdateAction, build_update_actions};
pub use batch::{ChunkReport, run_chunk};
pub use catalog::{CatalogClient, CatalogError, PagedResult};
pub use definition::{AttributeDefinition, ProductType, ProductTypeDraft};
pub use import::{
    FailurePolicy, ImportConfig, ImportError, ImportOutcome, ProductTypeImporter,
};
pub use summary::{ErrorEntry, ImportSummary};
pub use validation::{KeyPolicy, ProductTypeValidator, UnknownFieldPolicy, Violation};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
