pub mod client;
pub mod credentials;

pub use client::{CatalogApiConfig, HttpCatalogClient};
pub use credentials::{
    Credentials, CredentialsError, project_credentials, project_credentials_from,
};
