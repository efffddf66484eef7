use serde::Serialize;

use product_type_import::{
    CatalogClient, CatalogError, PagedResult, ProductType, ProductTypeDraft, UpdateAction,
};

/// Configuration for the hosted catalog API.
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    pub project_key: String,
    /// Override for the API origin. Defaults to the hosted endpoint.
    pub api_url: Option<String>,
    /// Pre-fetched bearer token. Obtaining and refreshing tokens is the
    /// caller's concern; the client sends this one as-is.
    pub auth_token: Option<String>,
}

/// `CatalogClient` speaking the catalog service's HTTP API.
///
/// Pure transport: no retries, no backoff, no pagination. One request
/// per trait call, with failures mapped onto `CatalogError`.
pub struct HttpCatalogClient {
    config: CatalogApiConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    version: u64,
    actions: &'a [UpdateAction],
}

impl HttpCatalogClient {
    pub fn new(config: CatalogApiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn api_base(&self) -> &str {
        self.config
            .api_url
            .as_deref()
            .unwrap_or("https://api.commercetools.com")
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/{}/product-types{}",
            self.api_base(),
            self.config.project_key,
            suffix,
        )
    }

    fn authorize(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request = request.header("User-Agent", "product-type-import");
        if let Some(token) = &self.config.auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }
}

/// Quote a key for use inside a `where` predicate.
fn quote_predicate_value(key: &str) -> String {
    let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {body}")
    }
}

#[async_trait::async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn find_by_key(&self, key: &str) -> Result<PagedResult, CatalogError> {
        let request = self
            .authorize(self.client.get(self.endpoint("")))
            .query(&[
                ("where", format!("key={}", quote_predicate_value(key))),
                ("limit", "1".to_owned()),
            ]);

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Lookup(error_body(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn create(&self, draft: &ProductTypeDraft) -> Result<ProductType, CatalogError> {
        let request = self
            .authorize(self.client.post(self.endpoint("")))
            .json(draft);

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Err(CatalogError::Conflict(error_body(response).await));
        }
        if !response.status().is_success() {
            return Err(CatalogError::Mutation(error_body(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn update(
        &self,
        id: &str,
        version: u64,
        actions: &[UpdateAction],
    ) -> Result<ProductType, CatalogError> {
        let request = self
            .authorize(self.client.post(self.endpoint(&format!("/{id}"))))
            .json(&UpdateBody { version, actions });

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Err(CatalogError::Conflict(error_body(response).await));
        }
        if !response.status().is_success() {
            return Err(CatalogError::Mutation(error_body(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}
