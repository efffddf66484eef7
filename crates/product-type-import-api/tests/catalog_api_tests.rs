use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use product_type_import::{CatalogClient, CatalogError, ProductTypeDraft, UpdateAction};
use product_type_import_api::{CatalogApiConfig, HttpCatalogClient};

fn client_for(server: &MockServer) -> HttpCatalogClient {
    HttpCatalogClient::new(CatalogApiConfig {
        project_key: "test-project".into(),
        api_url: Some(server.uri()),
        auth_token: Some("test-token".into()),
    })
}

fn draft() -> ProductTypeDraft {
    ProductTypeDraft::from_value(&json!({
        "key": "pt-key",
        "name": "custom-product-type",
        "description": "d",
        "attributes": [{ "name": "width" }],
    }))
    .unwrap()
}

#[tokio::test]
async fn find_by_key_queries_with_an_exact_match_predicate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-project/product-types"))
        .and(query_param("where", "key=\"pt-key\""))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "results": [{
                "id": "pt-1",
                "version": 3,
                "key": "pt-key",
                "name": "custom-product-type",
                "description": "d",
                "attributes": [{ "name": "width" }],
            }],
        })))
        .mount(&server)
        .await;

    let page = client_for(&server).find_by_key("pt-key").await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.results[0].id, "pt-1");
    assert_eq!(page.results[0].version, 3);
    assert_eq!(page.results[0].attributes[0].name(), Some("width"));
}

#[tokio::test]
async fn find_by_key_with_no_match_returns_an_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-project/product-types"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "total": 0, "results": [] })),
        )
        .mount(&server)
        .await;

    let page = client_for(&server).find_by_key("absent").await.unwrap();

    assert_eq!(page.total, 0);
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn failed_lookup_maps_to_a_lookup_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-project/product-types"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let error = client_for(&server).find_by_key("pt-key").await.unwrap_err();

    assert!(matches!(error, CatalogError::Lookup(_)));
}

#[tokio::test]
async fn create_posts_the_draft_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test-project/product-types"))
        .and(body_json(json!({
            "key": "pt-key",
            "name": "custom-product-type",
            "description": "d",
            "attributes": [{ "name": "width" }],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pt-1",
            "version": 1,
            "key": "pt-key",
            "name": "custom-product-type",
            "description": "d",
            "attributes": [{ "name": "width" }],
        })))
        .mount(&server)
        .await;

    let record = client_for(&server).create(&draft()).await.unwrap();

    assert_eq!(record.id, "pt-1");
    assert_eq!(record.version, 1);
}

#[tokio::test]
async fn duplicate_key_create_maps_to_a_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test-project/product-types"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "A duplicate value \"pt-key\" exists for field key",
        })))
        .mount(&server)
        .await;

    let error = client_for(&server).create(&draft()).await.unwrap_err();

    assert!(matches!(error, CatalogError::Conflict(_)));
    assert!(error.to_string().contains("duplicate value"));
}

#[tokio::test]
async fn update_posts_version_and_actions() {
    let server = MockServer::start().await;

    let actions: Vec<UpdateAction> = serde_json::from_value(json!([
        { "action": "addAttributeDefinition", "attribute": { "name": "color" } },
    ]))
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/test-project/product-types/pt-1"))
        .and(body_json(json!({
            "version": 3,
            "actions": [
                { "action": "addAttributeDefinition", "attribute": { "name": "color" } },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pt-1",
            "version": 4,
            "key": "pt-key",
            "name": "custom-product-type",
            "description": "d",
            "attributes": [{ "name": "width" }, { "name": "color" }],
        })))
        .mount(&server)
        .await;

    let record = client_for(&server)
        .update("pt-1", 3, &actions)
        .await
        .unwrap();

    assert_eq!(record.version, 4);
    assert_eq!(record.attributes[1].name(), Some("color"));
}

#[tokio::test]
async fn stale_version_update_maps_to_a_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test-project/product-types/pt-1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Object pt-1 has a different version than expected",
        })))
        .mount(&server)
        .await;

    let error = client_for(&server).update("pt-1", 2, &[]).await.unwrap_err();

    assert!(matches!(error, CatalogError::Conflict(_)));
}

#[tokio::test]
async fn server_rejection_maps_to_a_mutation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test-project/product-types"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid attribute type",
        })))
        .mount(&server)
        .await;

    let error = client_for(&server).create(&draft()).await.unwrap_err();

    assert!(matches!(error, CatalogError::Mutation(_)));
}
