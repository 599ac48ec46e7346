//! Handler tests for the Products domain
//!
//! These tests drive the real router over the in-memory repository and
//! verify request deserialization, response serialization, HTTP status
//! codes, and error responses.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use domain_products::{handlers, InMemoryProductRepository, Product, ProductService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let repository = InMemoryProductRepository::new();
    let service = ProductService::new(repository);
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn widget_payload(name: &str, quantity: i32) -> Value {
    json!({
        "name": name,
        "description": "Test item",
        "price": "19.99",
        "quantity": quantity,
        "category": "tools",
        "sku": format!("SKU-{name}")
    })
}

#[tokio::test]
async fn test_create_product_returns_201_with_first_id() {
    let app = app();

    let response = app
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "hammer");
    assert_eq!(product.quantity, 5);
    assert_eq!(product.created_at, product.updated_at);
}

#[tokio::test]
async fn test_create_duplicate_name_returns_409() {
    let app = app();

    let first = app
        .clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let mut payload = widget_payload("hammer", 2);
    payload["sku"] = json!("SKU-other");
    let second = app.oneshot(post_json("/", payload)).await.unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = json_body(second.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_create_duplicate_sku_returns_409() {
    let app = app();

    let mut first = widget_payload("hammer", 5);
    first["sku"] = json!("SKU-SAME");
    app.clone().oneshot(post_json("/", first)).await.unwrap();

    let mut second = widget_payload("wrench", 2);
    second["sku"] = json!("SKU-SAME");
    let response = app.oneshot(post_json("/", second)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_invalid_body_returns_400_with_details() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "name": "",
                "price": "9.99",
                "quantity": 1
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_create_negative_price_returns_400() {
    let app = app();

    let mut payload = widget_payload("hammer", 5);
    payload["price"] = json!("-1.00");
    let response = app.oneshot(post_json("/", payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_negative_quantity_returns_400() {
    let app = app();

    let mut payload = widget_payload("hammer", 5);
    payload["quantity"] = json!(-3);
    let response = app.oneshot(post_json("/", payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_malformed_json_returns_400() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let app = app();

    let response = app.oneshot(get("/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_with_non_numeric_id_returns_400() {
    let app = app();

    let response = app.oneshot(get("/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_by_name_and_missing_name_404() {
    let app = app();

    app.clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();

    let found = app.clone().oneshot(get("/name/hammer")).await.unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    let product: Product = json_body(found.into_body()).await;
    assert_eq!(product.name, "hammer");

    let missing = app.oneshot(get("/name/ghost")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_all_products() {
    let app = app();

    app.clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/", widget_payload("wrench", 0)))
        .await
        .unwrap();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[1].id, 2);
}

#[tokio::test]
async fn test_category_listing_unknown_category_is_empty_200() {
    let app = app();

    app.clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();

    let tools = app.clone().oneshot(get("/category/tools")).await.unwrap();
    assert_eq!(tools.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(tools.into_body()).await;
    assert_eq!(products.len(), 1);

    let garden = app.oneshot(get("/category/garden")).await.unwrap();
    assert_eq!(garden.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(garden.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_low_stock_threshold_is_exclusive() {
    let app = app();

    app.clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/", widget_payload("wrench", 3)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/", widget_payload("pliers", 0)))
        .await
        .unwrap();

    let response = app.oneshot(get("/low-stock/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // quantity == 3 is not below the threshold
    let products: Vec<Product> = json_body(response.into_body()).await;
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["pliers"]);
}

#[tokio::test]
async fn test_stats_endpoints() {
    let app = app();

    app.clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/", widget_payload("wrench", 0)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/", widget_payload("pliers", 2)))
        .await
        .unwrap();

    let count = app
        .clone()
        .oneshot(get("/stats/in-stock-count"))
        .await
        .unwrap();
    assert_eq!(count.status(), StatusCode::OK);
    let count: i64 = json_body(count.into_body()).await;
    assert_eq!(count, 2);

    let total = app.oneshot(get("/stats/total-inventory")).await.unwrap();
    assert_eq!(total.status(), StatusCode::OK);
    let total: i64 = json_body(total.into_body()).await;
    assert_eq!(total, 7);
}

#[tokio::test]
async fn test_stats_on_empty_inventory() {
    let app = app();

    let count = app
        .clone()
        .oneshot(get("/stats/in-stock-count"))
        .await
        .unwrap();
    let count: i64 = json_body(count.into_body()).await;
    assert_eq!(count, 0);

    let total = app.oneshot(get("/stats/total-inventory")).await.unwrap();
    let total: i64 = json_body(total.into_body()).await;
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let app = app();

    let response = app
        .oneshot(put_json("/42", widget_payload("ghost", 1)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_invalid_body_returns_400() {
    let app = app();

    app.clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();

    let mut payload = widget_payload("hammer", 5);
    payload["name"] = json!("   ");
    let response = app.oneshot(put_json("/1", payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_to_taken_name_returns_409() {
    let app = app();

    app.clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/", widget_payload("wrench", 2)))
        .await
        .unwrap();

    let mut payload = widget_payload("hammer", 2);
    payload["sku"] = json!("SKU-wrench");
    let response = app.oneshot(put_json("/2", payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_missing_product_returns_404() {
    let app = app();

    let response = app.oneshot(delete("/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// End-to-end lifecycle: create, fetch, deplete stock, verify it shows up
// as out of stock, delete, and confirm it is gone.
#[tokio::test]
async fn test_product_lifecycle() {
    let app = app();

    // Create
    let created = app
        .clone()
        .oneshot(post_json("/", widget_payload("hammer", 5)))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Product = json_body(created.into_body()).await;
    assert_eq!(created.id, 1);

    // Fetch by id
    let fetched = app.clone().oneshot(get("/1")).await.unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Product = json_body(fetched.into_body()).await;
    assert_eq!(fetched, created);

    // Deplete stock via full update
    let mut payload = widget_payload("hammer", 0);
    payload["description"] = json!("All sold out");
    let updated = app.clone().oneshot(put_json("/1", payload)).await.unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Product = json_body(updated.into_body()).await;
    assert_eq!(updated.quantity, 0);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    // Now listed as out of stock
    let out = app.clone().oneshot(get("/out-of-stock")).await.unwrap();
    let out: Vec<Product> = json_body(out.into_body()).await;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, 1);

    // Delete
    let deleted = app.clone().oneshot(delete("/1")).await.unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Gone
    let missing = app.oneshot(get("/1")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
