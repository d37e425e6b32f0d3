//! Handler tests for the catalog domain
//!
//! Requests go through the catalog router backed by `InMemoryCatalog`:
//! - status codes and JSON bodies
//! - pagination links and filters
//! - delete guards on collections and products
//! - reviews scoped by the product in the path

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn app(catalog: &InMemoryCatalog) -> Router {
    handlers::router(
        CollectionService::new(catalog.clone()),
        ProductService::new(catalog.clone()),
        ReviewService::new(catalog.clone()),
    )
}

async fn send(catalog: &InMemoryCatalog, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(catalog).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_collection(catalog: &InMemoryCatalog, title: &str) -> Uuid {
    let (status, body) = send(catalog, "POST", "/collections", Some(json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().parse().unwrap()
}

async fn create_product(
    catalog: &InMemoryCatalog,
    collection_id: Uuid,
    title: &str,
    unit_price: &str,
) -> Uuid {
    let (status, body) = send(
        catalog,
        "POST",
        "/products",
        Some(json!({
            "title": title,
            "slug": title.to_lowercase().replace(' ', "-"),
            "inventory": 10,
            "unit_price": unit_price,
            "collection_id": collection_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().parse().unwrap()
}

// ============================================================================
// Collections
// ============================================================================

#[tokio::test]
async fn test_collection_reports_products_count() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    create_product(&catalog, collection_id, "Arabica", "12.50").await;
    create_product(&catalog, collection_id, "Robusta", "9.00").await;

    let (status, body) = send(&catalog, "GET", &format!("/collections/{collection_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Coffee");
    assert_eq!(body["products_count"], 2);
}

#[tokio::test]
async fn test_collection_with_products_cannot_be_deleted() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    create_product(&catalog, collection_id, "Arabica", "12.50").await;

    let (status, body) =
        send(&catalog, "DELETE", &format!("/collections/{collection_id}"), None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body["message"],
        "Collection cannot be deleted because it includes one or more products."
    );

    let (status, _) = send(&catalog, "GET", &format!("/collections/{collection_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_empty_collection_is_deleted() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Tea").await;

    let (status, _) = send(&catalog, "DELETE", &format!("/collections/{collection_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&catalog, "GET", &format!("/collections/{collection_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_requires_full_body_and_patch_does_not() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Tea").await;
    let uri = format!("/collections/{collection_id}");

    let (status, _) = send(&catalog, "PUT", &uri, Some(json!({}))).await;
    assert!(status.is_client_error());

    let (status, body) = send(&catalog, "PATCH", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Tea");

    let (status, body) = send(&catalog, "PUT", &uri, Some(json!({ "title": "Green Tea" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Green Tea");
}

#[tokio::test]
async fn test_invalid_uuid_is_bad_request() {
    let catalog = InMemoryCatalog::new();

    let (status, _) = send(&catalog, "GET", "/collections/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let catalog = InMemoryCatalog::new();

    let (status, _) = send(&catalog, "DELETE", "/collections", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_product_exposes_price_with_tax() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    let product_id = create_product(&catalog, collection_id, "Arabica", "10").await;

    let (status, body) = send(&catalog, "GET", &format!("/products/{product_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit_price"], "10.00");
    assert_eq!(body["price_with_tax"], "11.00");
    assert_eq!(body["collection_id"], collection_id.to_string());
    assert!(body["last_update"].is_string());
}

#[tokio::test]
async fn test_product_in_unknown_collection_is_rejected() {
    let catalog = InMemoryCatalog::new();
    let missing = Uuid::now_v7();

    let (status, body) = send(
        &catalog,
        "POST",
        "/products",
        Some(json!({
            "title": "Ghost",
            "slug": "ghost",
            "inventory": 1,
            "unit_price": "5.00",
            "collection_id": missing,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        format!("Invalid pk \"{missing}\" - object does not exist.")
    );
}

#[tokio::test]
async fn test_product_price_below_one_is_rejected() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;

    let (status, _) = send(
        &catalog,
        "POST",
        "/products",
        Some(json!({
            "title": "Cheap",
            "slug": "cheap",
            "inventory": 1,
            "unit_price": "0.50",
            "collection_id": collection_id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_referenced_by_order_item_cannot_be_deleted() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    let product_id = create_product(&catalog, collection_id, "Arabica", "12.50").await;
    catalog.record_order_item(product_id).await;

    let (status, body) = send(&catalog, "DELETE", &format!("/products/{product_id}"), None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body["message"],
        "Product cannot be deleted because it is associated with an order item."
    );
}

#[tokio::test]
async fn test_unreferenced_product_is_deleted() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    let product_id = create_product(&catalog, collection_id, "Arabica", "12.50").await;

    let (status, _) = send(&catalog, "DELETE", &format!("/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&catalog, "DELETE", &format!("/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_product_recomputes_tax() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    let product_id = create_product(&catalog, collection_id, "Arabica", "12.50").await;

    let (status, body) = send(
        &catalog,
        "PATCH",
        &format!("/products/{product_id}"),
        Some(json!({ "unit_price": "20" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit_price"], "20.00");
    assert_eq!(body["price_with_tax"], "22.00");
    assert_eq!(body["title"], "Arabica");
}

#[tokio::test]
async fn test_patch_product_description_null_clears_it() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    let product_id = create_product(&catalog, collection_id, "Arabica", "12.50").await;
    let uri = format!("/products/{product_id}");

    let (_, body) = send(&catalog, "PATCH", &uri, Some(json!({ "description": "Fruity" }))).await;
    assert_eq!(body["description"], "Fruity");

    let (_, body) = send(&catalog, "PATCH", &uri, Some(json!({ "inventory": 3 }))).await;
    assert_eq!(body["description"], "Fruity");

    let (status, body) = send(&catalog, "PATCH", &uri, Some(json!({ "description": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn test_product_list_is_paginated_by_ten() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Bulk").await;
    for i in 1..=12 {
        create_product(&catalog, collection_id, &format!("Item {i:02}"), &format!("{i}.00")).await;
    }

    let (status, body) = send(&catalog, "GET", "/products?ordering=unit_price", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 12);
    assert_eq!(body["results"].as_array().unwrap().len(), 10);
    assert_eq!(body["next"], "/products?ordering=unit_price&page=2");
    assert!(body["previous"].is_null());

    let (status, body) = send(&catalog, "GET", "/products?ordering=unit_price&page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["unit_price"], "11.00");
    assert!(body["next"].is_null());
    assert_eq!(body["previous"], "/products?ordering=unit_price");
}

#[tokio::test]
async fn test_page_out_of_range_is_404() {
    let catalog = InMemoryCatalog::new();

    for uri in [
        "/products?page=2",
        "/products?page=0",
        "/products?page=abc",
        "/products?page=18446744073709551615",
        "/products?page=1000000000000000000",
    ] {
        let (status, body) = send(&catalog, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["message"], "Invalid page.");
    }
}

#[tokio::test]
async fn test_product_list_filters_and_searches() {
    let catalog = InMemoryCatalog::new();
    let coffee = create_collection(&catalog, "Coffee").await;
    let tea = create_collection(&catalog, "Tea").await;
    create_product(&catalog, coffee, "Arabica", "12.50").await;
    create_product(&catalog, coffee, "Robusta", "6.00").await;
    create_product(&catalog, tea, "Sencha", "8.00").await;

    let (_, body) = send(&catalog, "GET", &format!("/products?collection_id={tea}"), None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["title"], "Sencha");

    let (_, body) = send(&catalog, "GET", "/products?unit_price__gt=6&unit_price__lt=12.50", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["title"], "Sencha");

    let (_, body) = send(&catalog, "GET", "/products?search=ROBUS", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["title"], "Robusta");

    let (_, body) = send(&catalog, "GET", "/products?search=_", None).await;
    assert_eq!(body["count"], 0);

    let (_, body) = send(&catalog, "GET", "/products?ordering=-unit_price", None).await;
    let titles: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Arabica", "Sencha", "Robusta"]);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let catalog = InMemoryCatalog::new();
    let coffee = create_collection(&catalog, "Coffee").await;
    for (title, slug) in [("Beans 50% off", "beans-sale"), ("Beans 500g", "beans-500g")] {
        let (status, _) = send(
            &catalog,
            "POST",
            "/products",
            Some(json!({
                "title": title,
                "slug": slug,
                "inventory": 1,
                "unit_price": "5.00",
                "collection_id": coffee,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&catalog, "GET", "/products?search=50%25", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["title"], "Beans 50% off");
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_review_takes_product_from_path() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    let product_id = create_product(&catalog, collection_id, "Arabica", "12.50").await;

    let (status, body) = send(
        &catalog,
        "POST",
        &format!("/products/{product_id}/reviews"),
        Some(json!({ "name": "Ana", "description": "Fruity", "product_id": Uuid::now_v7() })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product_id"], product_id.to_string());
    assert!(body["date"].is_string());
}

#[tokio::test]
async fn test_review_of_other_product_is_not_found() {
    let catalog = InMemoryCatalog::new();
    let collection_id = create_collection(&catalog, "Coffee").await;
    let arabica = create_product(&catalog, collection_id, "Arabica", "12.50").await;
    let robusta = create_product(&catalog, collection_id, "Robusta", "6.00").await;

    let (_, body) = send(
        &catalog,
        "POST",
        &format!("/products/{arabica}/reviews"),
        Some(json!({ "name": "Ana", "description": "Fruity" })),
    )
    .await;
    let review_id = body["id"].as_str().unwrap();

    let (status, _) = send(&catalog, "GET", &format!("/products/{robusta}/reviews/{review_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&catalog, "GET", &format!("/products/{robusta}/reviews"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (status, _) = send(&catalog, "DELETE", &format!("/products/{arabica}/reviews/{review_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_review_for_missing_product_is_404() {
    let catalog = InMemoryCatalog::new();

    let (status, _) = send(
        &catalog,
        "POST",
        &format!("/products/{}/reviews", Uuid::now_v7()),
        Some(json!({ "name": "Ana", "description": "Fruity" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
