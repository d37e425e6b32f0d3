//! Integration tests for the catalog domain
//!
//! These run against PostgreSQL in a container:
//! - filters, search and ordering run as SQL
//! - foreign keys back the delete guards
//! - reviews cascade with their product

use axum_helpers::PageRequest;
use domain_catalog::*;
use rust_decimal_macros::dec;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn product_input(builder: &TestDataBuilder, collection_id: uuid::Uuid, title: &str, price: rust_decimal::Decimal) -> CreateProduct {
    CreateProduct {
        title: title.to_string(),
        slug: builder.name("product", &title.to_lowercase()),
        description: Some(format!("{title} from the integration suite")),
        inventory: 5,
        unit_price: price,
        collection_id,
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_collection_counts_its_products() {
    let db = TestDatabase::new().await;
    let collections = PgCollectionRepository::new(db.connection());
    let products = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("collection_counts");

    let collection = collections
        .create(CreateCollection {
            title: builder.name("collection", "coffee"),
        })
        .await
        .unwrap();
    products
        .create(product_input(&builder, collection.id, "Arabica", dec!(12.50)))
        .await
        .unwrap();

    let fetched = assert_some(
        collections.get_by_id(collection.id).await.unwrap(),
        "collection should exist",
    );
    assert_eq!(fetched.products_count, 1);

    let listed = collections.list().await.unwrap();
    let listed = listed.iter().find(|c| c.id == collection.id).unwrap();
    assert_eq!(listed.products_count, 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_product_list_filters_in_sql() {
    let db = TestDatabase::new().await;
    let collections = PgCollectionRepository::new(db.connection());
    let products = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_filters");

    let collection = collections
        .create(CreateCollection {
            title: builder.name("collection", "tea"),
        })
        .await
        .unwrap();
    for (title, price) in [("Sencha", dec!(8)), ("Matcha", dec!(30)), ("Hojicha", dec!(6))] {
        products
            .create(product_input(&builder, collection.id, title, price))
            .await
            .unwrap();
    }

    let filter = ProductFilter {
        collection_id: Some(collection.id),
        unit_price_gt: Some(dec!(6)),
        ordering: ProductOrdering::parse_list("-unit_price"),
        ..Default::default()
    };
    let (results, count) = products.list(filter, PageRequest::default()).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(results[0].title, "Matcha");
    assert_eq!(results[1].title, "Sencha");

    let filter = ProductFilter {
        collection_id: Some(collection.id),
        search: Some("HOJI".to_string()),
        ..Default::default()
    };
    let (results, _) = products.list(filter, PageRequest::default()).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].unit_price.to_string(), "6.00");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_ordered_product_cannot_be_deleted() {
    let db = TestDatabase::new().await;
    let collections = PgCollectionRepository::new(db.connection());
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("ordered_product");

    let collection = collections
        .create(CreateCollection {
            title: builder.name("collection", "beans"),
        })
        .await
        .unwrap();
    let product = service
        .create_product(product_input(&builder, collection.id, "Arabica", dec!(12.50)))
        .await
        .unwrap();
    db.create_order_item(product.id).await;

    let err = service.delete_product(product.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::ProductHasOrderItems { order_items: 1, .. }));
    assert!(service.get_product(product.id).await.is_ok());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_reviews_are_removed_with_their_product() {
    let db = TestDatabase::new().await;
    let collections = PgCollectionRepository::new(db.connection());
    let products = ProductService::new(PgProductRepository::new(db.connection()));
    let reviews = ReviewService::new(PgReviewRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("review_cascade");

    let collection = collections
        .create(CreateCollection {
            title: builder.name("collection", "snacks"),
        })
        .await
        .unwrap();
    let product = products
        .create_product(product_input(&builder, collection.id, "Crackers", dec!(3)))
        .await
        .unwrap();
    let review = reviews
        .create_review(
            product.id,
            CreateReview {
                name: "Ana".to_string(),
                description: "Crunchy".to_string(),
            },
        )
        .await
        .unwrap();

    products.delete_product(product.id).await.unwrap();

    let err = reviews.get_review(product.id, review.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::ReviewNotFound(_)));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_update_product_touches_last_update() {
    let db = TestDatabase::new().await;
    let collections = PgCollectionRepository::new(db.connection());
    let products = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("touch_last_update");

    let collection = collections
        .create(CreateCollection {
            title: builder.name("collection", "misc"),
        })
        .await
        .unwrap();
    let created = products
        .create(product_input(&builder, collection.id, "Mug", dec!(9.99)))
        .await
        .unwrap();

    let updated = products
        .update(
            created.id,
            UpdateProduct {
                inventory: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.inventory, 1);
    assert!(updated.last_update >= created.last_update);
    assert_eq!(updated.price_with_tax, dec!(10.99));
}
