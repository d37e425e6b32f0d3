#[cfg(feature = "sea_orm_resource")]
pub use sea_orm_resource::SeaOrmResource;

/// REST metadata for a persisted resource.
///
/// Usually derived with `SeaOrmResource` on a sea-orm `Model`:
///
/// ```ignore
/// #[derive(DeriveEntityModel, SeaOrmResource)]
/// #[sea_orm(table_name = "cart_items")]
/// #[sea_orm_resource(url = "/carts/{cart_pk}/items")]
/// pub struct Model { /* ... */ }
///
/// assert_eq!(Model::URL_WITH_ID, "/carts/{cart_pk}/items/{id}");
/// assert_eq!(Model::NAME, "cart_item");
/// assert_eq!(Model::TAG, "Cart Items");
/// ```
pub trait ApiResource {
    /// Collection path relative to the API root, e.g. `/products`
    const URL: &'static str;
    /// Item path, `URL` followed by `/{id}`
    const URL_WITH_ID: &'static str;
    /// Table name
    const COLLECTION: &'static str;
    /// Singular name used in messages and audit resources, e.g. `product`
    const NAME: &'static str;
    /// OpenAPI tag
    const TAG: &'static str;
}
