use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Two-decimal money value.
pub fn money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// The product fields embedded in a cart item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimpleProduct {
    pub id: Uuid,
    pub title: String,
    #[schema(value_type = String, example = "19.99")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: Uuid,
    pub product: SimpleProduct,
    pub quantity: i16,
    /// `quantity × product.unit_price`
    #[schema(value_type = String, example = "39.98")]
    pub total_price: Decimal,
}

impl CartItem {
    pub fn new(id: Uuid, product: SimpleProduct, quantity: i16) -> Self {
        let total_price = money(product.unit_price * Decimal::from(quantity));
        Self {
            id,
            product,
            quantity,
            total_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    /// Random v4 id; knowing it is what grants access to the cart
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
    /// Sum of the item totals
    #[schema(value_type = String, example = "39.98")]
    pub total_price: Decimal,
}

impl Cart {
    pub fn new(id: Uuid, created_at: DateTime<Utc>, items: Vec<CartItem>) -> Self {
        let total_price = money(items.iter().map(|item| item.total_price).sum());
        Self {
            id,
            created_at,
            items,
            total_price,
        }
    }
}

/// Body of `POST /carts/{cart_pk}/items`. The cart comes from the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddCartItem {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i16,
}

/// Body of `PATCH /carts/{cart_pk}/items/{id}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItem {
    #[validate(range(min = 1))]
    pub quantity: i16,
}
