use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::{AddCartItem, Cart, CartItem, SimpleProduct};

/// Persistence for carts and their items.
///
/// Item operations take the cart id from the request path; an item that
/// belongs to another cart is treated as missing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn create_cart(&self) -> CartResult<Cart>;

    /// The cart with its items and their products
    async fn get_cart(&self, id: Uuid) -> CartResult<Option<Cart>>;

    /// Removes the cart and its items
    async fn delete_cart(&self, id: Uuid) -> CartResult<bool>;

    async fn cart_exists(&self, id: Uuid) -> CartResult<bool>;

    async fn product_exists(&self, product_id: Uuid) -> CartResult<bool>;

    async fn list_items(&self, cart_id: Uuid) -> CartResult<Vec<CartItem>>;

    async fn get_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<Option<CartItem>>;

    /// Inserts the item, or adds to the quantity of the cart's existing
    /// item for the same product
    async fn add_item(&self, cart_id: Uuid, input: AddCartItem) -> CartResult<CartItem>;

    async fn update_item(&self, cart_id: Uuid, id: Uuid, quantity: i16) -> CartResult<CartItem>;

    async fn delete_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<bool>;
}

#[derive(Debug, Clone, Copy)]
struct StoredItem {
    cart_id: Uuid,
    product_id: Uuid,
    quantity: i16,
}

#[derive(Debug, Default)]
struct CartStore {
    carts: HashMap<Uuid, DateTime<Utc>>,
    items: HashMap<Uuid, StoredItem>,
    products: HashMap<Uuid, SimpleProduct>,
}

impl CartStore {
    fn item(&self, id: Uuid) -> CartResult<CartItem> {
        let stored = self.items.get(&id).ok_or(CartError::ItemNotFound(id))?;
        let product = self
            .products
            .get(&stored.product_id)
            .cloned()
            .ok_or(CartError::UnknownProduct(stored.product_id))?;
        Ok(CartItem::new(id, product, stored.quantity))
    }

    fn items_of(&self, cart_id: Uuid) -> CartResult<Vec<CartItem>> {
        let mut ids: Vec<Uuid> = self
            .items
            .iter()
            .filter(|(_, item)| item.cart_id == cart_id)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids.into_iter().map(|id| self.item(id)).collect()
    }

    fn owned_by(&self, cart_id: Uuid, id: Uuid) -> bool {
        self.items.get(&id).is_some_and(|item| item.cart_id == cart_id)
    }
}

/// In-memory carts for development and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCartRepository {
    store: Arc<RwLock<CartStore>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a product available to cart items; products are owned by the catalog.
    pub async fn register_product(&self, product: SimpleProduct) {
        self.store.write().await.products.insert(product.id, product);
    }
}

fn merged_quantity(current: i16, added: i16) -> CartResult<i16> {
    current
        .checked_add(added)
        .ok_or_else(|| CartError::Validation(format!("quantity exceeds {}", i16::MAX)))
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn create_cart(&self) -> CartResult<Cart> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        self.store.write().await.carts.insert(id, created_at);

        tracing::info!(cart_id = %id, "Created cart");
        Ok(Cart::new(id, created_at, Vec::new()))
    }

    async fn get_cart(&self, id: Uuid) -> CartResult<Option<Cart>> {
        let store = self.store.read().await;
        let Some(created_at) = store.carts.get(&id).copied() else {
            return Ok(None);
        };
        Ok(Some(Cart::new(id, created_at, store.items_of(id)?)))
    }

    async fn delete_cart(&self, id: Uuid) -> CartResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.carts.remove(&id).is_some();
        if removed {
            store.items.retain(|_, item| item.cart_id != id);
            tracing::info!(cart_id = %id, "Deleted cart");
        }
        Ok(removed)
    }

    async fn cart_exists(&self, id: Uuid) -> CartResult<bool> {
        Ok(self.store.read().await.carts.contains_key(&id))
    }

    async fn product_exists(&self, product_id: Uuid) -> CartResult<bool> {
        Ok(self.store.read().await.products.contains_key(&product_id))
    }

    async fn list_items(&self, cart_id: Uuid) -> CartResult<Vec<CartItem>> {
        self.store.read().await.items_of(cart_id)
    }

    async fn get_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<Option<CartItem>> {
        let store = self.store.read().await;
        if !store.owned_by(cart_id, id) {
            return Ok(None);
        }
        store.item(id).map(Some)
    }

    async fn add_item(&self, cart_id: Uuid, input: AddCartItem) -> CartResult<CartItem> {
        let mut store = self.store.write().await;
        if !store.carts.contains_key(&cart_id) {
            return Err(CartError::CartNotFound(cart_id));
        }
        if !store.products.contains_key(&input.product_id) {
            return Err(CartError::UnknownProduct(input.product_id));
        }

        let existing = store
            .items
            .iter_mut()
            .find(|(_, item)| item.cart_id == cart_id && item.product_id == input.product_id);

        let id = match existing {
            Some((id, item)) => {
                item.quantity = merged_quantity(item.quantity, input.quantity)?;
                tracing::info!(cart_id = %cart_id, cart_item_id = %id, "Merged cart item");
                *id
            }
            None => {
                let id = Uuid::now_v7();
                store.items.insert(
                    id,
                    StoredItem {
                        cart_id,
                        product_id: input.product_id,
                        quantity: input.quantity,
                    },
                );
                tracing::info!(cart_id = %cart_id, cart_item_id = %id, "Added cart item");
                id
            }
        };

        store.item(id)
    }

    async fn update_item(&self, cart_id: Uuid, id: Uuid, quantity: i16) -> CartResult<CartItem> {
        let mut store = self.store.write().await;
        let item = store
            .items
            .get_mut(&id)
            .filter(|item| item.cart_id == cart_id)
            .ok_or(CartError::ItemNotFound(id))?;
        item.quantity = quantity;

        tracing::info!(cart_item_id = %id, "Updated cart item");
        store.item(id)
    }

    async fn delete_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<bool> {
        let mut store = self.store.write().await;
        if !store.owned_by(cart_id, id) {
            return Ok(false);
        }
        store.items.remove(&id);

        tracing::info!(cart_item_id = %id, "Deleted cart item");
        Ok(true)
    }
}
