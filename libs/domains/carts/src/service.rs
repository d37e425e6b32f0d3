use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CartError, CartResult};
use crate::models::{AddCartItem, Cart, CartItem, UpdateCartItem};
use crate::repository::CartRepository;

/// Cart and cart item use cases.
#[derive(Clone)]
pub struct CartService<R: CartRepository> {
    repository: Arc<R>,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_cart(&self) -> CartResult<Cart> {
        self.repository.create_cart().await
    }

    pub async fn get_cart(&self, id: Uuid) -> CartResult<Cart> {
        self.repository
            .get_cart(id)
            .await?
            .ok_or(CartError::CartNotFound(id))
    }

    pub async fn delete_cart(&self, id: Uuid) -> CartResult<()> {
        if !self.repository.delete_cart(id).await? {
            return Err(CartError::CartNotFound(id));
        }
        Ok(())
    }

    pub async fn list_items(&self, cart_id: Uuid) -> CartResult<Vec<CartItem>> {
        self.ensure_cart(cart_id).await?;
        self.repository.list_items(cart_id).await
    }

    pub async fn get_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<CartItem> {
        self.repository
            .get_item(cart_id, id)
            .await?
            .ok_or(CartError::ItemNotFound(id))
    }

    /// Adds `input` to the cart in the path, merging with an existing line
    /// for the same product.
    pub async fn add_item(&self, cart_id: Uuid, input: AddCartItem) -> CartResult<CartItem> {
        input
            .validate()
            .map_err(|e| CartError::Validation(e.to_string()))?;

        self.ensure_cart(cart_id).await?;
        if !self.repository.product_exists(input.product_id).await? {
            return Err(CartError::UnknownProduct(input.product_id));
        }

        self.repository.add_item(cart_id, input).await
    }

    pub async fn update_item(
        &self,
        cart_id: Uuid,
        id: Uuid,
        input: UpdateCartItem,
    ) -> CartResult<CartItem> {
        input
            .validate()
            .map_err(|e| CartError::Validation(e.to_string()))?;

        self.repository.update_item(cart_id, id, input.quantity).await
    }

    pub async fn delete_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<()> {
        if !self.repository.delete_item(cart_id, id).await? {
            return Err(CartError::ItemNotFound(id));
        }
        Ok(())
    }

    async fn ensure_cart(&self, cart_id: Uuid) -> CartResult<()> {
        if !self.repository.cart_exists(cart_id).await? {
            return Err(CartError::CartNotFound(cart_id));
        }
        Ok(())
    }
}
