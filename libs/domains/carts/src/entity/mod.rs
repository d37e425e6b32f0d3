//! sea-orm entities for the cart tables.

pub mod cart;
pub mod cart_item;
pub mod product;
