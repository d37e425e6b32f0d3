//! sea-orm entities for the catalog tables.

pub mod collection;
pub mod order_item;
pub mod product;
pub mod review;
