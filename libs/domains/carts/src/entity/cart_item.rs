use core_proc_macros::SeaOrmResource;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{CartItem, SimpleProduct};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, SeaOrmResource)]
#[sea_orm(table_name = "cart_items")]
#[sea_orm_resource(url = "/carts/{cart_pk}/items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cart::Entity",
        from = "Column::CartId",
        to = "super::cart::Column::Id",
        on_delete = "Cascade"
    )]
    Cart,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::cart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_cart_item(self, product: super::product::Model) -> CartItem {
        CartItem::new(self.id, product.into(), self.quantity)
    }
}

impl From<super::product::Model> for SimpleProduct {
    fn from(model: super::product::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            unit_price: model.unit_price,
        }
    }
}
