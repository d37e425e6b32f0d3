use chrono::NaiveDate;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Loyalty tier of a customer
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "membership")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Membership {
    #[default]
    #[sea_orm(string_value = "bronze")]
    Bronze,
    #[sea_orm(string_value = "silver")]
    Silver,
    #[sea_orm(string_value = "gold")]
    Gold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    /// Owning user; set once at creation
    pub user_id: Uuid,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: Membership,
}

impl Customer {
    /// Default profile for a user seen for the first time.
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            phone: String::new(),
            birth_date: None,
            membership: Membership::default(),
        }
    }

    pub fn apply(&mut self, input: UpdateCustomer) {
        if let Some(phone) = input.phone {
            self.phone = phone;
        }
        if let Some(birth_date) = input.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(membership) = input.membership {
            self.membership = membership;
        }
    }
}

/// Body of `POST /customers`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    pub user_id: Uuid,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub membership: Membership,
}

impl CreateCustomer {
    pub fn into_customer(self) -> Customer {
        Customer {
            id: Uuid::now_v7(),
            user_id: self.user_id,
            phone: self.phone,
            birth_date: self.birth_date,
            membership: self.membership,
        }
    }
}

/// Body of `PUT /customers/{id}` and `PUT /customers/me`.
///
/// `user_id` is not accepted; omitted fields keep their stored value and
/// `"birth_date": null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(max = 255))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "axum_helpers::nullable::deserialize")]
    #[schema(value_type = Option<NaiveDate>)]
    pub birth_date: Option<Option<NaiveDate>>,
    pub membership: Option<Membership>,
}
