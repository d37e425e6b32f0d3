use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

static SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap());

/// Sales tax applied to `unit_price` for `price_with_tax`.
pub const TAX_RATE: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    if !SLUG.is_match(slug) {
        return Err(validator::ValidationError::new("invalid_slug"));
    }
    Ok(())
}

fn validate_unit_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if *price < Decimal::ONE {
        return Err(validator::ValidationError::new("unit_price_below_minimum"));
    }
    if price.round_dp(2) != *price || *price >= Decimal::from(10_000) {
        return Err(validator::ValidationError::new("unit_price_out_of_range"));
    }
    Ok(())
}

/// Two-decimal money value, e.g. `10` becomes `10.00`.
pub fn money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}

pub fn price_with_tax(unit_price: Decimal) -> Decimal {
    money(unit_price * TAX_RATE)
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Collection {
    pub id: Uuid,
    pub title: String,
    /// Number of products in this collection
    pub products_count: u64,
}

/// Body of `POST /collections` and `PUT /collections/{id}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCollection {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
}

/// Body of `PATCH /collections/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCollection {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
}

impl From<CreateCollection> for UpdateCollection {
    fn from(input: CreateCollection) -> Self {
        Self {
            title: Some(input.title),
        }
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub inventory: i32,
    #[schema(value_type = String, example = "19.99")]
    pub unit_price: Decimal,
    /// `unit_price` plus 10% tax, rounded to cents
    #[schema(value_type = String, example = "21.99")]
    pub price_with_tax: Decimal,
    pub collection_id: Uuid,
    pub last_update: DateTime<Utc>,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        let unit_price = money(input.unit_price);
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            slug: input.slug,
            description: input.description,
            inventory: input.inventory,
            unit_price,
            price_with_tax: price_with_tax(unit_price),
            collection_id: input.collection_id,
            last_update: Utc::now(),
        }
    }

    /// Applies the `Some` fields of `update` and refreshes `last_update`.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(inventory) = update.inventory {
            self.inventory = inventory;
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = money(unit_price);
            self.price_with_tax = price_with_tax(self.unit_price);
        }
        if let Some(collection_id) = update.collection_id {
            self.collection_id = collection_id;
        }
        self.last_update = Utc::now();
    }
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_slug"))]
    pub slug: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub inventory: i32,
    #[validate(custom(function = "validate_unit_price"))]
    #[schema(value_type = String, example = "19.99")]
    pub unit_price: Decimal,
    pub collection_id: Uuid,
}

/// Body of `PATCH /products/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    /// `null` clears the description
    #[serde(default, deserialize_with = "axum_helpers::nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(range(min = 0))]
    pub inventory: Option<i32>,
    #[validate(custom(function = "validate_unit_price"))]
    #[schema(value_type = Option<String>, example = "19.99")]
    pub unit_price: Option<Decimal>,
    pub collection_id: Option<Uuid>,
}

impl From<CreateProduct> for UpdateProduct {
    fn from(input: CreateProduct) -> Self {
        Self {
            title: Some(input.title),
            slug: Some(input.slug),
            description: Some(input.description),
            inventory: Some(input.inventory),
            unit_price: Some(input.unit_price),
            collection_id: Some(input.collection_id),
        }
    }
}

/// Fields a product list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ProductSortField {
    UnitPrice,
    LastUpdate,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductOrdering {
    pub field: ProductSortField,
    pub descending: bool,
}

impl ProductOrdering {
    /// Parses `unit_price,-last_update`; unknown fields are skipped.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .map(str::trim)
            .filter_map(|term| {
                let (descending, name) = match term.strip_prefix('-') {
                    Some(name) => (true, name),
                    None => (false, term),
                };
                ProductSortField::from_str(name)
                    .ok()
                    .map(|field| Self { field, descending })
            })
            .collect()
    }
}

/// Query string of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Only products of this collection
    pub collection_id: Option<Uuid>,
    /// Strictly greater unit price
    #[serde(rename = "unit_price__gt")]
    #[param(value_type = Option<String>)]
    pub unit_price_gt: Option<Decimal>,
    /// Strictly lower unit price
    #[serde(rename = "unit_price__lt")]
    #[param(value_type = Option<String>)]
    pub unit_price_lt: Option<Decimal>,
    /// Case-insensitive match on title or description
    pub search: Option<String>,
    /// Comma separated `unit_price`, `last_update`, `title`; prefix `-` for descending
    pub ordering: Option<String>,
    /// 1-based page number
    #[param(value_type = Option<u64>)]
    pub page: Option<String>,
}

/// Normalized product list criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub collection_id: Option<Uuid>,
    pub unit_price_gt: Option<Decimal>,
    pub unit_price_lt: Option<Decimal>,
    pub search: Option<String>,
    pub ordering: Vec<ProductOrdering>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(collection_id) = self.collection_id {
            if product.collection_id != collection_id {
                return false;
            }
        }
        if let Some(gt) = self.unit_price_gt {
            if product.unit_price <= gt {
                return false;
            }
        }
        if let Some(lt) = self.unit_price_lt {
            if product.unit_price >= lt {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_title = product.title.to_lowercase().contains(&term);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

impl From<&ProductQuery> for ProductFilter {
    fn from(query: &ProductQuery) -> Self {
        Self {
            collection_id: query.collection_id,
            unit_price_gt: query.unit_price_gt,
            unit_price_lt: query.unit_price_lt,
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            ordering: query
                .ordering
                .as_deref()
                .map(ProductOrdering::parse_list)
                .unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
}

impl Review {
    pub fn new(product_id: Uuid, input: CreateReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_id,
            name: input.name,
            description: input.description,
            date: Utc::now().date_naive(),
        }
    }

    pub fn apply_update(&mut self, update: UpdateReview) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }
}

/// Body of `POST` and `PUT` on reviews. The product comes from the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
}

impl From<CreateReview> for UpdateReview {
    fn from(input: CreateReview) -> Self {
        Self {
            name: Some(input.name),
            description: Some(input.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> CreateProduct {
        CreateProduct {
            title: "Espresso Beans".to_string(),
            slug: "espresso-beans".to_string(),
            description: Some("Dark roast".to_string()),
            inventory: 12,
            unit_price: dec!(19.99),
            collection_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn price_with_tax_rounds_to_cents() {
        assert_eq!(price_with_tax(dec!(19.99)), dec!(21.99));
        assert_eq!(price_with_tax(dec!(10)), dec!(11.00));
        assert_eq!(price_with_tax(dec!(1.05)).to_string(), "1.16");
    }

    #[test]
    fn money_keeps_two_decimals() {
        assert_eq!(money(dec!(10)).to_string(), "10.00");
        assert_eq!(money(dec!(3.456)).to_string(), "3.46");
    }

    #[test]
    fn unit_price_must_be_at_least_one() {
        let mut input = sample_input();
        input.unit_price = dec!(0.99);
        assert!(input.validate().is_err());

        input.unit_price = dec!(1);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn unit_price_fits_six_two() {
        let mut input = sample_input();
        input.unit_price = dec!(10000);
        assert!(input.validate().is_err());

        input.unit_price = dec!(1.005);
        assert!(input.validate().is_err());
    }

    #[test]
    fn negative_inventory_is_rejected() {
        let mut input = sample_input();
        input.inventory = -1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn slug_allows_only_url_characters() {
        let mut input = sample_input();
        input.slug = "has spaces".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn apply_update_recomputes_tax_and_touches_last_update() {
        let mut product = Product::new(sample_input());
        let before = product.last_update;

        product.apply_update(UpdateProduct {
            unit_price: Some(dec!(20)),
            ..Default::default()
        });

        assert_eq!(product.unit_price, dec!(20.00));
        assert_eq!(product.price_with_tax, dec!(22.00));
        assert!(product.last_update >= before);
        assert_eq!(product.title, "Espresso Beans");
    }

    #[test]
    fn ordering_parses_known_fields_and_direction() {
        let ordering = ProductOrdering::parse_list("-unit_price, title,bogus,-");
        assert_eq!(
            ordering,
            vec![
                ProductOrdering {
                    field: ProductSortField::UnitPrice,
                    descending: true
                },
                ProductOrdering {
                    field: ProductSortField::Title,
                    descending: false
                },
            ]
        );
    }

    #[test]
    fn filter_matches_price_bounds_strictly() {
        let product = Product::new(sample_input());
        let filter = ProductFilter {
            unit_price_gt: Some(dec!(19.99)),
            ..Default::default()
        };
        assert!(!filter.matches(&product));

        let filter = ProductFilter {
            unit_price_gt: Some(dec!(10)),
            unit_price_lt: Some(dec!(20)),
            ..Default::default()
        };
        assert!(filter.matches(&product));
    }

    #[test]
    fn search_covers_title_and_description_case_insensitively() {
        let product = Product::new(sample_input());

        for term in ["espresso", "DARK"] {
            let filter = ProductFilter {
                search: Some(term.to_string()),
                ..Default::default()
            };
            assert!(filter.matches(&product), "{term} should match");
        }

        let filter = ProductFilter {
            search: Some("tea".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&product));
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = ProductQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(ProductFilter::from(&query).search, None);
    }
}
