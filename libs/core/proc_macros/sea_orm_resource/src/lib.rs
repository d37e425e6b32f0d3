//! `SeaOrmResource` derive: implements `core_proc_macros::ApiResource` for a
//! sea-orm `Model` from its `#[sea_orm(table_name = "...")]` attribute.
//!
//! ```ignore
//! #[derive(Clone, Debug, DeriveEntityModel, SeaOrmResource)]
//! #[sea_orm(table_name = "products")]
//! pub struct Model {
//!     #[sea_orm(primary_key, auto_increment = false)]
//!     pub id: Uuid,
//! }
//!
//! assert_eq!(Model::URL, "/products");
//! assert_eq!(Model::URL_WITH_ID, "/products/{id}");
//! assert_eq!(Model::NAME, "product");
//! assert_eq!(Model::TAG, "Products");
//! ```
//!
//! Nested resources override the URL:
//!
//! ```ignore
//! #[sea_orm(table_name = "reviews")]
//! #[sea_orm_resource(url = "/products/{product_pk}/reviews")]
//! ```

extern crate proc_macro;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Lit, Meta};

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(sea_orm_resource), forward_attrs(sea_orm))]
struct SeaOrmResourceInput {
    ident: syn::Ident,
    attrs: Vec<syn::Attribute>,
    #[darling(default)]
    collection: Option<String>,
    #[darling(default)]
    url: Option<String>,
    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    tag: Option<String>,
}

/// Attributes (all optional):
///
/// - `collection`: defaults to the table name
/// - `url`: defaults to `/<table_name>`
/// - `name`: singular name, defaults to the table name without its trailing `s`
/// - `tag`: defaults to the table name in title case, e.g. `cart_items` → `Cart Items`
#[proc_macro_derive(SeaOrmResource, attributes(sea_orm_resource))]
pub fn sea_orm_resource_derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);
    let receiver = match SeaOrmResourceInput::from_derive_input(&ast) {
        Ok(receiver) => receiver,
        Err(err) => return TokenStream::from(err.write_errors()),
    };

    match impl_sea_orm_resource(receiver) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn title_case(input: &str) -> String {
    input
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn singular(table_name: &str) -> String {
    table_name
        .strip_suffix('s')
        .unwrap_or(table_name)
        .to_string()
}

fn extract_table_name(attrs: &[syn::Attribute]) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("sea_orm"))
        .find_map(|attr| {
            let Meta::List(meta_list) = &attr.meta else {
                return None;
            };
            let mut table_name = None;
            let _ = meta_list.parse_nested_meta(|meta| {
                if meta.path.is_ident("table_name") {
                    if let Lit::Str(lit_str) = meta.value()?.parse::<Lit>()? {
                        table_name = Some(lit_str.value());
                    }
                } else if meta.input.peek(syn::Token![=]) {
                    // Skip the value of unrelated `key = value` entries.
                    let _: Lit = meta.value()?.parse()?;
                }
                Ok(())
            });
            table_name
        })
}

fn impl_sea_orm_resource(receiver: SeaOrmResourceInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &receiver.ident;

    let table_name = extract_table_name(&receiver.attrs).ok_or_else(|| {
        syn::Error::new_spanned(
            ident,
            "SeaOrmResource requires #[sea_orm(table_name = \"...\")] attribute",
        )
    })?;

    let collection = receiver.collection.unwrap_or_else(|| table_name.clone());
    let url = receiver.url.unwrap_or_else(|| format!("/{}", table_name));
    let url_with_id = format!("{}/{{id}}", url.trim_end_matches('/'));
    let name = receiver.name.unwrap_or_else(|| singular(&table_name));
    let tag = receiver.tag.unwrap_or_else(|| title_case(&table_name));

    Ok(quote! {
        impl core_proc_macros::ApiResource for #ident {
            const URL: &'static str = #url;
            const URL_WITH_ID: &'static str = #url_with_id;
            const COLLECTION: &'static str = #collection;
            const NAME: &'static str = #name;
            const TAG: &'static str = #tag;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn expand(input: proc_macro2::TokenStream) -> String {
        let ast: DeriveInput = syn::parse2(input).unwrap();
        let receiver = SeaOrmResourceInput::from_derive_input(&ast).unwrap();
        impl_sea_orm_resource(receiver).unwrap().to_string()
    }

    #[test]
    fn finds_table_name_among_other_keys() {
        let ast: DeriveInput = syn::parse2(quote! {
            #[derive(Clone, Debug)]
            #[sea_orm(schema_name = "public", table_name = "order_items")]
            pub struct Model { id: String }
        })
        .unwrap();

        assert_eq!(extract_table_name(&ast.attrs), Some("order_items".to_string()));
    }

    #[test]
    fn defaults_follow_table_name() {
        let output = expand(quote! {
            #[sea_orm(table_name = "products")]
            pub struct Model { id: String }
        });

        assert!(output.contains("impl core_proc_macros :: ApiResource for Model"));
        assert!(output.contains(r#"const URL : & 'static str = "/products""#));
        assert!(output.contains(r#"const URL_WITH_ID : & 'static str = "/products/{id}""#));
        assert!(output.contains(r#"const COLLECTION : & 'static str = "products""#));
        assert!(output.contains(r#"const NAME : & 'static str = "product""#));
        assert!(output.contains(r#"const TAG : & 'static str = "Products""#));
    }

    #[test]
    fn nested_url_keeps_parent_placeholder() {
        let output = expand(quote! {
            #[sea_orm(table_name = "cart_items")]
            #[sea_orm_resource(url = "/carts/{cart_pk}/items")]
            pub struct Model { id: String }
        });

        assert!(output.contains(r#"const URL : & 'static str = "/carts/{cart_pk}/items""#));
        assert!(
            output.contains(r#"const URL_WITH_ID : & 'static str = "/carts/{cart_pk}/items/{id}""#)
        );
        assert!(output.contains(r#"const NAME : & 'static str = "cart_item""#));
        assert!(output.contains(r#"const TAG : & 'static str = "Cart Items""#));
    }

    #[test]
    fn every_attribute_can_be_overridden() {
        let output = expand(quote! {
            #[sea_orm(table_name = "users")]
            #[sea_orm_resource(
                collection = "accounts",
                url = "/auth/users",
                name = "user",
                tag = "Auth"
            )]
            pub struct Model { id: String }
        });

        assert!(output.contains(r#"const COLLECTION : & 'static str = "accounts""#));
        assert!(output.contains(r#"const URL : & 'static str = "/auth/users""#));
        assert!(output.contains(r#"const TAG : & 'static str = "Auth""#));
    }

    #[test]
    fn missing_table_name_is_an_error() {
        let ast: DeriveInput = syn::parse2(quote! {
            pub struct Model { id: String }
        })
        .unwrap();
        let receiver = SeaOrmResourceInput::from_derive_input(&ast).unwrap();

        assert!(impl_sea_orm_resource(receiver).is_err());
    }

    #[test]
    fn title_case_and_singular() {
        assert_eq!(title_case("collections"), "Collections");
        assert_eq!(title_case("order_items"), "Order Items");
        assert_eq!(singular("reviews"), "review");
        assert_eq!(singular("cart_items"), "cart_item");
    }
}
