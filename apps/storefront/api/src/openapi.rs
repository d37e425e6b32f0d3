use domain_customers::ApiResource;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Products, collections, reviews, carts, customer profiles and JWT auth for the store front"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_users::handlers::AUTH_URL, api = domain_users::ApiDoc),
        (path = domain_customers::entity::customer::Model::URL, api = domain_customers::ApiDoc)
    ),
    modifiers(&RootResources, &BearerAuth)
)]
pub struct ApiDoc;

/// Catalog and cart docs already carry full resource paths.
struct RootResources;

impl Modify for RootResources {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_catalog::ApiDoc::openapi());
        openapi.merge(domain_carts::ApiDoc::openapi());
    }
}

/// `bearer_auth`, referenced by the `/me` operations.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_resource() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/auth/users",
            "/auth/users/me",
            "/auth/jwt/create",
            "/auth/jwt/refresh",
            "/customers/me",
            "/collections",
            "/products/{id}",
            "/products/{product_pk}/reviews",
            "/carts/{cart_pk}/items/{id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
