use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Products, per-user preferences and order history"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/user-preferences", api = domain_user_preferences::ApiDoc),
        (path = "/orders", api = domain_orders::ApiDoc)
    )
)]
pub struct ApiDoc;
