//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    IdPath, PathParams, QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, MaxPriceQuery, PriceRangeQuery, Product, QuantityQuery, SearchQuery,
    UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "Products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        get_by_category,
        get_by_price_range,
        get_available,
        search_products,
        get_under_price,
        get_by_name,
        update_stock,
        check_availability,
        product_exists,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog and stock endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/available", get(get_available))
        .route("/search", get(search_products))
        .route("/price-range", get(get_by_price_range))
        .route("/under-price", get(get_under_price))
        .route("/category/{category}", get(get_by_category))
        .route("/name/{name}", get(get_by_name))
        .route("/exists/{id}", get(product_exists))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/stock", patch(update_stock))
        .route("/{id}/available", get(check_availability))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All products ordered by id", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_all_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    service
        .get_product_by_id(id)
        .await?
        .map(Json)
        .ok_or(ProductError::NotFound(id))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Products in a category (exact match)
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = TAG,
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParams(category): PathParams<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_products_by_category(&category).await?;
    Ok(Json(products))
}

/// Products priced within an inclusive range
#[utoipa::path(
    get,
    path = "/price-range",
    tag = TAG,
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Products with minPrice <= price <= maxPrice", body = Vec<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_price_range<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(range): QueryParams<PriceRangeQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service
        .get_products_by_price_range(range.min_price, range.max_price)
        .await?;
    Ok(Json(products))
}

/// Products with stock on hand
#[utoipa::path(
    get,
    path = "/available",
    tag = TAG,
    responses(
        (status = 200, description = "Products with stockQuantity > 0", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_available<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_available_products().await?;
    Ok(Json(products))
}

/// Search name and description
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_products(&query.q).await?;
    Ok(Json(products))
}

/// In-stock products at or below a price
#[utoipa::path(
    get,
    path = "/under-price",
    tag = TAG,
    params(MaxPriceQuery),
    responses(
        (status = 200, description = "In-stock products with price <= maxPrice", body = Vec<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_under_price<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(query): QueryParams<MaxPriceQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_products_under_price(query.max_price).await?;
    Ok(Json(products))
}

/// Products whose name contains a term, ignoring case
#[utoipa::path(
    get,
    path = "/name/{name}",
    tag = TAG,
    params(
        ("name" = String, Path, description = "Name fragment")
    ),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_name<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParams(name): PathParams<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_products_by_name(&name).await?;
    Ok(Json(products))
}

/// Apply a signed stock delta
///
/// Returns `false` when the product is missing or the stock would go negative.
#[utoipa::path(
    patch,
    path = "/{id}/stock",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID"),
        QuantityQuery
    ),
    responses(
        (status = 200, description = "Whether the delta was applied", body = bool),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<QuantityQuery>,
) -> ProductResult<Json<bool>> {
    let applied = service.update_stock_quantity(id, query.quantity).await?;
    Ok(Json(applied))
}

/// Whether a product has at least `quantity` in stock
#[utoipa::path(
    get,
    path = "/{id}/available",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID"),
        QuantityQuery
    ),
    responses(
        (status = 200, description = "Availability; false for unknown ids", body = bool),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn check_availability<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<QuantityQuery>,
) -> ProductResult<Json<bool>> {
    let available = service.is_product_available(id, query.quantity).await?;
    Ok(Json(available))
}

/// Whether a product exists
#[utoipa::path(
    get,
    path = "/exists/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Existence flag", body = bool),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn product_exists<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<bool>> {
    let exists = service.product_exists(id).await?;
    Ok(Json(exists))
}
