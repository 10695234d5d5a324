//! HTTP handlers for the read-only orders API

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    IdPath, PathParams, QueryParams,
    errors::responses::{
        BadRequestIdResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{DateRangeQuery, MinTotalQuery, Order, OrderSort, OrderStatus, SortQuery};
use crate::repository::OrderRepository;
use crate::service::OrderService;

pub const TAG: &str = "Orders";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_orders,
        get_order,
        list_by_user,
        list_by_status,
        list_by_user_and_status,
        list_by_date_range,
        list_by_min_total,
    ),
    components(
        schemas(Order, OrderStatus, OrderSort),
        responses(
            NotFoundResponse,
            BadRequestIdResponse,
            BadRequestQueryResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Order history queries")
    )
)]
pub struct ApiDoc;

pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_orders))
        .route("/date-range", get(list_by_date_range))
        .route("/min-total", get(list_by_min_total))
        .route("/status/{status}", get(list_by_status))
        .route("/user/{user_id}", get(list_by_user))
        .route("/user/{user_id}/status/{status}", get(list_by_user_and_status))
        .route("/{id}", get(get_order))
        .with_state(shared_service)
}

/// List all orders
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All orders", body = Vec<Order>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.list_all().await?))
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    IdPath(id): IdPath,
) -> OrderResult<Json<Order>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Orders placed by one user
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = TAG,
    params(("user_id" = i64, Path, description = "User ID"), SortQuery),
    responses(
        (status = 200, description = "The user's orders", body = Vec<Order>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_user<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    IdPath(user_id): IdPath,
    QueryParams(query): QueryParams<SortQuery>,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.list_by_user(user_id, query.sort).await?))
}

/// Orders in a given status
#[utoipa::path(
    get,
    path = "/status/{status}",
    tag = TAG,
    params(("status" = OrderStatus, Path, description = "Order status")),
    responses(
        (status = 200, description = "Orders in this status", body = Vec<Order>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_status<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    PathParams(status): PathParams<OrderStatus>,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.list_by_status(status).await?))
}

/// One user's orders in a given status
#[utoipa::path(
    get,
    path = "/user/{user_id}/status/{status}",
    tag = TAG,
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("status" = OrderStatus, Path, description = "Order status")
    ),
    responses(
        (status = 200, description = "Matching orders", body = Vec<Order>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_user_and_status<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    PathParams((user_id, status)): PathParams<(i64, OrderStatus)>,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.list_by_user_and_status(user_id, status).await?))
}

/// Orders placed within an inclusive date range
#[utoipa::path(
    get,
    path = "/date-range",
    tag = TAG,
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Orders in range", body = Vec<Order>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_date_range<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    QueryParams(range): QueryParams<DateRangeQuery>,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.list_by_date_range(range.start, range.end).await?))
}

/// Orders whose total is at least `minAmount`
#[utoipa::path(
    get,
    path = "/min-total",
    tag = TAG,
    params(MinTotalQuery),
    responses(
        (status = 200, description = "Orders at or above the amount", body = Vec<Order>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_min_total<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    QueryParams(query): QueryParams<MinTotalQuery>,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.list_by_min_total(query.min_amount).await?))
}
