//! Handler tests for the orders router, backed by a seeded in-memory repository.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use domain_orders::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).unwrap()
}

/// Seeds: user 1 has three orders, user 2 has one.
async fn app() -> Router {
    let repo = InMemoryOrderRepository::new();
    repo.insert(1, OrderStatus::Delivered, march(3), Decimal::new(4999, 2)).await;
    repo.insert(1, OrderStatus::Pending, march(15), Decimal::new(15000, 2)).await;
    repo.insert(1, OrderStatus::Pending, march(9), Decimal::new(10000, 2)).await;
    repo.insert(2, OrderStatus::Cancelled, march(9), Decimal::new(2500, 2)).await;
    handlers::router(OrderService::new(repo))
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn ids(app: &Router, uri: &str) -> Vec<i64> {
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    let orders: Vec<Order> = json_body(response.into_body()).await;
    orders.into_iter().map(|o| o.id).collect()
}

#[tokio::test]
async fn test_list_and_get() {
    let app = app().await;
    assert_eq!(ids(&app, "/").await, vec![1, 2, 3, 4]);

    let response = get(&app, "/2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["userId"], 1);
    assert_eq!(body["totalAmount"], "150.00");
}

#[tokio::test]
async fn test_get_missing_is_404() {
    let app = app().await;
    let response = get(&app, "/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_user_orders_sorting() {
    let app = app().await;
    assert_eq!(ids(&app, "/user/1").await, vec![1, 2, 3]);
    assert_eq!(ids(&app, "/user/1?sort=asc").await, vec![1, 3, 2]);
    assert_eq!(ids(&app, "/user/1?sort=desc").await, vec![2, 3, 1]);

    let response = get(&app, "/user/1?sort=sideways").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_routes() {
    let app = app().await;
    assert_eq!(ids(&app, "/status/pending").await, vec![2, 3]);
    assert_eq!(ids(&app, "/user/2/status/cancelled").await, vec![4]);
    assert!(ids(&app, "/user/2/status/pending").await.is_empty());

    let response = get(&app, "/status/lost").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_date_range() {
    let app = app().await;
    assert_eq!(
        ids(&app, "/date-range?start=2025-03-09T10:00:00Z&end=2025-03-15T10:00:00Z").await,
        vec![2, 3, 4]
    );

    let response = get(&app, "/date-range?start=2025-03-20T00:00:00Z&end=2025-03-01T00:00:00Z").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&app, "/date-range?start=yesterday&end=2025-03-01T00:00:00Z").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_min_total() {
    let app = app().await;
    assert_eq!(ids(&app, "/min-total?minAmount=100").await, vec![2, 3]);
    assert_eq!(ids(&app, "/min-total?minAmount=0").await, vec![1, 2, 3, 4]);

    let response = get(&app, "/min-total").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
