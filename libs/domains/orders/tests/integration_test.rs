//! Integration tests for the orders repository against PostgreSQL.
//!
//! Run with `cargo test -p domain_orders -- --ignored` (requires Docker).

use chrono::{TimeZone, Utc};
use domain_orders::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

#[tokio::test]
#[ignore] // Requires Docker
async fn test_queries_against_seeded_orders() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("orders_queries");
    let alice = db.create_test_user(&builder.username("alice")).await;
    let bob = db.create_test_user(&builder.username("bob")).await;

    let first = db
        .create_test_order(alice, "delivered", "2025-01-05T08:00:00Z", "19.99")
        .await;
    let second = db
        .create_test_order(alice, "shipped", "2025-02-10T08:00:00Z", "250.00")
        .await;
    let third = db
        .create_test_order(bob, "shipped", "2025-01-20T08:00:00Z", "99.99")
        .await;

    let repo = PgOrderRepository::new(db.connection());

    let fetched = assert_some(repo.find_by_id(second).await.unwrap(), "order");
    assert_eq!(fetched.status, OrderStatus::Shipped);
    assert_eq!(fetched.total_amount, Decimal::new(25000, 2));

    let all: Vec<i64> = repo.find_all().await.unwrap().iter().map(|o| o.id).collect();
    assert_ascending_ids(&all, "find_all");

    let shipped: Vec<i64> = repo
        .find_by_status(OrderStatus::Shipped)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(shipped, vec![second, third]);

    let desc: Vec<i64> = repo
        .find_by_user(alice, Some(OrderSort::Desc))
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(desc, vec![second, first]);

    let in_january = repo
        .find_by_date_range(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(in_january.len(), 2);

    let large = repo.find_by_min_total(Decimal::new(9999, 2)).await.unwrap();
    assert_eq!(large.len(), 2);

    assert_eq!(
        repo.find_by_user_and_status(bob, OrderStatus::Shipped)
            .await
            .unwrap()
            .len(),
        1
    );
}
