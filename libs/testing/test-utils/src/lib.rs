//! Shared test utilities for the domain crates
//!
//! - `TestDatabase`: PostgreSQL container with the catalog migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic names per test
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore] // Requires Docker
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let user_id = db.create_test_user(&builder.username("buyer")).await;
//!     let product_name = builder.name("product", "widget");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic test data derived from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name so reruns produce the same data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// assert_eq!(builder.seed(), TestDataBuilder::from_test_name("test_create_product").seed());
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `test-{prefix}-{seed}-{suffix}`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let name = TestDataBuilder::new(7).name("product", "widget");
    /// assert_eq!(name, "test-product-7-widget");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Unique username within this test
    pub fn username(&self, suffix: &str) -> String {
        format!("user_{}_{}", self.seed, suffix)
    }

    /// Unique email within this test
    pub fn email(&self, suffix: &str) -> String {
        format!("{}@example.test", self.username(suffix))
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Unwrap an `Option`, panicking with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `ids` is strictly ascending.
    pub fn assert_ascending_ids(ids: &[i64], context: &str) {
        assert!(
            ids.windows(2).all(|w| w[0] < w[1]),
            "{}: ids not in ascending order: {:?}",
            context,
            ids
        );
    }
}
