//! Test support shared by the storefront domain crates.
//!
//! - [`TestDatabase`]: throwaway PostgreSQL with every migration applied (feature `postgres`)
//! - [`TestDataBuilder`]: titles, slugs and accounts derived from the test name, so
//!   reruns produce the same rows and parallel tests never collide on unique columns
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! #[tokio::test]
//! #[ignore = "requires docker"]
//! async fn stores_a_collection() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("stores_a_collection");
//!     let title = builder.name("collection", "coffee");
//! }
//! ```

use std::hash::{DefaultHasher, Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Seeded generator for values that must be unique per test.
#[derive(Clone, Copy, Debug)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name.
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Stable id for the account a test acts as.
    pub fn user_id(&self) -> Uuid {
        Uuid::from_u64_pair(self.seed, self.seed.rotate_left(32))
    }

    /// `test-{kind}-{seed}-{suffix}`, usable as a title or a slug.
    pub fn name(&self, kind: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", kind, self.seed, suffix)
    }

    /// Satisfies the `^[\w.@+-]+$` username rule.
    pub fn username(&self, suffix: &str) -> String {
        format!("user{}{}", self.seed, suffix)
    }

    pub fn email(&self, suffix: &str) -> String {
        format!("{}@example.com", self.username(suffix))
    }
}

pub mod assertions {
    /// Unwrap a lookup that the test expects to find something.
    #[track_caller]
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_test_name_same_data() {
        let first = TestDataBuilder::from_test_name("carts_merge");
        let second = TestDataBuilder::from_test_name("carts_merge");

        assert_eq!(first.user_id(), second.user_id());
        assert_eq!(first.name("product", "a"), second.name("product", "a"));
    }

    #[test]
    fn different_test_names_do_not_collide() {
        let first = TestDataBuilder::from_test_name("one");
        let second = TestDataBuilder::from_test_name("two");

        assert_ne!(first.user_id(), second.user_id());
        assert_ne!(first.email("x"), second.email("x"));
    }

    #[test]
    fn account_fields_follow_the_seed() {
        let builder = TestDataBuilder::new(7);

        assert_eq!(builder.username("a"), "user7a");
        assert_eq!(builder.email("a"), "user7a@example.com");
        assert_eq!(builder.name("collection", "tea"), "test-collection-7-tea");
    }
}
