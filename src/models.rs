//! Rows written by the seeder.
//!
//! `New*` types are what the generator produces and the repositories insert;
//! `User` and `Order` are the same rows read back with their assigned ids.

use chrono::NaiveDate;

/// Products an order can be for.
pub const PRODUCT_CATALOG: [&str; 10] = [
    "Mechanical Keyboard",
    "Gaming Mouse",
    "27'' Monitor",
    "Laptop",
    "Cooling Pad",
    "Headphones",
    "Webcam",
    "Ergonomic Chair",
    "USB-C Hub",
    "Microphone",
];

/// Lowest order amount, inclusive.
pub const MIN_ORDER_AMOUNT: f64 = 30.0;
/// Highest order amount, inclusive.
pub const MAX_ORDER_AMOUNT: f64 = 1500.0;

/// A user not yet inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub registration_date: NaiveDate,
}

/// An order not yet inserted. `user_id` must belong to a user from the same run.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub product: String,
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registration_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Counts reported at the end of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users_inserted: usize,
    pub orders_inserted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_ten_distinct_products() {
        let unique: HashSet<_> = PRODUCT_CATALOG.iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_amount_bounds() {
        assert!(MIN_ORDER_AMOUNT < MAX_ORDER_AMOUNT);
        assert_eq!(MIN_ORDER_AMOUNT, 30.0);
        assert_eq!(MAX_ORDER_AMOUNT, 1500.0);
    }
}
