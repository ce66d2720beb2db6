//! Fake-data generator
//!
//! Produces plausible users and orders. Every value is drawn from one RNG so a
//! fixed seed reproduces the whole run.

use chrono::{Days, NaiveDate};
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use crate::models::{NewOrder, NewUser, MAX_ORDER_AMOUNT, MIN_ORDER_AMOUNT, PRODUCT_CATALOG};
use crate::{SeedError, SeedResult};

/// Numbered variants tried for a drawn email that was already used.
pub const MAX_EMAIL_ATTEMPTS: usize = 1000;

/// Registration dates fall within this many days before today.
pub const REGISTRATION_WINDOW_DAYS: u64 = 730;

/// Order dates fall within this many days before today.
pub const ORDER_WINDOW_DAYS: u64 = 365;

pub struct FakeDataGenerator<R = StdRng> {
    rng: R,
    seen_emails: HashSet<String>,
}

impl FakeDataGenerator<StdRng> {
    /// Deterministic generator: the same seed yields the same rows.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> FakeDataGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            seen_emails: HashSet::new(),
        }
    }

    /// Generate a user whose email has not been produced by this generator before.
    pub fn user(&mut self, today: NaiveDate) -> SeedResult<NewUser> {
        let name: String = Name().fake_with_rng(&mut self.rng);
        let email = self.unique_email()?;
        let registration_date = self.date_within(today, REGISTRATION_WINDOW_DAYS);

        Ok(NewUser {
            name,
            email,
            registration_date,
        })
    }

    /// Generate an order for a user picked uniformly from `user_ids`.
    pub fn order(&mut self, user_ids: &[i64], today: NaiveDate) -> SeedResult<NewOrder> {
        let user_id = *user_ids
            .choose(&mut self.rng)
            .ok_or(SeedError::NoUsersAvailable { orders: 1 })?;
        let product = PRODUCT_CATALOG[self.rng.random_range(0..PRODUCT_CATALOG.len())];
        let amount = self.amount();
        let date = self.date_within(today, ORDER_WINDOW_DAYS);

        Ok(NewOrder {
            user_id,
            product: product.to_string(),
            amount,
            date,
        })
    }

    /// Uniform amount in [30.00, 1500.00], rounded to cents.
    pub fn amount(&mut self) -> f64 {
        let raw = self.rng.random_range(MIN_ORDER_AMOUNT..=MAX_ORDER_AMOUNT);
        (raw * 100.0).round() / 100.0
    }

    /// Uniform date in `[today - days, today]`.
    pub fn date_within(&mut self, today: NaiveDate, days: u64) -> NaiveDate {
        let back = self.rng.random_range(0..=days);
        today - Days::new(back)
    }

    fn unique_email(&mut self) -> SeedResult<String> {
        let email: String = FreeEmail().fake_with_rng(&mut self.rng);
        if self.seen_emails.insert(email.clone()) {
            return Ok(email);
        }

        // Repeated draw: number the local part until it is fresh.
        let (local, domain) = email.split_once('@').unwrap_or((email.as_str(), "example.com"));
        for n in 1..=MAX_EMAIL_ATTEMPTS {
            let candidate = format!("{local}{n}@{domain}");
            if self.seen_emails.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(SeedError::EmailsExhausted {
            attempts: MAX_EMAIL_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 19).unwrap()
    }

    #[test]
    fn test_generate_users_have_unique_emails() {
        let mut generator = FakeDataGenerator::from_seed(7);

        let users: Vec<NewUser> = (0..200).map(|_| generator.user(today()).unwrap()).collect();

        let unique: HashSet<_> = users.iter().map(|u| u.email.clone()).collect();
        assert_eq!(unique.len(), 200);
        assert!(users.iter().all(|u| u.email.contains('@')));
        assert!(users.iter().all(|u| !u.name.is_empty()));
    }

    #[test]
    fn test_emails_stay_unique_past_ten_thousand_users() {
        let mut generator = FakeDataGenerator::from_seed(1);

        let emails: HashSet<String> = (0..12_000)
            .map(|_| generator.user(today()).unwrap().email)
            .collect();

        assert_eq!(emails.len(), 12_000);
    }

    #[test]
    fn test_repeated_email_gets_numbered_local_part() {
        let mut a = FakeDataGenerator::from_seed(8);
        let first = a.user(today()).unwrap().email;

        // A second generator with the same seed draws the same address first.
        let mut b = FakeDataGenerator::from_seed(8);
        b.seen_emails.insert(first.clone());
        let second = b.user(today()).unwrap().email;

        let (local, domain) = first.split_once('@').unwrap();
        assert_eq!(second, format!("{local}1@{domain}"));
    }

    #[test]
    fn test_registration_date_within_two_years() {
        let mut generator = FakeDataGenerator::from_seed(1);
        let earliest = today() - Days::new(REGISTRATION_WINDOW_DAYS);

        for _ in 0..100 {
            let user = generator.user(today()).unwrap();
            assert!(user.registration_date <= today());
            assert!(user.registration_date >= earliest);
        }
    }

    #[test]
    fn test_generate_orders() {
        let mut generator = FakeDataGenerator::from_seed(3);
        let user_ids = [4, 8, 15];
        let earliest = today() - Days::new(ORDER_WINDOW_DAYS);

        for _ in 0..200 {
            let order = generator.order(&user_ids, today()).unwrap();
            assert!(user_ids.contains(&order.user_id));
            assert!(PRODUCT_CATALOG.contains(&order.product.as_str()));
            assert!(order.date <= today() && order.date >= earliest);
        }
    }

    #[test]
    fn test_order_without_users_fails() {
        let mut generator = FakeDataGenerator::from_seed(3);

        let result = generator.order(&[], today());

        assert!(matches!(result, Err(SeedError::NoUsersAvailable { .. })));
    }

    #[test]
    fn test_amount_in_range_with_two_decimals() {
        let mut generator = FakeDataGenerator::from_seed(11);

        for _ in 0..1000 {
            let amount = generator.amount();
            assert!((MIN_ORDER_AMOUNT..=MAX_ORDER_AMOUNT).contains(&amount));
            let cents = amount * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6, "{amount} has more than two decimals");
        }
    }

    #[test]
    fn test_same_seed_same_rows() {
        let mut a = FakeDataGenerator::from_seed(42);
        let mut b = FakeDataGenerator::from_seed(42);

        for _ in 0..10 {
            assert_eq!(a.user(today()).unwrap(), b.user(today()).unwrap());
            assert_eq!(
                a.order(&[1, 2, 3], today()).unwrap(),
                b.order(&[1, 2, 3], today()).unwrap()
            );
        }
    }

    #[test]
    fn test_date_within_zero_days_is_today() {
        let mut generator = FakeDataGenerator::from_seed(5);
        assert_eq!(generator.date_within(today(), 0), today());
    }
}
