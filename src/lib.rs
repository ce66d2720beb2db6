//! SQLite Seeder
//!
//! Fills an existing SQLite database with fake users and orders inside a
//! single unit of work, committing once at the end.

pub mod config;
pub mod error;
pub mod executor;
pub mod generator;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod seeder;
pub mod transaction_aware;
pub mod unit_of_work;

pub use crate::config::SeedConfig;
pub use error::{SeedError, SeedResult};
pub use executor::Executor;
pub use generator::FakeDataGenerator;
pub use models::{NewOrder, NewUser, Order, SeedReport, User, PRODUCT_CATALOG};
pub use repositories::{OrderRepository, UserRepository};
pub use seeder::{populate_database, Seeder};
pub use transaction_aware::TransactionAware;
pub use unit_of_work::{SqliteUnitOfWork, SqliteUnitOfWorkSession, UnitOfWork, UnitOfWorkSession};
