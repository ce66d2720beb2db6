use chrono::{Local, NaiveDate};
use rand::Rng;
use std::path::Path;
use tracing::{info, warn};

use crate::config::SeedConfig;
use crate::generator::FakeDataGenerator;
use crate::models::SeedReport;
use crate::repositories::{OrderRepository, UserRepository};
use crate::unit_of_work::{SqliteUnitOfWork, UnitOfWork, UnitOfWorkSession};
use crate::{SeedError, SeedResult};

/// Insert `num_users` fake users and `num_orders` fake orders into the SQLite
/// database at `db_path`, committing once at the end.
///
/// ```no_run
/// # async fn run() -> sqlite_seeder::SeedResult<()> {
/// let report = sqlite_seeder::populate_database("mi_base.db", 100, 100).await?;
/// assert_eq!(report.users_inserted, 100);
/// # Ok(())
/// # }
/// ```
pub async fn populate_database(
    db_path: impl AsRef<Path>,
    num_users: usize,
    num_orders: usize,
) -> SeedResult<SeedReport> {
    let config = SeedConfig {
        db_path: db_path.as_ref().to_path_buf(),
        users: num_users,
        orders: num_orders,
        seed: None,
    };
    Seeder::new(config).run().await
}

/// Configurable seeding run.
pub struct Seeder {
    config: SeedConfig,
}

impl Seeder {
    pub fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Open the database, seed it, and close it again.
    ///
    /// Orders without users fail before the database is opened.
    pub async fn run(&self) -> SeedResult<SeedReport> {
        self.check_counts()?;

        let uow = SqliteUnitOfWork::connect(&self.config.db_path).await?;
        let today = Local::now().date_naive();
        let result = match self.config.seed {
            Some(seed) => self.seed(&uow, FakeDataGenerator::from_seed(seed), today).await,
            None => self.seed(&uow, FakeDataGenerator::from_entropy(), today).await,
        };
        uow.close().await;
        result
    }

    /// Seed through an already opened unit of work with the given generator.
    pub async fn seed<U, R>(
        &self,
        uow: &U,
        mut generator: FakeDataGenerator<R>,
        today: NaiveDate,
    ) -> SeedResult<SeedReport>
    where
        U: UnitOfWork,
        R: Rng,
    {
        info!(
            db = %self.config.db_path.display(),
            users = self.config.users,
            orders = self.config.orders,
            "seeding database"
        );

        self.check_counts()?;
        let session = uow.begin().await?;
        let users = UserRepository::new(session.executor().clone());
        let orders = OrderRepository::new(session.executor().clone());
        session.register_transaction_aware(users.clone());
        session.register_transaction_aware(orders.clone());

        if let Err(e) = self.insert_rows(&users, &orders, &mut generator, today).await {
            warn!(error = %e, "seeding failed, rolling back");
            if let Err(rollback_err) = session.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            return Err(e);
        }
        session.commit().await?;

        let report = SeedReport {
            users_inserted: users.committed_inserts(),
            orders_inserted: orders.committed_inserts(),
        };
        info!(
            users = report.users_inserted,
            orders = report.orders_inserted,
            "seeding committed"
        );
        Ok(report)
    }

    async fn insert_rows<R: Rng>(
        &self,
        users: &UserRepository,
        orders: &OrderRepository,
        generator: &mut FakeDataGenerator<R>,
        today: NaiveDate,
    ) -> SeedResult<()> {
        let mut user_ids = Vec::new();
        for _ in 0..self.config.users {
            let user = generator.user(today)?;
            user_ids.push(users.insert(&user).await?);
        }

        for _ in 0..self.config.orders {
            let order = generator.order(&user_ids, today)?;
            orders.insert(&order).await?;
        }
        Ok(())
    }

    fn check_counts(&self) -> SeedResult<()> {
        if self.config.users == 0 && self.config.orders > 0 {
            return Err(SeedError::NoUsersAvailable {
                orders: self.config.orders,
            });
        }
        Ok(())
    }
}
