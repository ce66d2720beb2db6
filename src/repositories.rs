use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::Row;
use std::sync::Arc;
use tracing::debug;

use crate::models::{NewOrder, NewUser, Order, User};
use crate::{Executor, SeedError, SeedResult, TransactionAware};

/// Inserts counted while the transaction is open, and the total that survived a commit.
#[derive(Debug, Default)]
struct InsertTally {
    pending: RwLock<usize>,
    committed: RwLock<usize>,
}

impl InsertTally {
    fn record(&self) {
        *self.pending.write() += 1;
    }

    fn commit(&self) {
        let pending = std::mem::take(&mut *self.pending.write());
        *self.committed.write() += pending;
    }

    fn discard(&self) {
        *self.pending.write() = 0;
    }

    fn committed(&self) -> usize {
        *self.committed.read()
    }
}

/// Transaction-aware User Repository
pub struct UserRepository {
    executor: Executor,
    tally: InsertTally,
}

impl UserRepository {
    pub fn new(executor: Executor) -> Arc<Self> {
        Arc::new(Self {
            executor,
            tally: InsertTally::default(),
        })
    }

    /// Insert a user and return the id SQLite assigned to it.
    pub async fn insert(&self, user: &NewUser) -> SeedResult<i64> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(SeedError::TransactionClosed)?;
        let result = sqlx::query(
            "INSERT INTO users (name, email, registration_date) VALUES (?, ?, ?)",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.registration_date)
        .execute(&mut **tx)
        .await?;

        let id = result.last_insert_rowid();
        self.tally.record();
        debug!(id, email = %user.email, "inserted user");
        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> SeedResult<Option<User>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(SeedError::TransactionClosed)?;
        let row = sqlx::query("SELECT id, name, email, registration_date FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            name: r.get("name"),
            email: r.get("email"),
            registration_date: r.get("registration_date"),
        }))
    }

    pub async fn count(&self) -> SeedResult<i64> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(SeedError::TransactionClosed)?;
        let row = sqlx::query("SELECT COUNT(*) as count FROM users")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.get("count"))
    }

    /// Users inserted by this repository that have been committed.
    pub fn committed_inserts(&self) -> usize {
        self.tally.committed()
    }
}

#[async_trait]
impl TransactionAware for UserRepository {
    async fn on_commit(&self) -> SeedResult<()> {
        self.tally.commit();
        Ok(())
    }

    async fn on_rollback(&self) -> SeedResult<()> {
        self.tally.discard();
        Ok(())
    }
}

/// Transaction-aware Order Repository
pub struct OrderRepository {
    executor: Executor,
    tally: InsertTally,
}

impl OrderRepository {
    pub fn new(executor: Executor) -> Arc<Self> {
        Arc::new(Self {
            executor,
            tally: InsertTally::default(),
        })
    }

    pub async fn insert(&self, order: &NewOrder) -> SeedResult<i64> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(SeedError::TransactionClosed)?;
        let result = sqlx::query(
            "INSERT INTO orders (user_id, product, amount, date) VALUES (?, ?, ?, ?)",
        )
        .bind(order.user_id)
        .bind(&order.product)
        .bind(order.amount)
        .bind(order.date)
        .execute(&mut **tx)
        .await?;

        let id = result.last_insert_rowid();
        self.tally.record();
        debug!(id, user_id = order.user_id, product = %order.product, "inserted order");
        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> SeedResult<Option<Order>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(SeedError::TransactionClosed)?;
        let row = sqlx::query("SELECT id, user_id, product, amount, date FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|r| Order {
            id: r.get("id"),
            user_id: r.get("user_id"),
            product: r.get("product"),
            amount: r.get("amount"),
            date: r.get("date"),
        }))
    }

    pub async fn count(&self) -> SeedResult<i64> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(SeedError::TransactionClosed)?;
        let row = sqlx::query("SELECT COUNT(*) as count FROM orders")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.get("count"))
    }

    /// Orders inserted by this repository that have been committed.
    pub fn committed_inserts(&self) -> usize {
        self.tally.committed()
    }
}

#[async_trait]
impl TransactionAware for OrderRepository {
    async fn on_commit(&self) -> SeedResult<()> {
        self.tally.commit();
        Ok(())
    }

    async fn on_rollback(&self) -> SeedResult<()> {
        self.tally.discard();
        Ok(())
    }
}
