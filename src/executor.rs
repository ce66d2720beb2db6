use sqlx::{Sqlite, Transaction};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::{SeedError, SeedResult};

/// Executor wraps the seeding transaction for use by repositories.
///
/// Every repository writing during a run holds a clone, so users and orders
/// land in the same SQLite transaction and become visible together on commit.
#[derive(Clone)]
pub struct Executor {
    tx: Arc<Mutex<Option<Transaction<'static, Sqlite>>>>,
}

impl Executor {
    /// Creates a new Executor from a SQLite transaction.
    pub fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Locks the transaction for a single statement.
    ///
    /// The guard holds `None` once the session has committed or rolled back.
    pub async fn lock(&self) -> MutexGuard<'_, Option<Transaction<'static, Sqlite>>> {
        self.tx.lock().await
    }

    /// Takes ownership of the transaction, leaving None in its place.
    /// This should only be called when committing or rolling back.
    pub(crate) async fn take_transaction(&self) -> SeedResult<Transaction<'static, Sqlite>> {
        self.tx.lock().await.take().ok_or(SeedError::TransactionClosed)
    }
}
