use async_trait::async_trait;

use crate::SeedResult;

/// Trait for components that need to be notified of transaction lifecycle events.
///
/// Repositories register themselves with a `UnitOfWorkSession` so their
/// insert tallies only count rows that actually reached the database.
#[async_trait]
pub trait TransactionAware: Send + Sync {
    /// Called after a successful transaction commit.
    async fn on_commit(&self) -> SeedResult<()>;

    /// Called after a transaction rollback.
    ///
    /// Implementations should discard anything recorded while the
    /// transaction was open.
    async fn on_rollback(&self) -> SeedResult<()>;
}
