/// Error type for seeding operations
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Transaction already committed or rolled back")]
    TransactionClosed,

    #[error("Cannot insert {orders} orders: no users available to reference")]
    NoUsersAvailable { orders: usize },

    #[error("Could not generate a unique email after {attempts} attempts")]
    EmailsExhausted { attempts: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for seeding operations
pub type SeedResult<T> = Result<T, SeedError>;
