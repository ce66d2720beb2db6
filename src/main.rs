//! seed-db
//!
//! Fill a SQLite database with fake users and orders. With no arguments it
//! seeds `mi_base.db` with 100 users and 100 orders.

use clap::Parser;
use sqlite_seeder::{logging, SeedConfig, Seeder};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seed-db")]
#[command(version, about = "Seed a SQLite database with fake users and orders")]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long)]
    db: Option<PathBuf>,

    /// Number of users to insert
    #[arg(short, long)]
    users: Option<usize>,

    /// Number of orders to insert
    #[arg(short, long)]
    orders: Option<usize>,

    /// RNG seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with db_path, users, orders and seed
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<SeedConfig> {
        let mut config = SeedConfig::load(self.config.as_deref())?;
        if let Some(db) = self.db {
            config.db_path = db;
        }
        if let Some(users) = self.users {
            config.users = users;
        }
        if let Some(orders) = self.orders {
            config.orders = orders;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let config = cli.into_config()?;
    let db_path = config.db_path.clone();
    let report = Seeder::new(config).run().await?;

    println!(
        "Inserted {} users and {} orders into '{}'.",
        report.users_inserted,
        report.orders_inserted,
        db_path.display()
    );
    Ok(())
}
