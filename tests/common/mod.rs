#![allow(dead_code)]

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A database file with the users and orders tables, removed on drop.
pub struct TestDatabase {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("seed_test.db");

        let pool = Self::pool_at(&path, true).await;
        sqlx::query(
            r#"
            CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                registration_date TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("Failed to create users table");

        sqlx::query(
            r#"
            CREATE TABLE orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                product TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("Failed to create orders table");
        pool.close().await;

        Self { _dir: dir, path }
    }

    pub async fn pool(&self) -> SqlitePool {
        Self::pool_at(&self.path, false).await
    }

    async fn pool_at(path: &Path, create: bool) -> SqlitePool {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create);
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to connect to database")
    }

    pub async fn user_ids(&self) -> Vec<i64> {
        let pool = self.pool().await;
        let ids = sqlx::query("SELECT id FROM users ORDER BY id")
            .fetch_all(&pool)
            .await
            .expect("Failed to read users")
            .iter()
            .map(|r| r.get("id"))
            .collect();
        pool.close().await;
        ids
    }

    pub async fn emails(&self) -> Vec<String> {
        let pool = self.pool().await;
        let emails = sqlx::query("SELECT email FROM users")
            .fetch_all(&pool)
            .await
            .expect("Failed to read emails")
            .iter()
            .map(|r| r.get("email"))
            .collect();
        pool.close().await;
        emails
    }

    /// (user_id, product, amount) for every order.
    pub async fn orders(&self) -> Vec<(i64, String, f64)> {
        let pool = self.pool().await;
        let orders = sqlx::query("SELECT user_id, product, amount FROM orders ORDER BY id")
            .fetch_all(&pool)
            .await
            .expect("Failed to read orders")
            .iter()
            .map(|r| (r.get("user_id"), r.get("product"), r.get("amount")))
            .collect();
        pool.close().await;
        orders
    }
}
