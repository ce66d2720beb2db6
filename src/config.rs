//! Seeding configuration
//!
//! Defaults, optionally overridden by a TOML file. The CLI applies its own
//! flags on top of whatever this returns.

use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::SeedResult;

pub const DEFAULT_DB_PATH: &str = "mi_base.db";
pub const DEFAULT_USERS: usize = 100;
pub const DEFAULT_ORDERS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// SQLite database file; must already exist with the users and orders tables.
    pub db_path: PathBuf,
    pub users: usize,
    pub orders: usize,
    /// RNG seed for reproducible data. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            users: DEFAULT_USERS,
            orders: DEFAULT_ORDERS,
            seed: None,
        }
    }
}

impl SeedConfig {
    /// Load the configuration, layering `file` (if given) over the defaults.
    ///
    /// A named file that does not exist is an error.
    pub fn load(file: Option<&Path>) -> SeedResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }
        Ok(builder.build()?.try_deserialize()?)
    }
}
