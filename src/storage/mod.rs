pub mod meals;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::meal::Meal;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("no meals found")]
    NotFound,
}

/// Persistence the bot needs for its commands.
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Persist a new meal and return its id
    async fn create(&self, meal: &Meal) -> Result<i64>;

    /// Pick one saved meal at random, or fail with [`StoreError::NotFound`].
    async fn get_random(&self) -> Result<Meal>;
}

/// Thread-safe SQLite store for submitted meals
#[derive(Clone)]
pub struct SqliteMealStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMealStore {
    /// Open or create the SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        // journal_mode PRAGMA always returns the resulting mode, so use query_row
        let _: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;

        // Migrate before wrapping in the async Mutex
        Self::run_migrations(&conn)?;

        info!("Meal store initialized at: {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS meals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                photo_url TEXT NOT NULL,
                instructions TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_meals_name ON meals(name);
            CREATE INDEX IF NOT EXISTS idx_meals_created_at ON meals(created_at);
            ",
        )
        .context("Failed to run meal store migrations")?;

        Ok(())
    }
}
