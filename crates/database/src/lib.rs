//! SQLite persistence for chat interactions and feedback.
//!
//! This crate provides async database operations for the interaction log -
//! one row per chat turn, later annotated with user feedback - using SQLx
//! with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{interaction, models::Interaction, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:data/feedback.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Log a chat turn
//!     let record = Interaction {
//!         id: "c27fb365-0c84-4cf2-8555-814bb065e448".to_string(),
//!         user_id: "anonymous".to_string(),
//!         session_id: "session_1c9f3ab02d4e".to_string(),
//!         message_id: "msg_5f2e8d901b7c".to_string(),
//!         created_at: "2026-08-07T12:00:00Z".to_string(),
//!         question: "What is ownership?".to_string(),
//!         response: "Ownership is...".to_string(),
//!         provider_used: Some("gemini".to_string()),
//!         tokens_used: Some(120),
//!         feedback_type: None,
//!         feedback_comment: None,
//!         feedback_at: None,
//!     };
//!     interaction::create_interaction(db.pool(), &record).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod export;
pub mod interaction;
pub mod models;

pub use error::{DatabaseError, Result};
pub use models::{FeedbackType, Interaction};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// Set high enough to handle concurrent chat requests.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/feedback.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
