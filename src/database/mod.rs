//! SQLite Database Module
//!
//! Structured storage for datasets, questions, data collections,
//! collection entries, and model configurations. The pooled handle is
//! injected by construction — components never reach for a global
//! session.

mod migrations;

pub mod collections;
pub mod datasets;
pub mod enums;
pub mod error;
pub mod filters;
pub mod model_configs;
pub mod models;

pub use collections::CollectionOps;
pub use datasets::DatasetOps;
pub use enums::{
    ConfigType, DataCategory, DeleteFlag, Labeled, ModelType, QuestionLabel, QuestionType,
    RecordStatus,
};
pub use error::DbError;
pub use filters::FilterSet;
pub use migrations::run_migrations;
pub use model_configs::ModelConfigOps;
pub use models::{
    CollectionEntryRecord, CollectionRecord, DatasetRecord, ModelConfigRecord, QuestionRecord,
};

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Open (creating if missing) the database under `data_dir` and run
    /// pending migrations.
    pub async fn new(data_dir: &std::path::Path) -> Result<Self, sqlx::Error> {
        Self::with_pool_size(data_dir, 5).await
    }

    /// Open with an explicit pool size (from configuration).
    pub async fn with_pool_size(
        data_dir: &std::path::Path,
        max_connections: u32,
    ) -> Result<Self, sqlx::Error> {
        let db_path = data_dir.join("evalset.db");

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", db_path.display()))?
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .min_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool, path: db_path };

        migrations::run_migrations(&db.pool).await?;

        Ok(db)
    }

    /// Get the underlying pool for direct queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
