//! Test Fixtures
//!
//! Provides shared test helpers for creating test databases and seeded
//! records. Creation timestamps are settable so listing order and date
//! filters are deterministic.

use tempfile::TempDir;

use crate::database::{
    CollectionOps, CollectionRecord, DataCategory, Database, DatasetOps, DatasetRecord,
    ModelConfigOps, ModelConfigRecord, QuestionRecord,
};

// =============================================================================
// Database Fixtures
// =============================================================================

/// Create a test database in a temporary directory.
/// Returns both the database and the TempDir (which must be kept alive).
pub async fn create_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db = Database::new(temp_dir.path())
        .await
        .expect("Failed to create test database");
    (db, temp_dir)
}

// =============================================================================
// Record Fixtures
// =============================================================================

/// Deterministic RFC 3339 timestamp for seeded rows: day and hour offsets
/// from a fixed March 2026 base, UTC.
pub fn stamp(day: u32, hour: u32) -> String {
    format!("2026-03-{day:02}T{hour:02}:00:00+00:00")
}

/// Insert a dataset with an explicit creation timestamp.
pub async fn seed_dataset(db: &Database, name: &str, created_at: &str) -> DatasetRecord {
    let mut dataset = DatasetRecord::new(name, DataCategory::Text);
    dataset.created_at = created_at.to_string();
    dataset.updated_at = created_at.to_string();
    db.create_dataset(&dataset)
        .await
        .expect("Failed to create dataset");
    dataset
}

/// Insert a question with an explicit creation timestamp.
pub async fn seed_question(
    db: &Database,
    dataset_id: &str,
    title: &str,
    created_at: &str,
) -> QuestionRecord {
    let mut question = QuestionRecord::new(dataset_id, title, "42");
    question.created_at = created_at.to_string();
    question.updated_at = created_at.to_string();
    db.create_question(&question)
        .await
        .expect("Failed to create question");
    question
}

/// Insert a collection with an explicit creation timestamp.
pub async fn seed_collection(
    db: &Database,
    name: &str,
    project: Option<&str>,
    created_at: &str,
) -> CollectionRecord {
    let mut collection = CollectionRecord::new(name, project.map(str::to_string));
    collection.created_at = created_at.to_string();
    collection.updated_at = created_at.to_string();
    db.create_collection(&collection)
        .await
        .expect("Failed to create collection");
    collection
}

/// Insert a model config with an explicit creation timestamp.
pub async fn seed_model_config(db: &Database, name: &str, created_at: &str) -> ModelConfigRecord {
    let mut config = ModelConfigRecord::new(name);
    config.created_at = created_at.to_string();
    config.updated_at = created_at.to_string();
    db.create_model_config(&config)
        .await
        .expect("Failed to create model config");
    config
}
