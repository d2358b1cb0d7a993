//! Entity Records
//!
//! Database records for datasets, questions, collections, collection
//! entries, and model configurations. Ids are UUID v4 strings; timestamps
//! are RFC 3339 UTC strings, which sort and compare lexicographically.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::enums::{
    ConfigType, DataCategory, DeleteFlag, ModelType, QuestionLabel, QuestionType, RecordStatus,
};

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ============================================================================
// Dataset Record
// ============================================================================

/// Dataset database record. Name is unique among active datasets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DatasetRecord {
    pub id: String,
    pub name: String,
    pub category: DataCategory,
    pub status: RecordStatus,
    /// Number of active questions, maintained by question create/delete.
    pub content_size: i64,
    pub description: Option<String>,
    pub created_at: String,
    pub created_by: Option<String>,
    pub updated_at: String,
    pub updated_by: Option<String>,
    pub del_flag: DeleteFlag,
}

impl DatasetRecord {
    pub fn new(name: impl Into<String>, category: DataCategory) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            name: name.into(),
            category,
            status: RecordStatus::Enabled,
            content_size: 0,
            description: None,
            created_at: now.clone(),
            created_by: None,
            updated_at: now,
            updated_by: None,
            del_flag: DeleteFlag::Active,
        }
    }
}

// ============================================================================
// Question Record
// ============================================================================

/// A question/answer row inside a dataset. Title is unique among active
/// questions of the same dataset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionRecord {
    pub id: String,
    pub dataset_id: String,
    pub title: String,
    pub answer: String,
    pub status: RecordStatus,
    pub tag: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub del_flag: DeleteFlag,
}

impl QuestionRecord {
    pub fn new(
        dataset_id: impl Into<String>,
        title: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            dataset_id: dataset_id.into(),
            title: title.into(),
            answer: answer.into(),
            status: RecordStatus::Enabled,
            tag: None,
            created_at: now.clone(),
            updated_at: now,
            del_flag: DeleteFlag::Active,
        }
    }
}

// ============================================================================
// Collection Record
// ============================================================================

/// Data-collection database record. Name is unique among active
/// collections of the same project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CollectionRecord {
    pub id: String,
    pub project: Option<String>,
    pub name: String,
    pub created_at: String,
    pub created_by: Option<String>,
    pub updated_at: String,
    pub updated_by: Option<String>,
    pub del_flag: DeleteFlag,
}

impl CollectionRecord {
    pub fn new(name: impl Into<String>, project: Option<String>) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            project,
            name: name.into(),
            created_at: now.clone(),
            created_by: None,
            updated_at: now,
            updated_by: None,
            del_flag: DeleteFlag::Active,
        }
    }
}

// ============================================================================
// Collection Entry Record
// ============================================================================

/// One curated question inside a data collection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CollectionEntryRecord {
    pub id: String,
    pub collection_id: String,
    pub data_type: Option<DataCategory>,
    pub context: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub question_type: Option<QuestionType>,
    pub question_label: Option<QuestionLabel>,
    pub created_at: String,
    pub created_by: Option<String>,
    pub updated_at: String,
    pub updated_by: Option<String>,
    pub del_flag: DeleteFlag,
}

impl CollectionEntryRecord {
    pub fn new(collection_id: impl Into<String>) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            collection_id: collection_id.into(),
            data_type: None,
            context: None,
            question: None,
            answer: None,
            question_type: None,
            question_label: None,
            created_at: now.clone(),
            created_by: None,
            updated_at: now,
            updated_by: None,
            del_flag: DeleteFlag::Active,
        }
    }
}

// ============================================================================
// Model Config Record
// ============================================================================

/// Model configuration record. Name is unique among active configs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ModelConfigRecord {
    pub id: String,
    pub name: String,
    pub model_type: Option<ModelType>,
    pub config_type: Option<ConfigType>,
    pub streaming: bool,
    pub url: Option<String>,
    pub headers: Option<String>,       // JSON
    pub body: Option<String>,          // JSON
    pub response_path: Option<String>,
    pub model_file: Option<String>,
    pub created_at: String,
    pub created_by: Option<String>,
    pub updated_at: String,
    pub updated_by: Option<String>,
    pub del_flag: DeleteFlag,
}

impl ModelConfigRecord {
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            name: name.into(),
            model_type: None,
            config_type: None,
            streaming: false,
            url: None,
            headers: None,
            body: None,
            response_path: None,
            model_file: None,
            created_at: now.clone(),
            created_by: None,
            updated_at: now,
            updated_by: None,
            del_flag: DeleteFlag::Active,
        }
    }
}
