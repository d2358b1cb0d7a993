//! Dataset database operations
//!
//! CRUD and paginated listing for datasets and the question rows that
//! live inside them. Dataset names are unique among active datasets;
//! question titles are unique among active questions of the same dataset.

use chrono::NaiveDate;
use tracing::info;

use crate::pagination::{PageRequest, PageResult};
use crate::screens::PagedSource;

use super::enums::{DataCategory, RecordStatus};
use super::error::DbError;
use super::filters::{self, FilterSet};
use super::models::{now_rfc3339, DatasetRecord, QuestionRecord};
use super::Database;

/// Search constraints for the dataset list screen. Enumerated fields take
/// display labels straight from the filter form; `None`, blank, or the
/// `All` label mean "no constraint".
#[derive(Debug, Clone, Default)]
pub struct DatasetFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DatasetFilter {
    fn to_filter_set(&self) -> FilterSet {
        FilterSet::new()
            .contains("name", self.name.as_deref())
            .labeled::<DataCategory>("category", self.category.as_deref())
            .labeled::<RecordStatus>("status", self.status.as_deref())
            .created_between(self.start_date, self.end_date)
    }
}

/// Search constraints for the question list inside one dataset.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub title: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl QuestionFilter {
    fn to_filter_set(&self, dataset_id: &str) -> FilterSet {
        FilterSet::new()
            .scope("dataset_id", dataset_id)
            .contains("title", self.title.as_deref())
            .labeled::<RecordStatus>("status", self.status.as_deref())
            .created_between(self.start_date, self.end_date)
    }
}

/// Extension trait for dataset-related database operations
pub trait DatasetOps {
    // Dataset CRUD
    fn create_dataset(
        &self,
        dataset: &DatasetRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn get_dataset(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<DatasetRecord>, DbError>> + Send;
    fn find_dataset_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<DatasetRecord>, DbError>> + Send;
    fn update_dataset(
        &self,
        dataset: &DatasetRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn delete_dataset(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn list_datasets(
        &self,
        filter: &DatasetFilter,
        request: PageRequest,
    ) -> impl std::future::Future<Output = PageResult<DatasetRecord>> + Send;
    fn export_datasets(
        &self,
        filter: &DatasetFilter,
    ) -> impl std::future::Future<Output = Vec<DatasetRecord>> + Send;

    // Questions
    fn create_question(
        &self,
        question: &QuestionRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn get_question(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<QuestionRecord>, DbError>> + Send;
    fn update_question(
        &self,
        question: &QuestionRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn delete_question(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn list_questions(
        &self,
        dataset_id: &str,
        filter: &QuestionFilter,
        request: PageRequest,
    ) -> impl std::future::Future<Output = PageResult<QuestionRecord>> + Send;
    fn export_questions(
        &self,
        dataset_id: &str,
        filter: &QuestionFilter,
    ) -> impl std::future::Future<Output = Vec<QuestionRecord>> + Send;
}

impl DatasetOps for Database {
    // =========================================================================
    // Dataset Operations
    // =========================================================================

    async fn create_dataset(&self, dataset: &DatasetRecord) -> Result<(), DbError> {
        if dataset.name.trim().is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tx = self.pool().begin().await?;

        if filters::active_name_exists(&mut *tx, "datasets", "name", &dataset.name, None, None)
            .await?
        {
            return Err(DbError::DuplicateName(dataset.name.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO datasets (id, name, category, status, content_size, description,
                created_at, created_by, updated_at, updated_by, del_flag)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dataset.id)
        .bind(&dataset.name)
        .bind(dataset.category)
        .bind(dataset.status)
        .bind(dataset.content_size)
        .bind(&dataset.description)
        .bind(&dataset.created_at)
        .bind(&dataset.created_by)
        .bind(&dataset.updated_at)
        .bind(&dataset.updated_by)
        .bind(dataset.del_flag)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(id = %dataset.id, name = %dataset.name, "Created dataset");
        Ok(())
    }

    async fn get_dataset(&self, id: &str) -> Result<Option<DatasetRecord>, DbError> {
        let dataset = sqlx::query_as::<_, DatasetRecord>(
            "SELECT * FROM datasets WHERE id = ? AND del_flag = 0",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(dataset)
    }

    async fn find_dataset_by_name(&self, name: &str) -> Result<Option<DatasetRecord>, DbError> {
        let dataset = sqlx::query_as::<_, DatasetRecord>(
            "SELECT * FROM datasets WHERE name = ? AND del_flag = 0",
        )
        .bind(name)
        .fetch_optional(self.pool())
        .await?;
        Ok(dataset)
    }

    async fn update_dataset(&self, dataset: &DatasetRecord) -> Result<(), DbError> {
        if dataset.name.trim().is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tx = self.pool().begin().await?;

        if filters::active_name_exists(
            &mut *tx,
            "datasets",
            "name",
            &dataset.name,
            None,
            Some(&dataset.id),
        )
        .await?
        {
            return Err(DbError::DuplicateName(dataset.name.clone()));
        }

        let result = sqlx::query(
            r#"
            UPDATE datasets
            SET name = ?, category = ?, status = ?, description = ?,
                updated_at = ?, updated_by = ?
            WHERE id = ? AND del_flag = 0
            "#,
        )
        .bind(&dataset.name)
        .bind(dataset.category)
        .bind(dataset.status)
        .bind(&dataset.description)
        .bind(now_rfc3339())
        .bind(&dataset.updated_by)
        .bind(&dataset.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(dataset.id.clone()));
        }

        tx.commit().await?;
        info!(id = %dataset.id, "Updated dataset");
        Ok(())
    }

    async fn delete_dataset(&self, id: &str) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE datasets SET del_flag = 1, updated_at = ? WHERE id = ? AND del_flag = 0",
        )
        .bind(now_rfc3339())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        info!(id, "Soft-deleted dataset");
        Ok(())
    }

    async fn list_datasets(
        &self,
        filter: &DatasetFilter,
        request: PageRequest,
    ) -> PageResult<DatasetRecord> {
        filters::fetch_page(self.pool(), "datasets", &filter.to_filter_set(), request).await
    }

    async fn export_datasets(&self, filter: &DatasetFilter) -> Vec<DatasetRecord> {
        filters::fetch_all(self.pool(), "datasets", &filter.to_filter_set()).await
    }

    // =========================================================================
    // Question Operations
    // =========================================================================

    async fn create_question(&self, question: &QuestionRecord) -> Result<(), DbError> {
        if question.title.trim().is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tx = self.pool().begin().await?;

        if filters::active_name_exists(
            &mut *tx,
            "questions",
            "title",
            &question.title,
            Some(("dataset_id", Some(&question.dataset_id))),
            None,
        )
        .await?
        {
            return Err(DbError::DuplicateName(question.title.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO questions (id, dataset_id, title, answer, status, tag,
                created_at, updated_at, del_flag)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&question.id)
        .bind(&question.dataset_id)
        .bind(&question.title)
        .bind(&question.answer)
        .bind(question.status)
        .bind(&question.tag)
        .bind(&question.created_at)
        .bind(&question.updated_at)
        .bind(question.del_flag)
        .execute(&mut *tx)
        .await?;

        // Keep the parent's question count in step. Zero rows affected
        // means the parent is missing or soft-deleted; rolling back keeps
        // the question from becoming an orphan.
        let parent = sqlx::query(
            r#"
            UPDATE datasets SET content_size = content_size + 1, updated_at = ?
            WHERE id = ? AND del_flag = 0
            "#,
        )
        .bind(now_rfc3339())
        .bind(&question.dataset_id)
        .execute(&mut *tx)
        .await?;

        if parent.rows_affected() == 0 {
            return Err(DbError::NotFound(question.dataset_id.clone()));
        }

        tx.commit().await?;
        info!(id = %question.id, dataset_id = %question.dataset_id, "Created question");
        Ok(())
    }

    async fn get_question(&self, id: &str) -> Result<Option<QuestionRecord>, DbError> {
        let question = sqlx::query_as::<_, QuestionRecord>(
            "SELECT * FROM questions WHERE id = ? AND del_flag = 0",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(question)
    }

    async fn update_question(&self, question: &QuestionRecord) -> Result<(), DbError> {
        if question.title.trim().is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tx = self.pool().begin().await?;

        if filters::active_name_exists(
            &mut *tx,
            "questions",
            "title",
            &question.title,
            Some(("dataset_id", Some(&question.dataset_id))),
            Some(&question.id),
        )
        .await?
        {
            return Err(DbError::DuplicateName(question.title.clone()));
        }

        let result = sqlx::query(
            r#"
            UPDATE questions
            SET title = ?, answer = ?, status = ?, tag = ?, updated_at = ?
            WHERE id = ? AND del_flag = 0
            "#,
        )
        .bind(&question.title)
        .bind(&question.answer)
        .bind(question.status)
        .bind(&question.tag)
        .bind(now_rfc3339())
        .bind(&question.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(question.id.clone()));
        }

        tx.commit().await?;
        info!(id = %question.id, "Updated question");
        Ok(())
    }

    async fn delete_question(&self, id: &str) -> Result<(), DbError> {
        let mut tx = self.pool().begin().await?;

        let question = sqlx::query_as::<_, QuestionRecord>(
            "SELECT * FROM questions WHERE id = ? AND del_flag = 0",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        sqlx::query("UPDATE questions SET del_flag = 1, updated_at = ? WHERE id = ?")
            .bind(now_rfc3339())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE datasets SET content_size = MAX(content_size - 1, 0), updated_at = ?
            WHERE id = ? AND del_flag = 0
            "#,
        )
        .bind(now_rfc3339())
        .bind(&question.dataset_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(id, "Soft-deleted question");
        Ok(())
    }

    async fn list_questions(
        &self,
        dataset_id: &str,
        filter: &QuestionFilter,
        request: PageRequest,
    ) -> PageResult<QuestionRecord> {
        filters::fetch_page(
            self.pool(),
            "questions",
            &filter.to_filter_set(dataset_id),
            request,
        )
        .await
    }

    async fn export_questions(
        &self,
        dataset_id: &str,
        filter: &QuestionFilter,
    ) -> Vec<QuestionRecord> {
        filters::fetch_all(self.pool(), "questions", &filter.to_filter_set(dataset_id)).await
    }
}

// ============================================================================
// List-Screen Sources
// ============================================================================

/// Paged source for the dataset list screen.
pub struct DatasetList<'a>(pub &'a Database);

impl PagedSource for DatasetList<'_> {
    type Row = DatasetRecord;
    type Filter = DatasetFilter;

    async fn fetch(&self, filter: &DatasetFilter, request: PageRequest) -> PageResult<DatasetRecord> {
        self.0.list_datasets(filter, request).await
    }
}

/// Paged source for the question list inside one dataset.
pub struct QuestionList<'a> {
    pub db: &'a Database,
    pub dataset_id: String,
}

impl PagedSource for QuestionList<'_> {
    type Row = QuestionRecord;
    type Filter = QuestionFilter;

    async fn fetch(
        &self,
        filter: &QuestionFilter,
        request: PageRequest,
    ) -> PageResult<QuestionRecord> {
        self.db.list_questions(&self.dataset_id, filter, request).await
    }
}
