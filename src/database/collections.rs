//! Data-collection database operations
//!
//! CRUD and paginated listing for data collections and their curated
//! entries. Collection names are unique among active collections within
//! the same project; entries are always scoped to one collection.

use chrono::NaiveDate;
use tracing::info;

use crate::pagination::{PageRequest, PageResult};
use crate::screens::PagedSource;

use super::enums::DataCategory;
use super::error::DbError;
use super::filters::{self, FilterSet};
use super::models::{now_rfc3339, CollectionEntryRecord, CollectionRecord};
use super::Database;

/// Search constraints for the collection list screen.
#[derive(Debug, Clone, Default)]
pub struct CollectionFilter {
    pub name: Option<String>,
    pub project: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CollectionFilter {
    fn to_filter_set(&self) -> FilterSet {
        FilterSet::new()
            .contains("name", self.name.as_deref())
            .contains("project", self.project.as_deref())
            .created_between(self.start_date, self.end_date)
    }
}

/// Search constraints for the entry list inside one collection.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub question: Option<String>,
    pub data_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EntryFilter {
    fn to_filter_set(&self, collection_id: &str) -> FilterSet {
        FilterSet::new()
            .scope("collection_id", collection_id)
            .contains("question", self.question.as_deref())
            .labeled::<DataCategory>("data_type", self.data_type.as_deref())
            .created_between(self.start_date, self.end_date)
    }
}

/// Extension trait for collection-related database operations
pub trait CollectionOps {
    // Collection CRUD
    fn create_collection(
        &self,
        collection: &CollectionRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn get_collection(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<CollectionRecord>, DbError>> + Send;
    fn find_collection_id(
        &self,
        name: &str,
        project: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Option<String>, DbError>> + Send;
    fn update_collection(
        &self,
        collection: &CollectionRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn delete_collection(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn list_collections(
        &self,
        filter: &CollectionFilter,
        request: PageRequest,
    ) -> impl std::future::Future<Output = PageResult<CollectionRecord>> + Send;
    fn export_collections(
        &self,
        filter: &CollectionFilter,
    ) -> impl std::future::Future<Output = Vec<CollectionRecord>> + Send;

    // Entries
    fn create_entry(
        &self,
        entry: &CollectionEntryRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn get_entry(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<CollectionEntryRecord>, DbError>> + Send;
    fn update_entry(
        &self,
        entry: &CollectionEntryRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn delete_entry(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn list_entries(
        &self,
        collection_id: &str,
        filter: &EntryFilter,
        request: PageRequest,
    ) -> impl std::future::Future<Output = PageResult<CollectionEntryRecord>> + Send;
    fn export_entries(
        &self,
        collection_id: &str,
        filter: &EntryFilter,
    ) -> impl std::future::Future<Output = Vec<CollectionEntryRecord>> + Send;
}

impl CollectionOps for Database {
    // =========================================================================
    // Collection Operations
    // =========================================================================

    async fn create_collection(&self, collection: &CollectionRecord) -> Result<(), DbError> {
        if collection.name.trim().is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tx = self.pool().begin().await?;

        if filters::active_name_exists(
            &mut *tx,
            "collections",
            "name",
            &collection.name,
            Some(("project", collection.project.as_deref())),
            None,
        )
        .await?
        {
            return Err(DbError::DuplicateName(collection.name.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO collections (id, project, name, created_at, created_by,
                updated_at, updated_by, del_flag)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&collection.id)
        .bind(&collection.project)
        .bind(&collection.name)
        .bind(&collection.created_at)
        .bind(&collection.created_by)
        .bind(&collection.updated_at)
        .bind(&collection.updated_by)
        .bind(collection.del_flag)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(id = %collection.id, name = %collection.name, "Created collection");
        Ok(())
    }

    async fn get_collection(&self, id: &str) -> Result<Option<CollectionRecord>, DbError> {
        let collection = sqlx::query_as::<_, CollectionRecord>(
            "SELECT * FROM collections WHERE id = ? AND del_flag = 0",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(collection)
    }

    async fn find_collection_id(
        &self,
        name: &str,
        project: Option<&str>,
    ) -> Result<Option<String>, DbError> {
        let collection = match project {
            Some(project) => {
                sqlx::query_as::<_, CollectionRecord>(
                    "SELECT * FROM collections WHERE name = ? AND project = ? AND del_flag = 0",
                )
                .bind(name)
                .bind(project)
                .fetch_optional(self.pool())
                .await?
            }
            None => {
                sqlx::query_as::<_, CollectionRecord>(
                    "SELECT * FROM collections WHERE name = ? AND project IS NULL AND del_flag = 0",
                )
                .bind(name)
                .fetch_optional(self.pool())
                .await?
            }
        };
        Ok(collection.map(|c| c.id))
    }

    async fn update_collection(&self, collection: &CollectionRecord) -> Result<(), DbError> {
        if collection.name.trim().is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tx = self.pool().begin().await?;

        if filters::active_name_exists(
            &mut *tx,
            "collections",
            "name",
            &collection.name,
            Some(("project", collection.project.as_deref())),
            Some(&collection.id),
        )
        .await?
        {
            return Err(DbError::DuplicateName(collection.name.clone()));
        }

        let result = sqlx::query(
            r#"
            UPDATE collections
            SET name = ?, project = ?, updated_at = ?, updated_by = ?
            WHERE id = ? AND del_flag = 0
            "#,
        )
        .bind(&collection.name)
        .bind(&collection.project)
        .bind(now_rfc3339())
        .bind(&collection.updated_by)
        .bind(&collection.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(collection.id.clone()));
        }

        tx.commit().await?;
        info!(id = %collection.id, "Updated collection");
        Ok(())
    }

    async fn delete_collection(&self, id: &str) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE collections SET del_flag = 1, updated_at = ? WHERE id = ? AND del_flag = 0",
        )
        .bind(now_rfc3339())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        info!(id, "Soft-deleted collection");
        Ok(())
    }

    async fn list_collections(
        &self,
        filter: &CollectionFilter,
        request: PageRequest,
    ) -> PageResult<CollectionRecord> {
        filters::fetch_page(self.pool(), "collections", &filter.to_filter_set(), request).await
    }

    async fn export_collections(&self, filter: &CollectionFilter) -> Vec<CollectionRecord> {
        filters::fetch_all(self.pool(), "collections", &filter.to_filter_set()).await
    }

    // =========================================================================
    // Entry Operations
    // =========================================================================

    async fn create_entry(&self, entry: &CollectionEntryRecord) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO collection_entries (id, collection_id, data_type, context, question,
                answer, question_type, question_label, created_at, created_by,
                updated_at, updated_by, del_flag)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.collection_id)
        .bind(entry.data_type)
        .bind(&entry.context)
        .bind(&entry.question)
        .bind(&entry.answer)
        .bind(entry.question_type)
        .bind(entry.question_label)
        .bind(&entry.created_at)
        .bind(&entry.created_by)
        .bind(&entry.updated_at)
        .bind(&entry.updated_by)
        .bind(entry.del_flag)
        .execute(self.pool())
        .await?;

        info!(id = %entry.id, collection_id = %entry.collection_id, "Created collection entry");
        Ok(())
    }

    async fn get_entry(&self, id: &str) -> Result<Option<CollectionEntryRecord>, DbError> {
        let entry = sqlx::query_as::<_, CollectionEntryRecord>(
            "SELECT * FROM collection_entries WHERE id = ? AND del_flag = 0",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(entry)
    }

    async fn update_entry(&self, entry: &CollectionEntryRecord) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE collection_entries
            SET data_type = ?, context = ?, question = ?, answer = ?,
                question_type = ?, question_label = ?, updated_at = ?, updated_by = ?
            WHERE id = ? AND del_flag = 0
            "#,
        )
        .bind(entry.data_type)
        .bind(&entry.context)
        .bind(&entry.question)
        .bind(&entry.answer)
        .bind(entry.question_type)
        .bind(entry.question_label)
        .bind(now_rfc3339())
        .bind(&entry.updated_by)
        .bind(&entry.id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(entry.id.clone()));
        }

        info!(id = %entry.id, "Updated collection entry");
        Ok(())
    }

    async fn delete_entry(&self, id: &str) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE collection_entries SET del_flag = 1, updated_at = ? WHERE id = ? AND del_flag = 0",
        )
        .bind(now_rfc3339())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        info!(id, "Soft-deleted collection entry");
        Ok(())
    }

    async fn list_entries(
        &self,
        collection_id: &str,
        filter: &EntryFilter,
        request: PageRequest,
    ) -> PageResult<CollectionEntryRecord> {
        filters::fetch_page(
            self.pool(),
            "collection_entries",
            &filter.to_filter_set(collection_id),
            request,
        )
        .await
    }

    async fn export_entries(
        &self,
        collection_id: &str,
        filter: &EntryFilter,
    ) -> Vec<CollectionEntryRecord> {
        filters::fetch_all(
            self.pool(),
            "collection_entries",
            &filter.to_filter_set(collection_id),
        )
        .await
    }
}

// ============================================================================
// List-Screen Sources
// ============================================================================

/// Paged source for the collection list screen.
pub struct CollectionList<'a>(pub &'a Database);

impl PagedSource for CollectionList<'_> {
    type Row = CollectionRecord;
    type Filter = CollectionFilter;

    async fn fetch(
        &self,
        filter: &CollectionFilter,
        request: PageRequest,
    ) -> PageResult<CollectionRecord> {
        self.0.list_collections(filter, request).await
    }
}

/// Paged source for the entry list inside one collection.
pub struct EntryList<'a> {
    pub db: &'a Database,
    pub collection_id: String,
}

impl PagedSource for EntryList<'_> {
    type Row = CollectionEntryRecord;
    type Filter = EntryFilter;

    async fn fetch(
        &self,
        filter: &EntryFilter,
        request: PageRequest,
    ) -> PageResult<CollectionEntryRecord> {
        self.db
            .list_entries(&self.collection_id, filter, request)
            .await
    }
}
