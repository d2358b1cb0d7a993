//! Model-configuration database operations
//!
//! CRUD and paginated listing for the model configurations used to call
//! models under test and referee models. Config names are unique among
//! active configs.

use chrono::NaiveDate;
use tracing::info;

use crate::pagination::{PageRequest, PageResult};
use crate::screens::PagedSource;

use super::enums::{ConfigType, ModelType};
use super::error::DbError;
use super::filters::{self, FilterSet};
use super::models::{now_rfc3339, ModelConfigRecord};
use super::Database;

/// Search constraints for the model-config list screen.
#[derive(Debug, Clone, Default)]
pub struct ModelConfigFilter {
    pub name: Option<String>,
    pub model_type: Option<String>,
    pub config_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ModelConfigFilter {
    fn to_filter_set(&self) -> FilterSet {
        FilterSet::new()
            .contains("name", self.name.as_deref())
            .labeled::<ModelType>("model_type", self.model_type.as_deref())
            .labeled::<ConfigType>("config_type", self.config_type.as_deref())
            .created_between(self.start_date, self.end_date)
    }
}

/// Extension trait for model-config database operations
pub trait ModelConfigOps {
    fn create_model_config(
        &self,
        config: &ModelConfigRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn get_model_config(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ModelConfigRecord>, DbError>> + Send;
    fn find_model_config_id(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, DbError>> + Send;
    fn update_model_config(
        &self,
        config: &ModelConfigRecord,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn delete_model_config(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
    fn list_model_configs(
        &self,
        filter: &ModelConfigFilter,
        request: PageRequest,
    ) -> impl std::future::Future<Output = PageResult<ModelConfigRecord>> + Send;
    fn export_model_configs(
        &self,
        filter: &ModelConfigFilter,
    ) -> impl std::future::Future<Output = Vec<ModelConfigRecord>> + Send;
}

impl ModelConfigOps for Database {
    async fn create_model_config(&self, config: &ModelConfigRecord) -> Result<(), DbError> {
        if config.name.trim().is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tx = self.pool().begin().await?;

        if filters::active_name_exists(&mut *tx, "model_configs", "name", &config.name, None, None)
            .await?
        {
            return Err(DbError::DuplicateName(config.name.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO model_configs (id, name, model_type, config_type, streaming,
                url, headers, body, response_path, model_file,
                created_at, created_by, updated_at, updated_by, del_flag)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&config.id)
        .bind(&config.name)
        .bind(config.model_type)
        .bind(config.config_type)
        .bind(config.streaming)
        .bind(&config.url)
        .bind(&config.headers)
        .bind(&config.body)
        .bind(&config.response_path)
        .bind(&config.model_file)
        .bind(&config.created_at)
        .bind(&config.created_by)
        .bind(&config.updated_at)
        .bind(&config.updated_by)
        .bind(config.del_flag)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(id = %config.id, name = %config.name, "Created model config");
        Ok(())
    }

    async fn get_model_config(&self, id: &str) -> Result<Option<ModelConfigRecord>, DbError> {
        let config = sqlx::query_as::<_, ModelConfigRecord>(
            "SELECT * FROM model_configs WHERE id = ? AND del_flag = 0",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(config)
    }

    async fn find_model_config_id(&self, name: &str) -> Result<Option<String>, DbError> {
        let config = sqlx::query_as::<_, ModelConfigRecord>(
            "SELECT * FROM model_configs WHERE name = ? AND del_flag = 0",
        )
        .bind(name)
        .fetch_optional(self.pool())
        .await?;
        Ok(config.map(|c| c.id))
    }

    async fn update_model_config(&self, config: &ModelConfigRecord) -> Result<(), DbError> {
        if config.name.trim().is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tx = self.pool().begin().await?;

        if filters::active_name_exists(
            &mut *tx,
            "model_configs",
            "name",
            &config.name,
            None,
            Some(&config.id),
        )
        .await?
        {
            return Err(DbError::DuplicateName(config.name.clone()));
        }

        let result = sqlx::query(
            r#"
            UPDATE model_configs
            SET name = ?, model_type = ?, config_type = ?, streaming = ?,
                url = ?, headers = ?, body = ?, response_path = ?, model_file = ?,
                updated_at = ?, updated_by = ?
            WHERE id = ? AND del_flag = 0
            "#,
        )
        .bind(&config.name)
        .bind(config.model_type)
        .bind(config.config_type)
        .bind(config.streaming)
        .bind(&config.url)
        .bind(&config.headers)
        .bind(&config.body)
        .bind(&config.response_path)
        .bind(&config.model_file)
        .bind(now_rfc3339())
        .bind(&config.updated_by)
        .bind(&config.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(config.id.clone()));
        }

        tx.commit().await?;
        info!(id = %config.id, "Updated model config");
        Ok(())
    }

    async fn delete_model_config(&self, id: &str) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE model_configs SET del_flag = 1, updated_at = ? WHERE id = ? AND del_flag = 0",
        )
        .bind(now_rfc3339())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        info!(id, "Soft-deleted model config");
        Ok(())
    }

    async fn list_model_configs(
        &self,
        filter: &ModelConfigFilter,
        request: PageRequest,
    ) -> PageResult<ModelConfigRecord> {
        filters::fetch_page(self.pool(), "model_configs", &filter.to_filter_set(), request).await
    }

    async fn export_model_configs(&self, filter: &ModelConfigFilter) -> Vec<ModelConfigRecord> {
        filters::fetch_all(self.pool(), "model_configs", &filter.to_filter_set()).await
    }
}

// ============================================================================
// List-Screen Source
// ============================================================================

/// Paged source for the model-config list screen.
pub struct ModelConfigList<'a>(pub &'a Database);

impl PagedSource for ModelConfigList<'_> {
    type Row = ModelConfigRecord;
    type Filter = ModelConfigFilter;

    async fn fetch(
        &self,
        filter: &ModelConfigFilter,
        request: PageRequest,
    ) -> PageResult<ModelConfigRecord> {
        self.0.list_model_configs(filter, request).await
    }
}
