//! Filtered, Paginated Queries
//!
//! One implementation of the list-screen query contract shared by every
//! entity: build a predicate conjunction over active rows, count, clamp
//! the requested page, fetch the slice newest-first. Storage failures are
//! logged and degrade to an empty result — a list refresh never errors.

use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use tracing::{error, warn};

use crate::pagination::{self, PageRequest, PageResult};

use super::enums::Labeled;

/// A single filter condition. Columns are compile-time constants supplied
/// by the entity ops modules; only values are bound.
#[derive(Debug, Clone)]
enum Predicate {
    /// Case-insensitive substring match.
    Contains(&'static str, String),
    /// Exact match on a dictionary code.
    Code(&'static str, i64),
    /// Exact match on a text column (parent-scope ids).
    Text(&'static str, String),
    /// Text column is NULL (unset parent scope).
    Null(&'static str),
    /// `created_at >=` start of day.
    Since(String),
    /// `created_at <=` last instant of day.
    Until(String),
}

/// The set of optional constraints a list screen supplies. Every query
/// additionally requires the soft-delete flag to be active; that part is
/// not optional and lives in the shared SQL, not here.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substring filter; blank input means no constraint.
    pub fn contains(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.predicates.push(Predicate::Contains(column, v.to_string()));
        }
        self
    }

    /// Dictionary filter from a display label. The `All` sentinel means no
    /// constraint; an unrecognized label is ignored with a warning and the
    /// query proceeds as if the filter were absent.
    pub fn labeled<E: Labeled>(mut self, column: &'static str, label: Option<&str>) -> Self {
        let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
            return self;
        };
        if label == E::ALL {
            return self;
        }
        match E::from_label(label) {
            Some(variant) => self.predicates.push(Predicate::Code(column, variant.code())),
            None => warn!(column, label, "Ignoring unrecognized filter label"),
        }
        self
    }

    /// Constrain to a parent scope (e.g. a dataset or collection id).
    pub fn scope(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate::Text(column, value.into()));
        self
    }

    /// Constrain to a nullable parent scope, matching NULL when unset.
    pub fn scope_opt(mut self, column: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.predicates.push(Predicate::Text(column, v.to_string())),
            None => self.predicates.push(Predicate::Null(column)),
        }
        self
    }

    /// Inclusive calendar-day bounds on the creation timestamp. Either
    /// bound may be supplied without the other.
    pub fn created_between(
        mut self,
        start: Option<chrono::NaiveDate>,
        end: Option<chrono::NaiveDate>,
    ) -> Self {
        if let Some(d) = start {
            self.predicates.push(Predicate::Since(format!("{d}T00:00:00+00:00")));
        }
        if let Some(d) = end {
            self.predicates
                .push(Predicate::Until(format!("{d}T23:59:59.999999999+00:00")));
        }
        self
    }

    fn apply(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for predicate in &self.predicates {
            match predicate {
                Predicate::Contains(col, value) => {
                    qb.push(" AND ").push(*col).push(" LIKE ");
                    qb.push_bind(format!("%{value}%"));
                }
                Predicate::Code(col, code) => {
                    qb.push(" AND ").push(*col).push(" = ");
                    qb.push_bind(*code);
                }
                Predicate::Text(col, value) => {
                    qb.push(" AND ").push(*col).push(" = ");
                    qb.push_bind(value.clone());
                }
                Predicate::Null(col) => {
                    qb.push(" AND ").push(*col).push(" IS NULL");
                }
                Predicate::Since(bound) => {
                    qb.push(" AND created_at >= ");
                    qb.push_bind(bound.clone());
                }
                Predicate::Until(bound) => {
                    qb.push(" AND created_at <= ");
                    qb.push_bind(bound.clone());
                }
            }
        }
    }
}

// ============================================================================
// Shared Query Helpers
// ============================================================================

/// Fetch one page of active rows matching `filter`, newest-created first.
///
/// Never fails: any storage error is logged and the empty fallback
/// (`[], 0, 1 page`) is returned so the screen degrades to "no data".
pub(crate) async fn fetch_page<T>(
    pool: &SqlitePool,
    table: &'static str,
    filter: &FilterSet,
    request: PageRequest,
) -> PageResult<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    match try_fetch_page(pool, table, filter, request).await {
        Ok(result) => result,
        Err(e) => {
            error!(table, error = %e, "Paginated query failed; returning empty result");
            PageResult::empty()
        }
    }
}

async fn try_fetch_page<T>(
    pool: &SqlitePool,
    table: &'static str,
    filter: &FilterSet,
    request: PageRequest,
) -> Result<PageResult<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM ");
    count.push(table).push(" WHERE del_flag = 0");
    filter.apply(&mut count);
    let total_items: i64 = count.build_query_scalar().fetch_one(pool).await?;
    let total_items = total_items.max(0) as u64;

    let total_pages = pagination::total_pages(total_items, request.per_page);
    let page = pagination::clamp_page(request.page, total_pages);
    let offset = pagination::page_offset(page, request.per_page);

    let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM ");
    select.push(table).push(" WHERE del_flag = 0");
    filter.apply(&mut select);
    select.push(" ORDER BY created_at DESC LIMIT ");
    select.push_bind(i64::from(request.per_page));
    select.push(" OFFSET ");
    select.push_bind(offset as i64);
    let rows = select.build_query_as::<T>().fetch_all(pool).await?;

    Ok(PageResult {
        rows,
        total_items,
        total_pages,
        page,
    })
}

/// Fetch all active rows matching `filter`, newest-created first (export
/// path). Degrades to an empty list on storage failure, like the paged
/// variant.
pub(crate) async fn fetch_all<T>(
    pool: &SqlitePool,
    table: &'static str,
    filter: &FilterSet,
) -> Vec<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM ");
    select.push(table).push(" WHERE del_flag = 0");
    filter.apply(&mut select);
    select.push(" ORDER BY created_at DESC");
    match select.build_query_as::<T>().fetch_all(pool).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(table, error = %e, "Export query failed; returning no rows");
            Vec::new()
        }
    }
}

/// Uniqueness pre-check: is `name` already used by an active row in the
/// given scope, other than `exclude_id`? Runs on the caller's executor so
/// mutations can keep check and write in one transaction.
pub(crate) async fn active_name_exists<'e, E>(
    executor: E,
    table: &'static str,
    name_column: &'static str,
    name: &str,
    scope: Option<(&'static str, Option<&str>)>,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM ");
    qb.push(table).push(" WHERE del_flag = 0 AND ");
    qb.push(name_column).push(" = ");
    qb.push_bind(name.to_string());
    if let Some((column, value)) = scope {
        match value {
            Some(v) => {
                qb.push(" AND ").push(column).push(" = ");
                qb.push_bind(v.to_string());
            }
            None => {
                qb.push(" AND ").push(column).push(" IS NULL");
            }
        }
    }
    if let Some(id) = exclude_id {
        qb.push(" AND id <> ");
        qb.push_bind(id.to_string());
    }
    qb.push(" LIMIT 1");

    Ok(qb.build().fetch_optional(executor).await?.is_some())
}
