//! Generic record repository shared by every entity table.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Value,
};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};

use super::query::{build_changes, build_filter, recent_window_start, FieldMap};

/// Per-entity metadata used by [`Records`].
pub trait RecordEntity: EntityTrait {
    /// Fields an update may modify
    const MUTABLE_FIELDS: &'static [&'static str];

    /// Columns matched by the `wildcard` filter key (none by default)
    const SEARCH_FIELDS: &'static [&'static str] = &[];

    /// Row cap for reads
    const SELECT_LIMIT: Option<u64> = None;

    fn id_column() -> Self::Column;

    fn updated_column() -> Self::Column;

    /// Date column used for ordering and the recent-records window
    fn recency_column() -> Self::Column;
}

/// Record repository contract for dependency injection.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Record returned to callers
    type Record: Send;
    /// Creation input
    type NewRecord: Send;

    /// Validate required fields and insert a new row
    async fn insert(&self, new: Self::NewRecord) -> AppResult<Self::Record>;

    /// All rows matching the filter, most recent first
    async fn select(&self, filter: &FieldMap) -> AppResult<Vec<Self::Record>>;

    /// Rows matching the filter whose recency date falls in the trailing window
    async fn select_recent(&self, filter: &FieldMap) -> AppResult<Vec<Self::Record>>;

    /// Apply allow-listed changes and return the updated row
    async fn update(&self, id: Uuid, changes: &FieldMap) -> AppResult<Self::Record>;

    /// Delete a row and return its last state
    async fn delete(&self, id: Uuid) -> AppResult<Self::Record>;
}

/// Table access for one entity over an injected connection pool.
///
/// Each call checks a connection out of the pool and returns it when the
/// query future completes or is dropped.
pub struct Records<E> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> Clone for Records<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<E> Records<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl<E: RecordEntity> Records<E> {
    /// Find one row by id
    pub async fn find(&self, id: Uuid) -> AppResult<Option<E::Model>> {
        let model = E::find()
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await?;
        Ok(model)
    }

    pub async fn select(&self, filter: &FieldMap) -> AppResult<Vec<E::Model>> {
        let condition = build_filter::<E>(filter)?;
        self.query(condition).await
    }

    pub async fn select_recent(&self, filter: &FieldMap) -> AppResult<Vec<E::Model>> {
        let since = recent_window_start(Utc::now());
        let mut condition = Condition::all().add(E::recency_column().gte(since));
        if let Some(filter) = build_filter::<E>(filter)? {
            condition = condition.add(filter);
        }
        self.query(Some(condition)).await
    }

    /// Validate `changes` against the allow-list and apply them
    pub async fn update(&self, id: Uuid, changes: &FieldMap) -> AppResult<E::Model> {
        let assignments = build_changes::<E>(changes)?;
        self.apply(id, assignments).await
    }

    /// Write pre-validated assignments plus `updated_date`, then read the row back
    pub async fn apply(&self, id: Uuid, assignments: Vec<(E::Column, Value)>) -> AppResult<E::Model> {
        let mut update = E::update_many().col_expr(E::updated_column(), Expr::value(Utc::now()));
        for (column, value) in assignments {
            update = update.col_expr(column, Expr::value(value));
        }

        let result = update
            .filter(E::id_column().eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        self.find(id).await?.ok_or_not_found()
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<E::Model> {
        let existing = self.find(id).await?.ok_or_not_found()?;

        E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(&self.db)
            .await?;

        Ok(existing)
    }

    async fn query(&self, condition: Option<Condition>) -> AppResult<Vec<E::Model>> {
        let mut select = E::find();
        if let Some(condition) = condition {
            select = select.filter(condition);
        }
        select = select.order_by_desc(E::recency_column());
        if let Some(limit) = E::SELECT_LIMIT {
            select = select.limit(limit);
        }

        tracing::debug!(table = %E::default().table_name(), "Selecting records");
        let models = select.all(&self.db).await?;
        Ok(models)
    }
}
