//! Transaction repository.
//!
//! Transactions are the high-volume table: reads are ordered by `trans_date`
//! and capped at [`TRANSACTION_SELECT_LIMIT`] rows.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use common::AppResult;
use domain::{
    required, required_value, CreateTransaction, Transaction, TRANSACTION_MUTABLE_FIELDS,
    TRANSACTION_SELECT_LIMIT,
};

use super::entities::transaction::{self, ActiveModel, Entity as TransactionEntity};
use super::query::FieldMap;
use super::record_repository::{RecordEntity, RecordRepository, Records};

impl RecordEntity for TransactionEntity {
    const MUTABLE_FIELDS: &'static [&'static str] = TRANSACTION_MUTABLE_FIELDS;
    const SELECT_LIMIT: Option<u64> = Some(TRANSACTION_SELECT_LIMIT);

    fn id_column() -> transaction::Column {
        transaction::Column::Id
    }

    fn updated_column() -> transaction::Column {
        transaction::Column::UpdatedDate
    }

    fn recency_column() -> transaction::Column {
        transaction::Column::TransDate
    }
}

/// Transaction table access
#[derive(Clone)]
pub struct TransactionStore {
    records: Records<TransactionEntity>,
}

impl TransactionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            records: Records::new(db),
        }
    }
}

#[async_trait]
impl RecordRepository for TransactionStore {
    type Record = Transaction;
    type NewRecord = CreateTransaction;

    async fn insert(&self, new: CreateTransaction) -> AppResult<Transaction> {
        let service_code = required(new.service_code, "service_code")?;
        let username = required(new.username, "username")?;
        let trans_date = required_value(new.trans_date, "trans_date")?;
        let resident_id = required_value(new.resident_id, "resident_id")?;

        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            created_date: Set(now),
            updated_date: Set(now),
            service_code: Set(service_code),
            username: Set(username),
            trans_date: Set(trans_date),
            resident_id: Set(resident_id),
        };

        let model = active_model.insert(self.records.db()).await?;
        tracing::debug!(id = %model.id, resident_id = %model.resident_id, "Transaction recorded");
        Ok(Transaction::from(model))
    }

    async fn select(&self, filter: &FieldMap) -> AppResult<Vec<Transaction>> {
        let models = self.records.select(filter).await?;
        Ok(models.into_iter().map(Transaction::from).collect())
    }

    async fn select_recent(&self, filter: &FieldMap) -> AppResult<Vec<Transaction>> {
        let models = self.records.select_recent(filter).await?;
        Ok(models.into_iter().map(Transaction::from).collect())
    }

    async fn update(&self, id: Uuid, changes: &FieldMap) -> AppResult<Transaction> {
        let model = self.records.update(id, changes).await?;
        Ok(Transaction::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Transaction> {
        let model = self.records.delete(id).await?;
        Ok(Transaction::from(model))
    }
}
