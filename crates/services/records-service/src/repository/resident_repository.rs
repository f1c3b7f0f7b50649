//! Resident repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use common::AppResult;
use domain::{required, CreateResident, Resident, RESIDENT_MUTABLE_FIELDS, RESIDENT_SEARCH_FIELDS};

use super::entities::resident::{self, ActiveModel, Entity as ResidentEntity};
use super::query::FieldMap;
use super::record_repository::{RecordEntity, RecordRepository, Records};

impl RecordEntity for ResidentEntity {
    const MUTABLE_FIELDS: &'static [&'static str] = RESIDENT_MUTABLE_FIELDS;
    const SEARCH_FIELDS: &'static [&'static str] = RESIDENT_SEARCH_FIELDS;

    fn id_column() -> resident::Column {
        resident::Column::Id
    }

    fn updated_column() -> resident::Column {
        resident::Column::UpdatedDate
    }

    fn recency_column() -> resident::Column {
        resident::Column::CreatedDate
    }
}

/// Resident table access
#[derive(Clone)]
pub struct ResidentStore {
    records: Records<ResidentEntity>,
}

impl ResidentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            records: Records::new(db),
        }
    }
}

#[async_trait]
impl RecordRepository for ResidentStore {
    type Record = Resident;
    type NewRecord = CreateResident;

    async fn insert(&self, new: CreateResident) -> AppResult<Resident> {
        let firstname = required(new.firstname, "firstname")?;
        let lastname = required(new.lastname, "lastname")?;
        let room = required(new.room, "room")?;

        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            created_date: Set(now),
            updated_date: Set(now),
            firstname: Set(firstname),
            lastname: Set(lastname),
            room: Set(room),
        };

        let model = active_model.insert(self.records.db()).await?;
        tracing::info!(id = %model.id, "Resident created");
        Ok(Resident::from(model))
    }

    async fn select(&self, filter: &FieldMap) -> AppResult<Vec<Resident>> {
        let models = self.records.select(filter).await?;
        Ok(models.into_iter().map(Resident::from).collect())
    }

    async fn select_recent(&self, filter: &FieldMap) -> AppResult<Vec<Resident>> {
        let models = self.records.select_recent(filter).await?;
        Ok(models.into_iter().map(Resident::from).collect())
    }

    async fn update(&self, id: Uuid, changes: &FieldMap) -> AppResult<Resident> {
        let model = self.records.update(id, changes).await?;
        Ok(Resident::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Resident> {
        let model = self.records.delete(id).await?;
        tracing::info!(%id, "Resident deleted");
        Ok(Resident::from(model))
    }
}
