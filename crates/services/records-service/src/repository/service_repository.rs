//! Service catalogue repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use common::AppResult;
use domain::{required, CreateService, Service, SERVICE_MUTABLE_FIELDS};

use super::entities::service::{self, ActiveModel, Entity as ServiceEntity};
use super::query::FieldMap;
use super::record_repository::{RecordEntity, RecordRepository, Records};

impl RecordEntity for ServiceEntity {
    const MUTABLE_FIELDS: &'static [&'static str] = SERVICE_MUTABLE_FIELDS;

    fn id_column() -> service::Column {
        service::Column::Id
    }

    fn updated_column() -> service::Column {
        service::Column::UpdatedDate
    }

    fn recency_column() -> service::Column {
        service::Column::CreatedDate
    }
}

/// Service table access
#[derive(Clone)]
pub struct ServiceStore {
    records: Records<ServiceEntity>,
}

impl ServiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            records: Records::new(db),
        }
    }
}

#[async_trait]
impl RecordRepository for ServiceStore {
    type Record = Service;
    type NewRecord = CreateService;

    async fn insert(&self, new: CreateService) -> AppResult<Service> {
        let service_code = required(new.service_code, "service_code")?;
        let service_name = required(new.service_name, "service_name")?;

        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            created_date: Set(now),
            updated_date: Set(now),
            service_code: Set(service_code),
            service_name: Set(service_name),
        };

        let model = active_model.insert(self.records.db()).await?;
        Ok(Service::from(model))
    }

    async fn select(&self, filter: &FieldMap) -> AppResult<Vec<Service>> {
        let models = self.records.select(filter).await?;
        Ok(models.into_iter().map(Service::from).collect())
    }

    async fn select_recent(&self, filter: &FieldMap) -> AppResult<Vec<Service>> {
        let models = self.records.select_recent(filter).await?;
        Ok(models.into_iter().map(Service::from).collect())
    }

    async fn update(&self, id: Uuid, changes: &FieldMap) -> AppResult<Service> {
        let model = self.records.update(id, changes).await?;
        Ok(Service::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Service> {
        let model = self.records.delete(id).await?;
        Ok(Service::from(model))
    }
}
