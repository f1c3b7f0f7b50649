//! Service database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Service;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_date: DateTimeUtc,
    pub updated_date: DateTimeUtc,
    pub service_code: String,
    pub service_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Service {
    fn from(model: Model) -> Self {
        Service {
            id: model.id,
            created_date: model.created_date,
            updated_date: model.updated_date,
            service_code: model.service_code,
            service_name: model.service_name,
        }
    }
}
