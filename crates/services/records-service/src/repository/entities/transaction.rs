//! Transaction database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Transaction;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_date: DateTimeUtc,
    pub updated_date: DateTimeUtc,
    pub service_code: String,
    pub username: String,
    pub trans_date: DateTimeUtc,
    pub resident_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Transaction {
            id: model.id,
            created_date: model.created_date,
            updated_date: model.updated_date,
            service_code: model.service_code,
            username: model.username,
            trans_date: model.trans_date,
            resident_id: model.resident_id,
        }
    }
}
