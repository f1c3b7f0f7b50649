//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Credentials, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_date: DateTimeUtc,
    pub updated_date: DateTimeUtc,
    /// Login name
    #[sea_orm(unique)]
    pub user_id: String,
    /// Argon2 PHC hash
    pub password: String,
    pub salt: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: String,
    pub sortname: String,
    pub role: String,
    pub token: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            created_date: model.created_date,
            updated_date: model.updated_date,
            user_id: model.user_id,
            password: model.password,
            salt: model.salt,
            firstname: model.firstname,
            middlename: model.middlename,
            lastname: model.lastname,
            sortname: model.sortname,
            role: model.role,
            token: model.token,
        }
    }
}

impl From<Model> for Credentials {
    fn from(model: Model) -> Self {
        Credentials {
            id: model.id,
            user_id: model.user_id,
            role: model.role,
            password: model.password,
            salt: model.salt,
        }
    }
}
