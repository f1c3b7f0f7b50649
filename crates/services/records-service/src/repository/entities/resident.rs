//! Resident database entity for SeaORM.
//!
//! Written in the expanded entity format so the table name can be taken
//! from configuration instead of a derive attribute.

use once_cell::sync::OnceCell;
use sea_orm::entity::prelude::*;

use domain::Resident;

/// Table used when no override is configured
pub const DEFAULT_TABLE_NAME: &str = "residents";

static TABLE_NAME: OnceCell<String> = OnceCell::new();

/// Override the resident table name. Only the first call takes effect; returns
/// `false` if a different name was already set.
pub fn set_table_name(name: impl Into<String>) -> bool {
    let name = name.into();
    match TABLE_NAME.set(name.clone()) {
        Ok(()) => true,
        Err(_) => TABLE_NAME.get().map(String::as_str) == Some(name.as_str()),
    }
}

/// Table name currently in effect.
pub fn table_name() -> &'static str {
    TABLE_NAME
        .get()
        .map(String::as_str)
        .unwrap_or(DEFAULT_TABLE_NAME)
}

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        table_name()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel)]
pub struct Model {
    pub id: Uuid,
    pub created_date: DateTimeUtc,
    pub updated_date: DateTimeUtc,
    pub firstname: String,
    pub lastname: String,
    pub room: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    CreatedDate,
    UpdatedDate,
    Firstname,
    Lastname,
    Room,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;

    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ColumnTrait for Column {
    type EntityName = Entity;

    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::CreatedDate | Self::UpdatedDate => ColumnType::TimestampWithTimeZone.def(),
            Self::Firstname | Self::Lastname | Self::Room => ColumnType::Text.def(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Resident {
    fn from(model: Model) -> Self {
        Resident {
            id: model.id,
            created_date: model.created_date,
            updated_date: model.updated_date,
            firstname: model.firstname,
            lastname: model.lastname,
            room: model.room,
        }
    }
}
