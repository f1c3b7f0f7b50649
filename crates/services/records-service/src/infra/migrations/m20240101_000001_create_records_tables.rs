//! Migration: residents, services and transactions tables.

use sea_orm_migration::prelude::*;

use crate::repository::entities::resident;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new(resident::table_name()))
                    .if_not_exists()
                    .col(ColumnDef::new(Residents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Residents::CreatedDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Residents::UpdatedDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Residents::Firstname).string().not_null())
                    .col(ColumnDef::new(Residents::Lastname).string().not_null())
                    .col(ColumnDef::new(Residents::Room).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Services::CreatedDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Services::UpdatedDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Services::ServiceCode).string().not_null())
                    .col(ColumnDef::new(Services::ServiceName).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Transactions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Transactions::CreatedDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Transactions::UpdatedDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Transactions::ServiceCode).string().not_null())
                    .col(ColumnDef::new(Transactions::Username).string().not_null())
                    .col(ColumnDef::new(Transactions::TransDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Transactions::ResidentId).uuid().not_null())
                    .to_owned(),
            )
            .await?;

        // Recent-transaction reads filter and sort on trans_date
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_trans_date")
                    .table(Transactions::Table)
                    .col(Transactions::TransDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new(resident::table_name())).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Residents {
    Id,
    CreatedDate,
    UpdatedDate,
    Firstname,
    Lastname,
    Room,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
    CreatedDate,
    UpdatedDate,
    ServiceCode,
    ServiceName,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    CreatedDate,
    UpdatedDate,
    ServiceCode,
    Username,
    TransDate,
    ResidentId,
}
