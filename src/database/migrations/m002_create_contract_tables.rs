use sea_orm_migration::prelude::*;

use super::m001_create_reference_tables::{Customers, Plans};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Contracts::PlanId).integer().not_null())
                    .col(
                        ColumnDef::new(Contracts::SupplyPointNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::StartDate).date().not_null())
                    .col(ColumnDef::new(Contracts::EndDate).date().not_null())
                    .col(ColumnDef::new(Contracts::NegotiatedPowerKw).double())
                    .col(
                        ColumnDef::new(Contracts::Status)
                            .string_len(32)
                            .not_null()
                            .default("UNDER_CONTRACT"),
                    )
                    .col(ColumnDef::new(Contracts::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-contracts-customer_id")
                            .from(Contracts::Table, Contracts::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-contracts-plan_id")
                            .from(Contracts::Table, Contracts::PlanId)
                            .to(Plans::Table, Plans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One contract period per physical connection point
        manager
            .create_index(
                Index::create()
                    .name("uq-contracts-spn-end_date")
                    .table(Contracts::Table)
                    .col(Contracts::SupplyPointNumber)
                    .col(Contracts::EndDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-contracts-customer_id")
                    .table(Contracts::Table)
                    .col(Contracts::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-contracts-supply_point_number")
                    .table(Contracts::Table)
                    .col(Contracts::SupplyPointNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AncillaryContracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AncillaryContracts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AncillaryContracts::ContractId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AncillaryContracts::Type)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AncillaryContracts::UnitPrice).double())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ancillary_contracts-contract_id")
                            .from(AncillaryContracts::Table, AncillaryContracts::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ancillary_contracts-contract_id")
                    .table(AncillaryContracts::Table)
                    .col(AncillaryContracts::ContractId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AncillaryContracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
pub enum Contracts {
    Table,
    Id,
    CustomerId,
    PlanId,
    SupplyPointNumber,
    StartDate,
    EndDate,
    NegotiatedPowerKw,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum AncillaryContracts {
    Table,
    Id,
    ContractId,
    Type,
    UnitPrice,
}
