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
                    .table(RecontractEstimates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecontractEstimates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RecontractEstimates::CustomerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecontractEstimates::PlanId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecontractEstimates::DesiredQuoteDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecontractEstimates::QuoteEffectiveDays)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecontractEstimates::Remarks).string_len(500))
                    .col(
                        ColumnDef::new(RecontractEstimates::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recontract_estimates-customer_id")
                            .from(RecontractEstimates::Table, RecontractEstimates::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recontract_estimates-plan_id")
                            .from(RecontractEstimates::Table, RecontractEstimates::PlanId)
                            .to(Plans::Table, Plans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-recontract_estimates-customer_id")
                    .table(RecontractEstimates::Table)
                    .col(RecontractEstimates::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecontractSupplyPoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecontractSupplyPoints::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RecontractSupplyPoints::EstimateId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecontractSupplyPoints::SupplyPointNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recontract_supply_points-estimate_id")
                            .from(
                                RecontractSupplyPoints::Table,
                                RecontractSupplyPoints::EstimateId,
                            )
                            .to(RecontractEstimates::Table, RecontractEstimates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-recontract_supply_points-estimate_id")
                    .table(RecontractSupplyPoints::Table)
                    .col(RecontractSupplyPoints::EstimateId)
                    .to_owned(),
            )
            .await?;

        // the same point cannot appear twice in one estimate
        manager
            .create_index(
                Index::create()
                    .name("uq-recontract_supply_points-estimate_id-spn")
                    .table(RecontractSupplyPoints::Table)
                    .col(RecontractSupplyPoints::EstimateId)
                    .col(RecontractSupplyPoints::SupplyPointNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecontractPlants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecontractPlants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RecontractPlants::EstimateId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecontractPlants::CapacityMw)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecontractPlants::PpaUnitPriceYenPerKwh).double())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recontract_plants-estimate_id")
                            .from(RecontractPlants::Table, RecontractPlants::EstimateId)
                            .to(RecontractEstimates::Table, RecontractEstimates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-recontract_plants-estimate_id")
                    .table(RecontractPlants::Table)
                    .col(RecontractPlants::EstimateId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecontractPlants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecontractSupplyPoints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecontractEstimates::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum RecontractEstimates {
    Table,
    Id,
    CustomerId,
    PlanId,
    DesiredQuoteDate,
    QuoteEffectiveDays,
    Remarks,
    CreatedAt,
}

#[derive(Iden)]
enum RecontractSupplyPoints {
    Table,
    Id,
    EstimateId,
    SupplyPointNumber,
}

#[derive(Iden)]
enum RecontractPlants {
    Table,
    Id,
    EstimateId,
    CapacityMw,
    PpaUnitPriceYenPerKwh,
}
