use sea_orm_migration::prelude::*;

use super::m001_create_reference_tables::{Agencies, Customers, Plans};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PpaBundles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PpaBundles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PpaBundles::CustomerId).integer().not_null())
                    .col(ColumnDef::new(PpaBundles::AgencyId).integer())
                    .col(ColumnDef::new(PpaBundles::PlanId).integer().not_null())
                    .col(
                        ColumnDef::new(PpaBundles::Voltage)
                            .string_len(16)
                            .not_null()
                            .default("HIGH"),
                    )
                    .col(ColumnDef::new(PpaBundles::Area).string_len(32).not_null())
                    .col(ColumnDef::new(PpaBundles::PrevSupplierPlan).string_len(120))
                    .col(ColumnDef::new(PpaBundles::ContractStartDate).date())
                    .col(ColumnDef::new(PpaBundles::QuoteValidDays).integer())
                    .col(ColumnDef::new(PpaBundles::RequestedAt).date())
                    .col(ColumnDef::new(PpaBundles::RequestDueDate).date())
                    .col(
                        ColumnDef::new(PpaBundles::QuoteStatus)
                            .string_len(16)
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(
                        ColumnDef::new(PpaBundles::OfferStatus)
                            .string_len(16)
                            .not_null()
                            .default("NONE"),
                    )
                    .col(ColumnDef::new(PpaBundles::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(PpaBundles::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ppa_bundles-customer_id")
                            .from(PpaBundles::Table, PpaBundles::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ppa_bundles-agency_id")
                            .from(PpaBundles::Table, PpaBundles::AgencyId)
                            .to(Agencies::Table, Agencies::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ppa_bundles-plan_id")
                            .from(PpaBundles::Table, PpaBundles::PlanId)
                            .to(Plans::Table, Plans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ppa_bundles-customer_id")
                    .table(PpaBundles::Table)
                    .col(PpaBundles::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ppa_bundles-agency_id")
                    .table(PpaBundles::Table)
                    .col(PpaBundles::AgencyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ppa_bundles-area")
                    .table(PpaBundles::Table)
                    .col(PpaBundles::Area)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PpaProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PpaProjects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PpaProjects::BundleId).integer().not_null())
                    .col(ColumnDef::new(PpaProjects::CapacityMw).double().not_null())
                    .col(ColumnDef::new(PpaProjects::PpaUnitPriceYenPerKwh).double())
                    .col(ColumnDef::new(PpaProjects::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ppa_projects-bundle_id")
                            .from(PpaProjects::Table, PpaProjects::BundleId)
                            .to(PpaBundles::Table, PpaBundles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ppa_projects-bundle_id")
                    .table(PpaProjects::Table)
                    .col(PpaProjects::BundleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PpaSupplyPoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PpaSupplyPoints::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PpaSupplyPoints::BundleId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PpaSupplyPoints::Name).string_len(200).not_null())
                    .col(ColumnDef::new(PpaSupplyPoints::Address).string_len(300))
                    .col(ColumnDef::new(PpaSupplyPoints::SupplyPointNumber).string_len(64))
                    .col(
                        ColumnDef::new(PpaSupplyPoints::ContractKw)
                            .double()
                            .default(0.0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ppa_supply_points-bundle_id")
                            .from(PpaSupplyPoints::Table, PpaSupplyPoints::BundleId)
                            .to(PpaBundles::Table, PpaBundles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ppa_supply_points-bundle_id")
                    .table(PpaSupplyPoints::Table)
                    .col(PpaSupplyPoints::BundleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ppa_supply_points-spn")
                    .table(PpaSupplyPoints::Table)
                    .col(PpaSupplyPoints::SupplyPointNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PpaSupplyPoints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PpaProjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PpaBundles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum PpaBundles {
    Table,
    Id,
    CustomerId,
    AgencyId,
    PlanId,
    Voltage,
    Area,
    PrevSupplierPlan,
    ContractStartDate,
    QuoteValidDays,
    RequestedAt,
    RequestDueDate,
    QuoteStatus,
    OfferStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum PpaProjects {
    Table,
    Id,
    BundleId,
    CapacityMw,
    PpaUnitPriceYenPerKwh,
    CreatedAt,
}

#[derive(Iden)]
pub enum PpaSupplyPoints {
    Table,
    Id,
    BundleId,
    Name,
    Address,
    SupplyPointNumber,
    ContractKw,
}
