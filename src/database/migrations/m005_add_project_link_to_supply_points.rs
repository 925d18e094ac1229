use sea_orm_migration::prelude::*;

use super::m004_create_ppa_tables::PpaSupplyPoints;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Supply points originally linked only to their bundle; the per-project
/// breakdown needs an optional link to a project. Legacy rows keep NULL and
/// stay out of per-project rollups.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(PpaSupplyPoints::Table)
                    .add_column(ColumnDef::new(SupplyPointLink::ProjectId).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ppa_supply_points-project_id")
                    .table(PpaSupplyPoints::Table)
                    .col(SupplyPointLink::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-ppa_supply_points-project_id")
                    .table(PpaSupplyPoints::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(PpaSupplyPoints::Table)
                    .drop_column(SupplyPointLink::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum SupplyPointLink {
    ProjectId,
}
