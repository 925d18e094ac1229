use sea_orm_migration::prelude::*;

mod m001_create_reference_tables;
mod m002_create_contract_tables;
mod m003_create_recontract_tables;
mod m004_create_ppa_tables;
mod m005_add_project_link_to_supply_points;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_reference_tables::Migration),
            Box::new(m002_create_contract_tables::Migration),
            Box::new(m003_create_recontract_tables::Migration),
            Box::new(m004_create_ppa_tables::Migration),
            Box::new(m005_add_project_link_to_supply_points::Migration),
        ]
    }
}
