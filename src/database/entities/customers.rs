use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// End customer, optionally owned by an agency.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub agency_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::agencies::Entity",
        from = "Column::AgencyId",
        to = "super::agencies::Column::Id"
    )]
    Agency,
    #[sea_orm(has_many = "super::contracts::Entity")]
    Contracts,
    #[sea_orm(has_many = "super::recontract_estimates::Entity")]
    RecontractEstimates,
    #[sea_orm(has_many = "super::ppa_bundles::Entity")]
    PpaBundles,
}

impl Related<super::agencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agency.def()
    }
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl Related<super::recontract_estimates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecontractEstimates.def()
    }
}

impl Related<super::ppa_bundles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PpaBundles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
