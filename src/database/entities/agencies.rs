use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sales intermediary reference data.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "agencies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub number: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::customers::Entity")]
    Customers,
    #[sea_orm(has_many = "super::ppa_bundles::Entity")]
    PpaBundles,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::ppa_bundles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PpaBundles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
