use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One capacity scenario (案件番号) under a bundle.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ppa_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub bundle_id: i32,
    pub capacity_mw: f64,
    pub ppa_unit_price_yen_per_kwh: Option<f64>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ppa_bundles::Entity",
        from = "Column::BundleId",
        to = "super::ppa_bundles::Column::Id"
    )]
    Bundle,
    #[sea_orm(has_many = "super::ppa_supply_points::Entity")]
    SupplyPoints,
}

impl Related<super::ppa_bundles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bundle.def()
    }
}

impl Related<super::ppa_supply_points::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplyPoints.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
