use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One capacity scenario under an estimate. A 0.0 MW row is always created
/// implicitly next to the user-supplied scenarios.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recontract_plants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub estimate_id: i32,
    pub capacity_mw: f64,
    pub ppa_unit_price_yen_per_kwh: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recontract_estimates::Entity",
        from = "Column::EstimateId",
        to = "super::recontract_estimates::Column::Id"
    )]
    Estimate,
}

impl Related<super::recontract_estimates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Estimate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
