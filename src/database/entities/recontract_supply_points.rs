use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recontract_supply_points")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub estimate_id: i32,
    pub supply_point_number: String,
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
