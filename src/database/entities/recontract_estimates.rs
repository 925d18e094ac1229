use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::QuoteEffectiveDays;

/// Header record for a re-contract estimate request. Owns 1..20 supply
/// points and the capacity scenarios (implicit 0.0 row plus up to 3).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recontract_estimates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub plan_id: i32,
    pub desired_quote_date: Date,
    pub quote_effective_days: QuoteEffectiveDays,
    pub remarks: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::plans::Entity",
        from = "Column::PlanId",
        to = "super::plans::Column::Id"
    )]
    Plan,
    #[sea_orm(has_many = "super::recontract_supply_points::Entity")]
    SupplyPoints,
    #[sea_orm(has_many = "super::recontract_plants::Entity")]
    Plants,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl Related<super::recontract_supply_points::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplyPoints.def()
    }
}

impl Related<super::recontract_plants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
