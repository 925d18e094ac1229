use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::ContractStatus;

/// An active supply agreement. (supply_point_number, end_date) is unique so
/// the same physical connection point cannot carry two overlapping periods.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub plan_id: i32,
    pub supply_point_number: String,
    pub start_date: Date,
    pub end_date: Date,
    pub negotiated_power_kw: Option<f64>,
    pub status: ContractStatus,
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
    #[sea_orm(has_many = "super::ancillary_contracts::Entity")]
    AncillaryContracts,
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

impl Related<super::ancillary_contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AncillaryContracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
