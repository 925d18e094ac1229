use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{OfferStatus, QuoteStatus, VoltageLevel};

/// A grouped PPA quotation request (まとめ番号), one list row on the
/// dashboard. Owns capacity projects and supply points.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ppa_bundles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub agency_id: Option<i32>,
    pub plan_id: i32,
    pub voltage: VoltageLevel,
    pub area: String,
    pub prev_supplier_plan: Option<String>,
    pub contract_start_date: Option<Date>,
    pub quote_valid_days: Option<i32>,
    pub requested_at: Option<Date>,
    pub request_due_date: Option<Date>,
    pub quote_status: QuoteStatus,
    pub offer_status: OfferStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
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
        belongs_to = "super::agencies::Entity",
        from = "Column::AgencyId",
        to = "super::agencies::Column::Id"
    )]
    Agency,
    #[sea_orm(
        belongs_to = "super::plans::Entity",
        from = "Column::PlanId",
        to = "super::plans::Column::Id"
    )]
    Plan,
    #[sea_orm(has_many = "super::ppa_projects::Entity")]
    Projects,
    #[sea_orm(has_many = "super::ppa_supply_points::Entity")]
    SupplyPoints,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::agencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agency.def()
    }
}

impl Related<super::plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl Related<super::ppa_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::ppa_supply_points::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplyPoints.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
