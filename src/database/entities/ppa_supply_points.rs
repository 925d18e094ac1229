use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A physical delivery point under a bundle. project_id is nullable:
/// legacy rows are bundle-only and stay out of per-project rollups.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ppa_supply_points")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub bundle_id: i32,
    pub project_id: Option<i32>,
    pub name: String,
    pub address: Option<String>,
    pub supply_point_number: Option<String>,
    pub contract_kw: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ppa_bundles::Entity",
        from = "Column::BundleId",
        to = "super::ppa_bundles::Column::Id"
    )]
    Bundle,
    #[sea_orm(
        belongs_to = "super::ppa_projects::Entity",
        from = "Column::ProjectId",
        to = "super::ppa_projects::Column::Id"
    )]
    Project,
}

impl Related<super::ppa_bundles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bundle.def()
    }
}

impl Related<super::ppa_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
