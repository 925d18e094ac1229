//! Re-contract estimate creation: validate foreign keys up front, insert the
//! header and its children inside one transaction, flip matching contracts
//! to RECONTRACT_ESTIMATE, then reload the persisted rows for the response.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::database::entities::enums::{ContractStatus, QuoteEffectiveDays};
use crate::database::entities::{
    contracts, customers, plans, recontract_estimates, recontract_plants,
    recontract_supply_points,
};
use crate::services::ServiceError;

#[derive(Debug, Clone)]
pub struct NewPlant {
    pub capacity_mw: f64,
    pub ppa_unit_price_yen_per_kwh: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewEstimate {
    pub plan_id: i32,
    pub customer_id: i32,
    pub desired_quote_date: chrono::NaiveDate,
    pub quote_effective_days: i32,
    pub remarks: Option<String>,
    /// 1..=20 supply point numbers.
    pub supply_points: Vec<String>,
    /// 0..=3 user capacity scenarios; a 0.0 MW scenario is added implicitly.
    pub plants: Vec<NewPlant>,
}

#[derive(Debug)]
pub struct EstimateWithChildren {
    pub estimate: recontract_estimates::Model,
    pub supply_points: Vec<recontract_supply_points::Model>,
    pub plants: Vec<recontract_plants::Model>,
}

pub struct RecontractService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RecontractService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewEstimate) -> Result<EstimateWithChildren, ServiceError> {
        // Resolve FKs first so bad input fails as 400, not as a driver error.
        if plans::Entity::find_by_id(input.plan_id)
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::Validation(format!(
                "Invalid plan_id: {}",
                input.plan_id
            )));
        }
        if customers::Entity::find_by_id(input.customer_id)
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::Validation(format!(
                "Invalid customer_id: {}",
                input.customer_id
            )));
        }

        let effective_days = QuoteEffectiveDays::try_from_value(&input.quote_effective_days)
            .map_err(|_| {
                ServiceError::Validation("quote_effective_days must be 30 or 60".to_string())
            })?;

        let txn = self.db.begin().await?;

        let estimate = recontract_estimates::ActiveModel {
            id: ActiveValue::NotSet,
            plan_id: Set(input.plan_id),
            customer_id: Set(input.customer_id),
            desired_quote_date: Set(input.desired_quote_date),
            quote_effective_days: Set(effective_days),
            remarks: Set(input.remarks.clone()),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await
        .map_err(ServiceError::from_write_error)?;

        for spn in &input.supply_points {
            recontract_supply_points::ActiveModel {
                id: ActiveValue::NotSet,
                estimate_id: Set(estimate.id),
                supply_point_number: Set(spn.clone()),
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::from_write_error)?;
        }

        // Implicit 0.0 MW scenario, then the user-supplied ones.
        recontract_plants::ActiveModel {
            id: ActiveValue::NotSet,
            estimate_id: Set(estimate.id),
            capacity_mw: Set(0.0),
            ppa_unit_price_yen_per_kwh: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(ServiceError::from_write_error)?;

        for plant in &input.plants {
            recontract_plants::ActiveModel {
                id: ActiveValue::NotSet,
                estimate_id: Set(estimate.id),
                capacity_mw: Set(plant.capacity_mw),
                ppa_unit_price_yen_per_kwh: Set(plant.ppa_unit_price_yen_per_kwh),
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::from_write_error)?;
        }

        // Any contract still UNDER_CONTRACT on one of these supply points
        // moves to RECONTRACT_ESTIMATE; zero, one or many rows in one pass.
        if !input.supply_points.is_empty() {
            let result = contracts::Entity::update_many()
                .col_expr(
                    contracts::Column::Status,
                    Expr::value(ContractStatus::RecontractEstimate),
                )
                .filter(contracts::Column::SupplyPointNumber.is_in(input.supply_points.clone()))
                .filter(contracts::Column::Status.eq(ContractStatus::UnderContract))
                .exec(&txn)
                .await
                .map_err(ServiceError::from_write_error)?;
            info!(
                rows = result.rows_affected,
                estimate_id = estimate.id,
                "transitioned contracts to RECONTRACT_ESTIMATE"
            );
        }

        txn.commit().await.map_err(ServiceError::from_write_error)?;

        // Reload with children so the response never exposes rows that did
        // not survive the commit.
        self.get(estimate.id).await
    }

    pub async fn get(&self, estimate_id: i32) -> Result<EstimateWithChildren, ServiceError> {
        let estimate = recontract_estimates::Entity::find_by_id(estimate_id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Estimate not found".to_string()))?;

        let supply_points = recontract_supply_points::Entity::find()
            .filter(recontract_supply_points::Column::EstimateId.eq(estimate_id))
            .order_by_asc(recontract_supply_points::Column::Id)
            .all(self.db)
            .await?;

        let plants = recontract_plants::Entity::find()
            .filter(recontract_plants::Column::EstimateId.eq(estimate_id))
            .order_by_asc(recontract_plants::Column::Id)
            .all(self.db)
            .await?;

        Ok(EstimateWithChildren {
            estimate,
            supply_points,
            plants,
        })
    }
}
