use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::recontract_service::{
    EstimateWithChildren, NewEstimate, NewPlant, RecontractService,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplyPointIn {
    pub supply_point_number: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlantIn {
    pub capacity_mw: f64,
    pub ppa_unit_price_yen_per_kwh: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecontractEstimateIn {
    pub plan_id: i32,
    pub customer_id: i32,
    pub desired_quote_date: NaiveDate,
    pub quote_effective_days: i32,
    pub remarks: Option<String>,
    pub supply_points: Vec<SupplyPointIn>,
    #[serde(default)]
    pub plants: Vec<PlantIn>,
}

impl RecontractEstimateIn {
    /// Structural checks that need no database round trip. FK and enum
    /// resolution happen in the service.
    fn validate(&self) -> Result<(), ApiError> {
        if self.supply_points.is_empty() || self.supply_points.len() > 20 {
            return Err(ApiError::BadRequest(
                "supply_points must contain between 1 and 20 entries".to_string(),
            ));
        }
        for sp in &self.supply_points {
            let len = sp.supply_point_number.chars().count();
            if len < 1 || len > 64 {
                return Err(ApiError::BadRequest(
                    "supply_point_number must be between 1 and 64 characters".to_string(),
                ));
            }
        }
        if self.plants.len() > 3 {
            return Err(ApiError::BadRequest(
                "plants must contain at most 3 entries".to_string(),
            ));
        }
        for plant in &self.plants {
            if plant.capacity_mw < 0.0 {
                return Err(ApiError::BadRequest(
                    "capacity_mw must be >= 0".to_string(),
                ));
            }
            if matches!(plant.ppa_unit_price_yen_per_kwh, Some(price) if price < 0.0) {
                return Err(ApiError::BadRequest(
                    "ppa_unit_price_yen_per_kwh must be >= 0".to_string(),
                ));
            }
        }
        if let Some(remarks) = &self.remarks {
            if remarks.chars().count() > 500 {
                return Err(ApiError::BadRequest(
                    "remarks must be at most 500 characters".to_string(),
                ));
            }
        }
        let today = Utc::now().date_naive();
        if self.desired_quote_date < today || self.desired_quote_date > today + Duration::days(31)
        {
            return Err(ApiError::BadRequest(
                "desired_quote_date must be between today and +31 days".to_string(),
            ));
        }
        Ok(())
    }

    fn into_new_estimate(self) -> NewEstimate {
        NewEstimate {
            plan_id: self.plan_id,
            customer_id: self.customer_id,
            desired_quote_date: self.desired_quote_date,
            quote_effective_days: self.quote_effective_days,
            remarks: self.remarks,
            supply_points: self
                .supply_points
                .into_iter()
                .map(|sp| sp.supply_point_number)
                .collect(),
            plants: self
                .plants
                .into_iter()
                .map(|p| NewPlant {
                    // capacities are quoted in 0.1 MW steps
                    capacity_mw: (p.capacity_mw * 10.0).round() / 10.0,
                    ppa_unit_price_yen_per_kwh: p.ppa_unit_price_yen_per_kwh,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplyPointOut {
    pub id: i32,
    pub supply_point_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlantOut {
    pub id: i32,
    pub capacity_mw: f64,
    pub ppa_unit_price_yen_per_kwh: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecontractEstimateOut {
    pub id: i32,
    pub plan_id: i32,
    pub customer_id: i32,
    pub desired_quote_date: NaiveDate,
    pub quote_effective_days: i32,
    pub remarks: Option<String>,
    pub supply_points: Vec<SupplyPointOut>,
    pub plants: Vec<PlantOut>,
}

impl From<EstimateWithChildren> for RecontractEstimateOut {
    fn from(value: EstimateWithChildren) -> Self {
        RecontractEstimateOut {
            id: value.estimate.id,
            plan_id: value.estimate.plan_id,
            customer_id: value.estimate.customer_id,
            desired_quote_date: value.estimate.desired_quote_date,
            quote_effective_days: value.estimate.quote_effective_days.to_value(),
            remarks: value.estimate.remarks,
            supply_points: value
                .supply_points
                .into_iter()
                .map(|sp| SupplyPointOut {
                    id: sp.id,
                    supply_point_number: sp.supply_point_number,
                })
                .collect(),
            plants: value
                .plants
                .into_iter()
                .map(|p| PlantOut {
                    id: p.id,
                    capacity_mw: p.capacity_mw,
                    ppa_unit_price_yen_per_kwh: p.ppa_unit_price_yen_per_kwh,
                })
                .collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/recontracts",
    request_body = RecontractEstimateIn,
    responses(
        (status = 201, description = "Estimate created with children", body = RecontractEstimateOut),
        (status = 400, description = "Validation failure or constraint violation")
    )
)]
pub async fn create_recontract_estimate(
    State(state): State<AppState>,
    Json(payload): Json<RecontractEstimateIn>,
) -> Result<(StatusCode, Json<RecontractEstimateOut>), ApiError> {
    payload.validate()?;

    let created = RecontractService::new(&state.db)
        .create(payload.into_new_estimate())
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/recontracts/{estimate_id}",
    params(
        ("estimate_id" = i32, Path, description = "Estimate ID")
    ),
    responses(
        (status = 200, description = "Estimate with children", body = RecontractEstimateOut),
        (status = 404, description = "Estimate not found")
    )
)]
pub async fn get_recontract_estimate(
    State(state): State<AppState>,
    Path(estimate_id): Path<i32>,
) -> Result<Json<RecontractEstimateOut>, ApiError> {
    let estimate = RecontractService::new(&state.db).get(estimate_id).await?;
    Ok(Json(estimate.into()))
}
