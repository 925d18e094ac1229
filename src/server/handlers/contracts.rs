use axum::extract::State;
use axum::response::Json;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::contract_service::ContractService;

#[derive(Debug, Serialize, ToSchema)]
pub struct RenewalCase {
    pub contract_id: i32,
    pub customer_name: String,
    pub supply_point_number: String,
    pub plan_name: String,
    pub end_date: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/contracts/renewal-cases",
    responses(
        (status = 200, description = "Contracts due for renewal outreach", body = [RenewalCase])
    )
)]
pub async fn renewal_cases(
    State(state): State<AppState>,
) -> Result<Json<Vec<RenewalCase>>, ApiError> {
    let rows = ContractService::new(&state.db).renewal_cases().await?;

    let cases = rows
        .into_iter()
        .map(|r| RenewalCase {
            contract_id: r.contract_id,
            customer_name: r.customer_name,
            supply_point_number: r.supply_point_number,
            plan_name: r.plan_name,
            end_date: r.end_date,
        })
        .collect();

    Ok(Json(cases))
}
