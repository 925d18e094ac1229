use axum::extract::{Path, Query, State};
use axum::response::Json;
use chrono::NaiveDate;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::database::entities::enums::{OfferStatus, QuoteStatus};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::presentation::{
    format_timestamp, offer_status_triplet, quote_status_triplet, region_from_area,
    summary_number, validity_window,
};
use crate::services::quotation_service::{
    BundleFilter, BundleSummaryRow, PageRequest, QuotationService, SortDirection, SortKey,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number, default 1.
    pub page: Option<u64>,
    /// Rows per page (1-200), default 20.
    #[serde(alias = "size")]
    pub rows: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub customer_id: Option<i32>,
    pub agency_id: Option<i32>,
    #[serde(alias = "region")]
    pub area: Option<String>,
    #[serde(alias = "pricing_status")]
    pub quote_status: Option<String>,
    pub offer_status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PpaQuotationListItem {
    pub id: i32,
    pub tender_number: String,
    pub customer_name: String,
    pub plan_id: i32,
    pub plan_name_en: String,
    pub plan_name_jp: String,
    pub sales_agent_id: Option<i32>,
    pub sales_agent_name: Option<String>,
    pub region_id: i32,
    pub region_name_en: String,
    pub region_name_jp: String,
    pub quote_request_date: Option<NaiveDate>,
    pub last_date_for_quotation: Option<NaiveDate>,
    pub quote_valid_until: Option<String>,
    pub contract_start_date: Option<NaiveDate>,
    pub num_of_spids: i64,
    pub peak_demand: Option<f64>,
    pub annual_usage: Option<f64>,
    pub pricing_status_id: i32,
    pub pricing_status_en: String,
    pub pricing_status_jp: String,
    pub offer_status_id: i32,
    pub offer_status_en: String,
    pub offer_status_jp: String,
    pub last_updated: Option<String>,
    pub has_quotation_file: bool,
    pub summary_number: String,
    pub project_count: i64,
    pub contract_power_kw: f64,
    pub expiration_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PpaQuotationListResponse {
    pub total_count: u64,
    pub filtered_count: u64,
    pub data: Vec<PpaQuotationListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PpaProjectBrief {
    pub project_id: i32,
    pub capacity_kw: f64,
    pub supply_point_count: i64,
    pub contract_power_kw: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PpaQuotationDetailResponse {
    #[serde(flatten)]
    pub summary: PpaQuotationListItem,
    pub projects: Vec<PpaProjectBrief>,
    pub supply_points_count: i64,
}

fn list_item_from_row(row: &BundleSummaryRow) -> PpaQuotationListItem {
    let region = region_from_area(Some(row.area.as_str()));
    let pricing = quote_status_triplet(Some(&row.quote_status));
    let offer = offer_status_triplet(Some(&row.offer_status));
    let summary = summary_number(row.bundle_id);
    let validity = validity_window(row.requested_at, row.quote_valid_days);

    PpaQuotationListItem {
        id: row.bundle_id,
        tender_number: summary.clone(),
        customer_name: row.customer_name.clone(),
        plan_id: row.plan_id,
        plan_name_en: row.plan_name.clone(),
        plan_name_jp: row.plan_name.clone(),
        sales_agent_id: row.agency_id,
        sales_agent_name: row.agency_name.clone(),
        region_id: region.id,
        region_name_en: region.name_en.to_string(),
        region_name_jp: region.name_jp.to_string(),
        quote_request_date: row.requested_at,
        last_date_for_quotation: row.request_due_date,
        quote_valid_until: validity.as_ref().map(|w| w.label.clone()),
        contract_start_date: row.contract_start_date,
        num_of_spids: row.sp_count,
        peak_demand: None,
        annual_usage: None,
        pricing_status_id: pricing.id,
        pricing_status_en: pricing.label_en.to_string(),
        pricing_status_jp: pricing.label_jp.to_string(),
        offer_status_id: offer.id,
        offer_status_en: offer.label_en.to_string(),
        offer_status_jp: offer.label_jp.to_string(),
        last_updated: Some(format_timestamp(&row.updated_at)),
        has_quotation_file: false,
        summary_number: summary,
        project_count: row.project_count,
        contract_power_kw: row.sum_kw,
        expiration_date: validity.map(|w| w.expiration),
    }
}

fn parse_filter(params: &ListQuery) -> Result<BundleFilter, ApiError> {
    let quote_status = match &params.quote_status {
        Some(raw) => Some(QuoteStatus::try_from_value(raw).map_err(|_| {
            ApiError::BadRequest(format!("Invalid quote_status: {raw}"))
        })?),
        None => None,
    };
    let offer_status = match &params.offer_status {
        Some(raw) => Some(OfferStatus::try_from_value(raw).map_err(|_| {
            ApiError::BadRequest(format!("Invalid offer_status: {raw}"))
        })?),
        None => None,
    };

    Ok(BundleFilter {
        customer_id: params.customer_id,
        agency_id: params.agency_id,
        area: params.area.clone(),
        quote_status,
        offer_status,
    })
}

fn parse_page(params: &ListQuery) -> Result<PageRequest, ApiError> {
    let page = params.page.unwrap_or(1);
    if page < 1 {
        return Err(ApiError::BadRequest("page must be >= 1".to_string()));
    }
    let rows = params.rows.unwrap_or(20);
    if !(1..=200).contains(&rows) {
        return Err(ApiError::BadRequest(
            "rows must be between 1 and 200".to_string(),
        ));
    }
    Ok(PageRequest { page, rows })
}

#[utoipa::path(
    get,
    path = "/ppa_quotations",
    params(ListQuery),
    responses(
        (status = 200, description = "Paginated bundle list with rollups", body = PpaQuotationListResponse),
        (status = 400, description = "Invalid pagination or filter parameter")
    )
)]
pub async fn list_ppa_quotations(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PpaQuotationListResponse>, ApiError> {
    let page = parse_page(&params)?;
    let filter = parse_filter(&params)?;
    // Malformed sort parameters are normalized, not rejected.
    let sort_key = SortKey::from_param(params.sort_by.as_deref());
    let direction = SortDirection::from_param(params.sort_order.as_deref());

    let result = QuotationService::new(&state.db)
        .list(&filter, sort_key, direction, page)
        .await?;

    Ok(Json(PpaQuotationListResponse {
        total_count: result.total_count,
        filtered_count: result.filtered_count,
        data: result.rows.iter().map(list_item_from_row).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/ppa_quotations/{bundle_id}",
    params(
        ("bundle_id" = i32, Path, description = "Bundle ID")
    ),
    responses(
        (status = 200, description = "Bundle detail with project rollups", body = PpaQuotationDetailResponse),
        (status = 404, description = "Bundle not found")
    )
)]
pub async fn get_ppa_quotation_detail(
    State(state): State<AppState>,
    Path(bundle_id): Path<i32>,
) -> Result<Json<PpaQuotationDetailResponse>, ApiError> {
    let detail = QuotationService::new(&state.db).detail(bundle_id).await?;

    let summary = list_item_from_row(&detail.header);
    let supply_points_count = detail.header.sp_count;
    let projects = detail
        .projects
        .iter()
        .map(|p| PpaProjectBrief {
            project_id: p.project_id,
            capacity_kw: p.capacity_mw * 1000.0,
            supply_point_count: p.sp_count,
            contract_power_kw: p.sum_kw,
        })
        .collect();

    Ok(Json(PpaQuotationDetailResponse {
        summary,
        projects,
        supply_points_count,
    }))
}
