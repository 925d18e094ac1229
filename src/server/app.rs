use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{contracts, health, ppa_quotations, recontracts};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::healthz,
        ppa_quotations::list_ppa_quotations,
        ppa_quotations::get_ppa_quotation_detail,
        recontracts::create_recontract_estimate,
        recontracts::get_recontract_estimate,
        contracts::renewal_cases,
    ),
    components(schemas(
        ppa_quotations::PpaQuotationListItem,
        ppa_quotations::PpaQuotationListResponse,
        ppa_quotations::PpaProjectBrief,
        ppa_quotations::PpaQuotationDetailResponse,
        recontracts::SupplyPointIn,
        recontracts::PlantIn,
        recontracts::RecontractEstimateIn,
        recontracts::SupplyPointOut,
        recontracts::PlantOut,
        recontracts::RecontractEstimateOut,
        contracts::RenewalCase,
    )),
    tags(
        (name = "ppa_quotations", description = "PPA bundle listing and detail"),
        (name = "recontracts", description = "Re-contract estimate creation and retrieval"),
        (name = "contracts", description = "Supply contract reporting")
    )
)]
pub struct ApiDoc;

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState { db };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/healthz", get(health::healthz))
        .route("/ppa_quotations", get(ppa_quotations::list_ppa_quotations))
        .route(
            "/ppa_quotations/:bundle_id",
            get(ppa_quotations::get_ppa_quotation_detail),
        )
        .route("/recontracts", post(recontracts::create_recontract_estimate))
        .route(
            "/recontracts/:estimate_id",
            get(recontracts::get_recontract_estimate),
        )
        .route("/contracts/renewal-cases", get(contracts::renewal_cases))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}
