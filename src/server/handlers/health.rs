use axum::response::Json;
use serde_json::{json, Value};

#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Liveness probe")
    )
)]
pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check")
    )
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
