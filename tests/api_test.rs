//! End-to-end tests for the HTTP surface: listing, detail, re-contract
//! creation, renewal cases and health probes.

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use ppa_admin::database::connection::setup_database;
use ppa_admin::database::entities::contracts;
use ppa_admin::database::entities::enums::ContractStatus;
use ppa_admin::database::seed_data::create_demo_data;
use ppa_admin::server::app::create_app;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, Set,
};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

async fn setup_test_server() -> Result<(TestServer, DatabaseConnection)> {
    let temp_file = NamedTempFile::new()?;
    // keep the file on disk for the lifetime of the test; dropping the
    // NamedTempFile would delete the database out from under the pool
    let (_file, db_path) = temp_file.keep()?;
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;
    create_demo_data(&db).await?;

    let app = create_app(db.clone(), Some("*")).await?;
    let server = TestServer::new(app)?;

    Ok((server, db))
}

async fn insert_contract(
    db: &DatabaseConnection,
    spn: &str,
    status: ContractStatus,
    end_date: NaiveDate,
) -> Result<contracts::Model> {
    let contract = contracts::ActiveModel {
        id: NotSet,
        customer_id: Set(501),
        plan_id: Set(101),
        supply_point_number: Set(spn.to_string()),
        start_date: Set(end_date - Duration::days(365)),
        end_date: Set(end_date),
        negotiated_power_kw: Set(None),
        status: Set(status),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await?;
    Ok(contract)
}

async fn contract_status(db: &DatabaseConnection, spn: &str) -> Result<ContractStatus> {
    let contract = contracts::Entity::find()
        .filter(contracts::Column::SupplyPointNumber.eq(spn))
        .one(db)
        .await?
        .expect("contract should exist");
    Ok(contract.status)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

#[tokio::test]
async fn test_health_endpoints() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/healthz").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["ok"], true);

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn test_list_returns_aggregated_bundles() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/ppa_quotations").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["filtered_count"], 3);

    let data = body["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 3);

    let tokyo = data
        .iter()
        .find(|item| item["id"] == 9001)
        .expect("bundle 9001 should be listed");
    assert_eq!(tokyo["tender_number"], "PPA00009001");
    assert_eq!(tokyo["summary_number"], "PPA00009001");
    assert_eq!(tokyo["customer_name"], "Demo Customer");
    assert_eq!(tokyo["plan_name_en"], "Flat (Seasonal)");
    assert_eq!(tokyo["region_id"], 3);
    assert_eq!(tokyo["region_name_en"], "Tokyo");
    assert_eq!(tokyo["num_of_spids"], 6);
    assert_eq!(tokyo["contract_power_kw"], 2820.0);
    assert_eq!(tokyo["project_count"], 3);
    assert_eq!(tokyo["pricing_status_en"], "pending");
    assert_eq!(tokyo["offer_status_en"], "pending");
    // requested 2025-07-01 with a 60 day window
    assert_eq!(tokyo["quote_valid_until"], "2025-08-30 (60日)");
    assert_eq!(tokyo["expiration_date"], "2025-08-30");
    assert_eq!(tokyo["has_quotation_file"], false);
    assert!(tokyo["peak_demand"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_list_filters_and_aliases() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/ppa_quotations?area=Tohoku").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["filtered_count"], 1);
    assert_eq!(body["data"][0]["id"], 9002);

    // `region` is an accepted alias of `area`
    let response = server.get("/ppa_quotations?region=Kansai").await;
    let body: Value = response.json();
    assert_eq!(body["filtered_count"], 1);
    assert_eq!(body["data"][0]["id"], 9003);

    // `size` is an accepted alias of `rows`
    let response = server.get("/ppa_quotations?size=2&page=1&sort_by=id&sort_order=asc").await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["id"], 9001);

    Ok(())
}

#[tokio::test]
async fn test_list_rejects_bad_parameters() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/ppa_quotations?rows=0").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.get("/ppa_quotations?rows=201").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.get("/ppa_quotations?quote_status=BOGUS").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Invalid quote_status: BOGUS");

    // a malformed sort key is normalized, not rejected
    let response = server.get("/ppa_quotations?sort_by=nonsense").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_detail_rolls_up_linked_points_only() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/ppa_quotations/9001").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["id"], 9001);
    // all six points count at bundle level
    assert_eq!(body["supply_points_count"], 6);
    assert_eq!(body["num_of_spids"], 6);
    assert_eq!(body["contract_power_kw"], 2820.0);

    let projects = body["projects"].as_array().expect("projects array");
    assert_eq!(projects.len(), 3);
    // ordered by project id ascending
    assert_eq!(projects[0]["project_id"], 12001);
    assert_eq!(projects[1]["project_id"], 12002);
    assert_eq!(projects[2]["project_id"], 12003);

    // only the two linked points roll up under 12001
    assert_eq!(projects[0]["supply_point_count"], 2);
    assert_eq!(projects[0]["contract_power_kw"], 940.0);
    assert_eq!(projects[0]["capacity_kw"], 0.0);

    // projects with no linked points report zero, not null
    assert_eq!(projects[1]["supply_point_count"], 0);
    assert_eq!(projects[1]["contract_power_kw"], 0.0);
    assert_eq!(projects[1]["capacity_kw"], 500.0);

    Ok(())
}

#[tokio::test]
async fn test_detail_missing_bundle_is_not_found() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/ppa_quotations/99999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["detail"], "Bundle not found");

    Ok(())
}

#[tokio::test]
async fn test_create_recontract_estimate_flips_matching_contracts() -> Result<()> {
    let (server, db) = setup_test_server().await?;

    let far_end = Utc::now().date_naive() + Duration::days(400);
    insert_contract(&db, "SPN-A", ContractStatus::UnderContract, far_end).await?;
    insert_contract(&db, "SPN-B", ContractStatus::Recontracted, far_end).await?;

    let today = Utc::now().date_naive();
    let payload = json!({
        "plan_id": 101,
        "customer_id": 501,
        "desired_quote_date": today.format("%Y-%m-%d").to_string(),
        "quote_effective_days": 30,
        "remarks": "bulk renewal batch",
        "supply_points": [
            { "supply_point_number": "SPN-A" },
            { "supply_point_number": "SPN-B" }
        ],
        "plants": [
            { "capacity_mw": 1.5, "ppa_unit_price_yen_per_kwh": 12.5 }
        ]
    });

    let response = server.post("/recontracts").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    let estimate_id = body["id"].as_i64().expect("estimate id");
    assert_eq!(body["quote_effective_days"], 30);
    assert_eq!(body["supply_points"].as_array().unwrap().len(), 2);
    // the implicit 0.0 MW scenario comes first
    let plants = body["plants"].as_array().unwrap();
    assert_eq!(plants.len(), 2);
    assert_eq!(plants[0]["capacity_mw"], 0.0);
    assert_eq!(plants[1]["capacity_mw"], 1.5);
    assert!(body["supply_points"][0]["id"].is_i64());

    // only the UNDER_CONTRACT row transitions
    assert_eq!(
        contract_status(&db, "SPN-A").await?,
        ContractStatus::RecontractEstimate
    );
    assert_eq!(
        contract_status(&db, "SPN-B").await?,
        ContractStatus::Recontracted
    );

    // the created estimate reads back with its children
    let response = server.get(&format!("/recontracts/{}", estimate_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let fetched: Value = response.json();
    assert_eq!(fetched["id"], estimate_id);
    assert_eq!(fetched["plants"].as_array().unwrap().len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_recontract_with_invalid_customer_writes_nothing() -> Result<()> {
    use ppa_admin::database::entities::{
        recontract_estimates, recontract_plants, recontract_supply_points,
    };

    let (server, db) = setup_test_server().await?;

    let far_end = Utc::now().date_naive() + Duration::days(400);
    insert_contract(&db, "SPN-X", ContractStatus::UnderContract, far_end).await?;

    let today = Utc::now().date_naive();
    let payload = json!({
        "plan_id": 101,
        "customer_id": 424242,
        "desired_quote_date": today.format("%Y-%m-%d").to_string(),
        "quote_effective_days": 60,
        "supply_points": [
            { "supply_point_number": "SPN-X" }
        ]
    });

    let response = server.post("/recontracts").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Invalid customer_id: 424242");

    assert_eq!(recontract_estimates::Entity::find().count(&db).await?, 0);
    assert_eq!(recontract_supply_points::Entity::find().count(&db).await?, 0);
    assert_eq!(recontract_plants::Entity::find().count(&db).await?, 0);
    assert_eq!(
        contract_status(&db, "SPN-X").await?,
        ContractStatus::UnderContract
    );

    Ok(())
}

#[tokio::test]
async fn test_recontract_constraint_violation_rolls_back() -> Result<()> {
    use ppa_admin::database::entities::{
        recontract_estimates, recontract_plants, recontract_supply_points,
    };

    let (server, db) = setup_test_server().await?;

    let far_end = Utc::now().date_naive() + Duration::days(400);
    insert_contract(&db, "SPN-DUP", ContractStatus::UnderContract, far_end).await?;

    // passes structural validation and FK checks, then trips the unique
    // (estimate_id, supply_point_number) index at insert time
    let today = Utc::now().date_naive();
    let payload = json!({
        "plan_id": 101,
        "customer_id": 501,
        "desired_quote_date": today.format("%Y-%m-%d").to_string(),
        "quote_effective_days": 30,
        "supply_points": [
            { "supply_point_number": "SPN-DUP" },
            { "supply_point_number": "SPN-DUP" }
        ]
    });

    let response = server.post("/recontracts").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let detail = body["detail"].as_str().expect("detail message");
    assert!(
        detail.starts_with("Database constraint error:"),
        "unexpected detail: {detail}"
    );

    // the whole transaction rolled back, nothing persisted
    assert_eq!(recontract_estimates::Entity::find().count(&db).await?, 0);
    assert_eq!(recontract_supply_points::Entity::find().count(&db).await?, 0);
    assert_eq!(recontract_plants::Entity::find().count(&db).await?, 0);
    assert_eq!(
        contract_status(&db, "SPN-DUP").await?,
        ContractStatus::UnderContract
    );

    Ok(())
}

#[tokio::test]
async fn test_recontract_input_validation() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let today = Utc::now().date_naive();

    // no supply points
    let response = server
        .post("/recontracts")
        .json(&json!({
            "plan_id": 101,
            "customer_id": 501,
            "desired_quote_date": today.format("%Y-%m-%d").to_string(),
            "quote_effective_days": 30,
            "supply_points": []
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // quote window outside 30/60
    let response = server
        .post("/recontracts")
        .json(&json!({
            "plan_id": 101,
            "customer_id": 501,
            "desired_quote_date": today.format("%Y-%m-%d").to_string(),
            "quote_effective_days": 45,
            "supply_points": [{ "supply_point_number": "SPN-1" }]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "quote_effective_days must be 30 or 60");

    // desired date too far out
    let response = server
        .post("/recontracts")
        .json(&json!({
            "plan_id": 101,
            "customer_id": 501,
            "desired_quote_date": (today + Duration::days(60)).format("%Y-%m-%d").to_string(),
            "quote_effective_days": 30,
            "supply_points": [{ "supply_point_number": "SPN-1" }]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_missing_estimate_is_not_found() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/recontracts/31337").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Estimate not found");

    Ok(())
}

#[tokio::test]
async fn test_renewal_cases_window() -> Result<()> {
    let (server, db) = setup_test_server().await?;

    let today = Utc::now().date_naive();
    let target = month_start(month_start(today) + Duration::days(155));
    let in_window = target + Duration::days(9);

    let due = insert_contract(&db, "SPN-DUE", ContractStatus::UnderContract, in_window).await?;
    // ends too soon
    insert_contract(
        &db,
        "SPN-SOON",
        ContractStatus::UnderContract,
        today + Duration::days(30),
    )
    .await?;
    // in the window but no longer under contract
    insert_contract(&db, "SPN-GONE", ContractStatus::Recontracted, in_window).await?;

    let response = server.get("/contracts/renewal-cases").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let cases: Vec<Value> = response.json();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0]["contract_id"], due.id);
    assert_eq!(cases[0]["supply_point_number"], "SPN-DUE");
    assert_eq!(cases[0]["customer_name"], "Demo Customer");
    assert_eq!(cases[0]["plan_name"], "Flat (Seasonal)");
    assert_eq!(
        cases[0]["end_date"],
        in_window.format("%Y-%m-%d").to_string()
    );

    Ok(())
}
