use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::*;
use tracing::info;

use crate::database::entities::enums::{ContractStatus, OfferStatus, QuoteStatus, VoltageLevel};
use crate::database::entities::{
    agencies, contracts, customers, plans, ppa_bundles, ppa_projects, ppa_supply_points,
};

pub async fn create_demo_data(db: &DatabaseConnection) -> Result<()> {
    // First check if the demo plan already exists
    let existing_plan = plans::Entity::find()
        .filter(plans::Column::Name.eq("Flat (Seasonal)"))
        .one(db)
        .await?;

    if existing_plan.is_some() {
        info!("Demo data already exists, skipping seed data creation");
        return Ok(());
    }

    info!("Creating demo reference data");

    let plan_rows = vec![
        (101, "Flat (Seasonal)"),
        (102, "EcoBiz Plan (LV) + PPA"),
        (103, "100% green market linked price plan"),
    ];
    let plan_models: Vec<plans::ActiveModel> = plan_rows
        .into_iter()
        .map(|(id, name)| plans::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
        })
        .collect();
    plans::Entity::insert_many(plan_models).exec(db).await?;

    let agency_rows = vec![
        (23, "AG023", "Demo Agency"),
        (24, "AG024", "North Sales"),
        (25, "AG025", "Kansai Partners"),
    ];
    let agency_models: Vec<agencies::ActiveModel> = agency_rows
        .into_iter()
        .map(|(id, number, name)| agencies::ActiveModel {
            id: Set(id),
            number: Set(number.to_string()),
            name: Set(name.to_string()),
        })
        .collect();
    agencies::Entity::insert_many(agency_models).exec(db).await?;

    let customer_rows = vec![
        (501, "Demo Customer", 23),
        (502, "ACME Foods", 24),
        (503, "Hikari Retail", 25),
    ];
    let customer_models: Vec<customers::ActiveModel> = customer_rows
        .into_iter()
        .map(|(id, name, agency_id)| customers::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            agency_id: Set(Some(agency_id)),
        })
        .collect();
    customers::Entity::insert_many(customer_models).exec(db).await?;

    create_demo_contracts(db).await?;
    create_demo_bundles(db).await?;
    create_demo_projects(db).await?;
    create_demo_supply_points(db).await?;

    let total = ppa_bundles::Entity::find().count(db).await?;
    info!("Seed complete, bundles in database: {}", total);
    Ok(())
}

async fn create_demo_contracts(db: &DatabaseConnection) -> Result<()> {
    info!("Creating demo contracts...");

    let now = Utc::now().naive_utc();
    let today = now.date();

    // (customer, plan, spn, runway days, kw, status)
    let contract_rows = vec![
        (501, 101, "03-0001-0001-0001", 400, 480.0, ContractStatus::UnderContract),
        (502, 102, "02-0002-0002-0002", 60, 250.0, ContractStatus::UnderContract),
        (503, 103, "06-0003-0003-0003", 400, 700.0, ContractStatus::Recontracted),
    ];

    let contract_count = contract_rows.len();
    let contract_models: Vec<contracts::ActiveModel> = contract_rows
        .into_iter()
        .map(|(customer_id, plan_id, spn, runway_days, kw, status)| contracts::ActiveModel {
            id: NotSet,
            customer_id: Set(customer_id),
            plan_id: Set(plan_id),
            supply_point_number: Set(spn.to_string()),
            start_date: Set(today - Duration::days(365)),
            end_date: Set(today + Duration::days(runway_days)),
            negotiated_power_kw: Set(Some(kw)),
            status: Set(status),
            created_at: Set(now),
        })
        .collect();

    contracts::Entity::insert_many(contract_models).exec(db).await?;
    info!("Created {} contracts", contract_count);
    Ok(())
}

async fn create_demo_bundles(db: &DatabaseConnection) -> Result<()> {
    info!("Creating demo bundles...");

    let now = Utc::now().naive_utc();
    let base_request = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or(now.date());
    let request_due = NaiveDate::from_ymd_opt(2025, 7, 25).unwrap_or(now.date());

    let bundle_rows = vec![
        (
            9001,
            501,
            23,
            101,
            VoltageLevel::Low,
            "Tokyo",
            NaiveDate::from_ymd_opt(2025, 9, 1),
            60,
            base_request,
            request_due,
        ),
        (
            9002,
            502,
            24,
            102,
            VoltageLevel::High,
            "Tohoku",
            NaiveDate::from_ymd_opt(2025, 11, 1),
            30,
            base_request + Duration::days(10),
            request_due + Duration::days(7),
        ),
        (
            9003,
            503,
            25,
            103,
            VoltageLevel::ExtraHigh,
            "Kansai",
            NaiveDate::from_ymd_opt(2025, 12, 1),
            60,
            base_request + Duration::days(20),
            request_due + Duration::days(14),
        ),
    ];

    let bundle_count = bundle_rows.len();
    let mut bundle_models = Vec::new();
    for (id, customer_id, agency_id, plan_id, voltage, area, start, valid_days, requested, due) in
        bundle_rows
    {
        bundle_models.push(ppa_bundles::ActiveModel {
            id: Set(id),
            customer_id: Set(customer_id),
            agency_id: Set(Some(agency_id)),
            plan_id: Set(plan_id),
            voltage: Set(voltage),
            area: Set(area.to_string()),
            prev_supplier_plan: Set(None),
            contract_start_date: Set(start),
            quote_valid_days: Set(Some(valid_days)),
            requested_at: Set(Some(requested)),
            request_due_date: Set(Some(due)),
            quote_status: Set(QuoteStatus::Draft),
            offer_status: Set(OfferStatus::None),
            created_at: Set(now),
            updated_at: Set(now),
        });
    }

    ppa_bundles::Entity::insert_many(bundle_models).exec(db).await?;
    info!("Created {} bundles", bundle_count);
    Ok(())
}

async fn create_demo_projects(db: &DatabaseConnection) -> Result<()> {
    info!("Creating demo projects...");

    let project_rows = vec![
        (12001, 9001, 0.0),
        (12002, 9001, 0.5),
        (12003, 9001, 1.0),
        (22001, 9002, 0.2),
        (22002, 9002, 0.8),
        (32001, 9003, 1.5),
    ];

    let now = Utc::now().naive_utc();
    let project_count = project_rows.len();
    let project_models: Vec<ppa_projects::ActiveModel> = project_rows
        .into_iter()
        .map(|(id, bundle_id, capacity_mw)| ppa_projects::ActiveModel {
            id: Set(id),
            bundle_id: Set(bundle_id),
            capacity_mw: Set(capacity_mw),
            ppa_unit_price_yen_per_kwh: Set(None),
            created_at: Set(now),
        })
        .collect();

    ppa_projects::Entity::insert_many(project_models).exec(db).await?;
    info!("Created {} projects", project_count);
    Ok(())
}

async fn create_demo_supply_points(db: &DatabaseConnection) -> Result<()> {
    info!("Creating demo supply points...");

    // (bundle, project, name, address, kw); rows without a project stay out
    // of per-project rollups but still count toward the bundle totals.
    let sp_rows = vec![
        (9001, Some(12001), "SP-9001-A", "Tokyo A", 500.0),
        (9001, Some(12001), "SP-9001-B", "Tokyo B", 440.0),
        (9001, None, "SP-9001-C", "Tokyo C", 600.0),
        (9001, None, "SP-9001-D", "Tokyo D", 450.0),
        (9001, None, "SP-9001-E", "Tokyo E", 400.0),
        (9001, None, "SP-9001-F", "Tokyo F", 430.0),
        (9002, Some(22001), "SP-9002-A", "Tohoku A", 300.0),
        (9002, Some(22001), "SP-9002-B", "Tohoku B", 250.0),
        (9002, Some(22002), "SP-9002-C", "Tohoku C", 350.0),
        (9002, Some(22002), "SP-9002-D", "Tohoku D", 150.0),
        (9003, Some(32001), "SP-9003-A", "Kansai A", 700.0),
        (9003, Some(32001), "SP-9003-B", "Kansai B", 500.0),
    ];

    let sp_count = sp_rows.len();
    let sp_models: Vec<ppa_supply_points::ActiveModel> = sp_rows
        .into_iter()
        .map(|(bundle_id, project_id, name, address, kw)| ppa_supply_points::ActiveModel {
            id: NotSet,
            bundle_id: Set(bundle_id),
            project_id: Set(project_id),
            name: Set(name.to_string()),
            address: Set(Some(address.to_string())),
            supply_point_number: Set(Some(name.to_string())),
            contract_kw: Set(Some(kw)),
        })
        .collect();

    ppa_supply_points::Entity::insert_many(sp_models).exec(db).await?;
    info!("Created {} supply points", sp_count);
    Ok(())
}
