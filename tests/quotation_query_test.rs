//! Service-level tests for the bundle aggregation query builder.

use anyhow::Result;
use chrono::Utc;
use ppa_admin::database::connection::setup_database;
use ppa_admin::database::entities::enums::{OfferStatus, QuoteStatus, VoltageLevel};
use ppa_admin::database::entities::{ppa_bundles, ppa_projects, ppa_supply_points};
use ppa_admin::database::seed_data::create_demo_data;
use ppa_admin::services::quotation_service::{
    BundleFilter, PageRequest, QuotationService, SortDirection, SortKey,
};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, NotSet, Set};
use tempfile::NamedTempFile;

async fn setup_db() -> Result<DatabaseConnection> {
    let temp_file = NamedTempFile::new()?;
    // keep the file on disk for the lifetime of the test; dropping the
    // NamedTempFile would delete the database out from under the pool
    let (_file, db_path) = temp_file.keep()?;
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;
    create_demo_data(&db).await?;
    Ok(db)
}

async fn insert_bundle(db: &DatabaseConnection, id: i32, area: &str) -> Result<()> {
    let now = Utc::now().naive_utc();
    ppa_bundles::ActiveModel {
        id: Set(id),
        customer_id: Set(501),
        agency_id: Set(None),
        plan_id: Set(101),
        voltage: Set(VoltageLevel::High),
        area: Set(area.to_string()),
        prev_supplier_plan: Set(None),
        contract_start_date: Set(None),
        quote_valid_days: Set(None),
        requested_at: Set(None),
        request_due_date: Set(None),
        quote_status: Set(QuoteStatus::Draft),
        offer_status: Set(OfferStatus::None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn insert_supply_point(
    db: &DatabaseConnection,
    bundle_id: i32,
    project_id: Option<i32>,
    name: &str,
    kw: f64,
) -> Result<()> {
    ppa_supply_points::ActiveModel {
        id: NotSet,
        bundle_id: Set(bundle_id),
        project_id: Set(project_id),
        name: Set(name.to_string()),
        address: Set(None),
        supply_point_number: Set(Some(name.to_string())),
        contract_kw: Set(Some(kw)),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn insert_project(
    db: &DatabaseConnection,
    id: i32,
    bundle_id: i32,
    capacity_mw: f64,
) -> Result<()> {
    ppa_projects::ActiveModel {
        id: Set(id),
        bundle_id: Set(bundle_id),
        capacity_mw: Set(capacity_mw),
        ppa_unit_price_yen_per_kwh: Set(None),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await?;
    Ok(())
}

fn default_page() -> PageRequest {
    PageRequest {
        page: 1,
        rows: 200,
    }
}

#[tokio::test]
async fn contract_power_sums_exactly() -> Result<()> {
    let db = setup_db().await?;

    insert_bundle(&db, 100, "Chubu").await?;
    insert_supply_point(&db, 100, None, "SP-100-A", 500.0).await?;
    insert_supply_point(&db, 100, None, "SP-100-B", 440.0).await?;
    insert_supply_point(&db, 100, None, "SP-100-C", 600.0).await?;

    let service = QuotationService::new(&db);
    let page = service
        .list(
            &BundleFilter::default(),
            SortKey::Id,
            SortDirection::Asc,
            default_page(),
        )
        .await?;

    let row = page
        .rows
        .iter()
        .find(|r| r.bundle_id == 100)
        .expect("bundle 100 should be listed");
    assert_eq!(row.sum_kw, 1540.0);
    assert_eq!(row.sp_count, 3);
    assert_eq!(row.project_count, 0);

    Ok(())
}

#[tokio::test]
async fn childless_bundle_reports_zeroes_not_null() -> Result<()> {
    let db = setup_db().await?;

    insert_bundle(&db, 110, "Shikoku").await?;

    let service = QuotationService::new(&db);
    let page = service
        .list(
            &BundleFilter {
                area: Some("Shikoku".to_string()),
                ..Default::default()
            },
            SortKey::UpdatedAt,
            SortDirection::Desc,
            default_page(),
        )
        .await?;

    assert_eq!(page.filtered_count, 1);
    let row = &page.rows[0];
    assert_eq!(row.sum_kw, 0.0);
    assert_eq!(row.sp_count, 0);
    assert_eq!(row.project_count, 0);

    Ok(())
}

#[tokio::test]
async fn rollups_stay_exact_with_both_child_kinds() -> Result<()> {
    let db = setup_db().await?;

    // seeded bundle 9001: 3 projects alongside 6 supply points; the
    // supply-point totals must not multiply across the project rows
    let service = QuotationService::new(&db);
    let page = service
        .list(
            &BundleFilter::default(),
            SortKey::Id,
            SortDirection::Asc,
            default_page(),
        )
        .await?;

    let row = page
        .rows
        .iter()
        .find(|r| r.bundle_id == 9001)
        .expect("bundle 9001 should be listed");
    assert_eq!(row.sp_count, 6);
    assert_eq!(row.sum_kw, 2820.0);
    assert_eq!(row.project_count, 3);

    Ok(())
}

#[tokio::test]
async fn pagination_covers_filtered_count_without_duplicates() -> Result<()> {
    let db = setup_db().await?;

    for (i, id) in (300..304).enumerate() {
        insert_bundle(&db, id, &format!("Area-{}", i)).await?;
    }

    let service = QuotationService::new(&db);
    let filter = BundleFilter::default();

    let first = service
        .list(
            &filter,
            SortKey::Id,
            SortDirection::Asc,
            PageRequest { page: 1, rows: 3 },
        )
        .await?;
    // 3 seeded + 4 inserted
    assert_eq!(first.filtered_count, 7);
    assert_eq!(first.total_count, 7);

    let mut seen = Vec::new();
    let mut page_no = 1;
    loop {
        let page = service
            .list(
                &filter,
                SortKey::Id,
                SortDirection::Asc,
                PageRequest {
                    page: page_no,
                    rows: 3,
                },
            )
            .await?;
        if page.rows.is_empty() {
            break;
        }
        seen.extend(page.rows.iter().map(|r| r.bundle_id));
        page_no += 1;
    }

    assert_eq!(seen.len() as u64, first.filtered_count);
    let mut deduped = seen.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), seen.len());

    Ok(())
}

#[tokio::test]
async fn absurd_page_numbers_return_empty_without_panicking() -> Result<()> {
    let db = setup_db().await?;

    let service = QuotationService::new(&db);
    let page = service
        .list(
            &BundleFilter::default(),
            SortKey::Id,
            SortDirection::Asc,
            PageRequest {
                page: u64::MAX,
                rows: 200,
            },
        )
        .await?;

    assert!(page.rows.is_empty());
    assert_eq!(page.total_count, 3);

    Ok(())
}

#[tokio::test]
async fn filters_apply_to_bundle_columns_only() -> Result<()> {
    let db = setup_db().await?;

    let service = QuotationService::new(&db);

    let by_customer = service
        .list(
            &BundleFilter {
                customer_id: Some(502),
                ..Default::default()
            },
            SortKey::UpdatedAt,
            SortDirection::Desc,
            default_page(),
        )
        .await?;
    assert_eq!(by_customer.filtered_count, 1);
    assert_eq!(by_customer.rows[0].bundle_id, 9002);
    // total_count ignores the filter
    assert_eq!(by_customer.total_count, 3);

    let by_status = service
        .list(
            &BundleFilter {
                offer_status: Some(OfferStatus::Won),
                ..Default::default()
            },
            SortKey::UpdatedAt,
            SortDirection::Desc,
            default_page(),
        )
        .await?;
    assert_eq!(by_status.filtered_count, 0);
    assert!(by_status.rows.is_empty());

    Ok(())
}

#[tokio::test]
async fn detail_rollup_excludes_unlinked_points() -> Result<()> {
    let db = setup_db().await?;

    insert_bundle(&db, 200, "Kyushu").await?;
    insert_project(&db, 2001, 200, 0.5).await?;
    insert_supply_point(&db, 200, Some(2001), "SP-200-A", 120.0).await?;
    insert_supply_point(&db, 200, Some(2001), "SP-200-B", 80.0).await?;
    insert_supply_point(&db, 200, None, "SP-200-C", 100.0).await?;
    insert_supply_point(&db, 200, None, "SP-200-D", 100.0).await?;
    insert_supply_point(&db, 200, None, "SP-200-E", 100.0).await?;

    let service = QuotationService::new(&db);
    let detail = service.detail(200).await?;

    assert_eq!(detail.header.sp_count, 5);
    assert_eq!(detail.header.sum_kw, 500.0);

    assert_eq!(detail.projects.len(), 1);
    let rollup = &detail.projects[0];
    assert_eq!(rollup.project_id, 2001);
    assert_eq!(rollup.sp_count, 2);
    assert_eq!(rollup.sum_kw, 200.0);

    Ok(())
}

#[tokio::test]
async fn detail_missing_bundle_is_distinct_from_empty() -> Result<()> {
    let db = setup_db().await?;

    insert_bundle(&db, 210, "Hokuriku").await?;

    let service = QuotationService::new(&db);

    // exists with no children: a row with empty projects
    let detail = service.detail(210).await?;
    assert!(detail.projects.is_empty());

    // does not exist: an error
    assert!(service.detail(999_999).await.is_err());

    Ok(())
}
