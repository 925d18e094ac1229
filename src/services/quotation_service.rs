//! Aggregation query builder for PPA bundle listings. One parameterized
//! query produces the paginated rows; totals come from separate, unjoined
//! count queries on the same connection so pagination metadata reflects true
//! totals rather than the current page size.

use sea_orm::sea_query::{
    Expr, Func, IntoColumnRef, Order, Query, SimpleExpr, SubQueryStatement,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::database::entities::enums::{OfferStatus, QuoteStatus};
use crate::database::entities::{
    agencies, customers, plans, ppa_bundles, ppa_projects, ppa_supply_points,
};
use crate::services::ServiceError;

/// Equality predicates on bundle-owned columns. Filters never act on
/// aggregated values.
#[derive(Debug, Default, Clone)]
pub struct BundleFilter {
    pub customer_id: Option<i32>,
    pub agency_id: Option<i32>,
    pub area: Option<String>,
    pub quote_status: Option<QuoteStatus>,
    pub offer_status: Option<OfferStatus>,
}

/// The closed set of sortable columns. Anything else falls back to
/// `UpdatedAt` so stale clients keep getting a usable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    UpdatedAt,
    Id,
    ContractStartDate,
    CustomerName,
    PlanName,
    Region,
}

impl SortKey {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("id") => SortKey::Id,
            Some("contract_start_date") => SortKey::ContractStartDate,
            Some("customer_name") => SortKey::CustomerName,
            Some("plan_name") => SortKey::PlanName,
            Some("region") => SortKey::Region,
            _ => SortKey::UpdatedAt,
        }
    }

    fn expr(self) -> SimpleExpr {
        match self {
            SortKey::UpdatedAt => bundle_col(ppa_bundles::Column::UpdatedAt),
            SortKey::Id => bundle_col(ppa_bundles::Column::Id),
            SortKey::ContractStartDate => bundle_col(ppa_bundles::Column::ContractStartDate),
            SortKey::CustomerName => qual((customers::Entity, customers::Column::Name)),
            SortKey::PlanName => qual((plans::Entity, plans::Column::Name)),
            SortKey::Region => bundle_col(ppa_bundles::Column::Area),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(p) if p.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    fn order(self) -> Order {
        match self {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u64,
    /// Rows per page, 1..=200.
    pub rows: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, rows: 20 }
    }
}

/// One aggregated bundle row as it comes back from the grouped query.
#[derive(Debug, Clone, FromQueryResult)]
pub struct BundleSummaryRow {
    pub bundle_id: i32,
    pub plan_id: i32,
    pub plan_name: String,
    pub customer_name: String,
    pub agency_id: Option<i32>,
    pub agency_name: Option<String>,
    pub area: String,
    pub requested_at: Option<chrono::NaiveDate>,
    pub request_due_date: Option<chrono::NaiveDate>,
    pub quote_valid_days: Option<i32>,
    pub contract_start_date: Option<chrono::NaiveDate>,
    pub quote_status: QuoteStatus,
    pub offer_status: OfferStatus,
    pub updated_at: chrono::NaiveDateTime,
    pub sp_count: i64,
    pub sum_kw: f64,
    pub project_count: i64,
}

/// Per-project rollup restricted to supply points carrying that project's
/// link; unlinked points are excluded here but still count at bundle level.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ProjectRollupRow {
    pub project_id: i32,
    pub capacity_mw: f64,
    pub sp_count: i64,
    pub sum_kw: f64,
}

#[derive(Debug)]
pub struct QuotationPage {
    pub total_count: u64,
    pub filtered_count: u64,
    pub rows: Vec<BundleSummaryRow>,
}

#[derive(Debug)]
pub struct BundleDetail {
    pub header: BundleSummaryRow,
    pub projects: Vec<ProjectRollupRow>,
}

pub struct QuotationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> QuotationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List bundles with rollups, pagination and independent counts. The
    /// three queries run on the same connection; they are not snapshot
    /// consistent with each other, which is accepted for interactive reads.
    pub async fn list(
        &self,
        filter: &BundleFilter,
        sort_key: SortKey,
        direction: SortDirection,
        page: PageRequest,
    ) -> Result<QuotationPage, ServiceError> {
        let total_count = ppa_bundles::Entity::find().count(self.db).await?;
        let filtered_count = apply_filter(ppa_bundles::Entity::find(), filter)
            .count(self.db)
            .await?;

        // saturate rather than overflow on absurd page numbers, and stay
        // within what the driver can bind as a signed integer
        let offset = page
            .page
            .saturating_sub(1)
            .saturating_mul(page.rows)
            .min(i64::MAX as u64);

        let rows = summary_select(filter)
            .order_by(sort_key.expr(), direction.order())
            // deterministic paging across ties
            .order_by(bundle_col(ppa_bundles::Column::Id), Order::Desc)
            .limit(page.rows)
            .offset(offset)
            .into_model::<BundleSummaryRow>()
            .all(self.db)
            .await?;

        Ok(QuotationPage {
            total_count,
            filtered_count,
            rows,
        })
    }

    /// Fetch one bundle with the same aggregation as the list, plus its
    /// project children ordered by id ascending.
    pub async fn detail(&self, bundle_id: i32) -> Result<BundleDetail, ServiceError> {
        let header = summary_select(&BundleFilter::default())
            .filter(ppa_bundles::Column::Id.eq(bundle_id))
            .into_model::<BundleSummaryRow>()
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Bundle not found".to_string()))?;

        let projects = ppa_projects::Entity::find()
            .select_only()
            .column_as(qual((ppa_projects::Entity, ppa_projects::Column::Id)), "project_id")
            .column_as(
                qual((ppa_projects::Entity, ppa_projects::Column::CapacityMw)),
                "capacity_mw",
            )
            .column_as(sp_count_expr(), "sp_count")
            .column_as(sum_kw_expr(), "sum_kw")
            .join(JoinType::LeftJoin, ppa_projects::Relation::SupplyPoints.def())
            .filter(ppa_projects::Column::BundleId.eq(bundle_id))
            .group_by(qual((ppa_projects::Entity, ppa_projects::Column::Id)))
            .group_by(qual((ppa_projects::Entity, ppa_projects::Column::CapacityMw)))
            .order_by(qual((ppa_projects::Entity, ppa_projects::Column::Id)), Order::Asc)
            .into_model::<ProjectRollupRow>()
            .all(self.db)
            .await?;

        Ok(BundleDetail { header, projects })
    }
}

fn qual<T: IntoColumnRef>(col: T) -> SimpleExpr {
    Expr::col(col).into()
}

fn bundle_col(col: ppa_bundles::Column) -> SimpleExpr {
    qual((ppa_bundles::Entity, col))
}

fn sp_count_expr() -> SimpleExpr {
    Expr::col((ppa_supply_points::Entity, ppa_supply_points::Column::Id)).count()
}

fn sum_kw_expr() -> SimpleExpr {
    Func::coalesce([
        Expr::col((ppa_supply_points::Entity, ppa_supply_points::Column::ContractKw)).sum(),
        Expr::val(0.0).into(),
    ])
    .into()
}

fn scalar(stmt: sea_orm::sea_query::SelectStatement) -> SimpleExpr {
    SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(stmt)))
}

// Correlated subqueries keep the supply-point rollups exact: joining the
// supply points alongside the projects would multiply rows and inflate
// COUNT/SUM for bundles that have both kinds of children.
fn sp_count_subquery() -> SimpleExpr {
    scalar(
        Query::select()
            .expr(sp_count_expr())
            .from(ppa_supply_points::Entity)
            .and_where(
                Expr::col((ppa_supply_points::Entity, ppa_supply_points::Column::BundleId))
                    .equals((ppa_bundles::Entity, ppa_bundles::Column::Id)),
            )
            .to_owned(),
    )
}

fn sum_kw_subquery() -> SimpleExpr {
    scalar(
        Query::select()
            .expr(sum_kw_expr())
            .from(ppa_supply_points::Entity)
            .and_where(
                Expr::col((ppa_supply_points::Entity, ppa_supply_points::Column::BundleId))
                    .equals((ppa_bundles::Entity, ppa_bundles::Column::Id)),
            )
            .to_owned(),
    )
}

fn apply_filter(
    mut select: Select<ppa_bundles::Entity>,
    filter: &BundleFilter,
) -> Select<ppa_bundles::Entity> {
    if let Some(customer_id) = filter.customer_id {
        select = select.filter(ppa_bundles::Column::CustomerId.eq(customer_id));
    }
    if let Some(agency_id) = filter.agency_id {
        select = select.filter(ppa_bundles::Column::AgencyId.eq(agency_id));
    }
    if let Some(area) = &filter.area {
        select = select.filter(ppa_bundles::Column::Area.eq(area.clone()));
    }
    if let Some(quote_status) = &filter.quote_status {
        select = select.filter(ppa_bundles::Column::QuoteStatus.eq(quote_status.clone()));
    }
    if let Some(offer_status) = &filter.offer_status {
        select = select.filter(ppa_bundles::Column::OfferStatus.eq(offer_status.clone()));
    }
    select
}

/// The shared grouped selectable: bundle joined to plan and customer (inner),
/// agency and projects (outer). Supply-point rollups come from correlated
/// subqueries with COALESCE keeping childless bundles at 0 / 0.0; grouping by
/// every bundle-owned column selected yields one row per bundle.
fn summary_select(filter: &BundleFilter) -> Select<ppa_bundles::Entity> {
    let select = ppa_bundles::Entity::find()
        .select_only()
        .column_as(bundle_col(ppa_bundles::Column::Id), "bundle_id")
        .column_as(qual((plans::Entity, plans::Column::Id)), "plan_id")
        .column_as(qual((plans::Entity, plans::Column::Name)), "plan_name")
        .column_as(qual((customers::Entity, customers::Column::Name)), "customer_name")
        .column_as(qual((agencies::Entity, agencies::Column::Id)), "agency_id")
        .column_as(qual((agencies::Entity, agencies::Column::Name)), "agency_name")
        .column_as(bundle_col(ppa_bundles::Column::Area), "area")
        .column_as(bundle_col(ppa_bundles::Column::RequestedAt), "requested_at")
        .column_as(
            bundle_col(ppa_bundles::Column::RequestDueDate),
            "request_due_date",
        )
        .column_as(
            bundle_col(ppa_bundles::Column::QuoteValidDays),
            "quote_valid_days",
        )
        .column_as(
            bundle_col(ppa_bundles::Column::ContractStartDate),
            "contract_start_date",
        )
        .column_as(bundle_col(ppa_bundles::Column::QuoteStatus), "quote_status")
        .column_as(bundle_col(ppa_bundles::Column::OfferStatus), "offer_status")
        .column_as(bundle_col(ppa_bundles::Column::UpdatedAt), "updated_at")
        .column_as(sp_count_subquery(), "sp_count")
        .column_as(sum_kw_subquery(), "sum_kw")
        .column_as(
            Expr::col((ppa_projects::Entity, ppa_projects::Column::Id)).count_distinct(),
            "project_count",
        )
        .join(JoinType::InnerJoin, ppa_bundles::Relation::Plan.def())
        .join(JoinType::InnerJoin, ppa_bundles::Relation::Customer.def())
        .join(JoinType::LeftJoin, ppa_bundles::Relation::Agency.def())
        .join(JoinType::LeftJoin, ppa_bundles::Relation::Projects.def())
        .group_by(bundle_col(ppa_bundles::Column::Id))
        .group_by(qual((plans::Entity, plans::Column::Id)))
        .group_by(qual((plans::Entity, plans::Column::Name)))
        .group_by(qual((customers::Entity, customers::Column::Name)))
        .group_by(qual((agencies::Entity, agencies::Column::Id)))
        .group_by(qual((agencies::Entity, agencies::Column::Name)))
        .group_by(bundle_col(ppa_bundles::Column::Area))
        .group_by(bundle_col(ppa_bundles::Column::RequestedAt))
        .group_by(bundle_col(ppa_bundles::Column::RequestDueDate))
        .group_by(bundle_col(ppa_bundles::Column::QuoteValidDays))
        .group_by(bundle_col(ppa_bundles::Column::ContractStartDate))
        .group_by(bundle_col(ppa_bundles::Column::QuoteStatus))
        .group_by(bundle_col(ppa_bundles::Column::OfferStatus))
        .group_by(bundle_col(ppa_bundles::Column::UpdatedAt));

    apply_filter(select, filter)
}
