//! Renewal-case reporting over the contracts table.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use sea_orm::sea_query::{Expr, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QuerySelect, RelationTrait,
};

use crate::database::entities::enums::ContractStatus;
use crate::database::entities::{contracts, customers, plans};
use crate::services::ServiceError;

/// Simplified projection for the renewal dashboard.
#[derive(Debug, Clone, FromQueryResult)]
pub struct RenewalCaseRow {
    pub contract_id: i32,
    pub customer_name: String,
    pub supply_point_number: String,
    pub plan_name: String,
    pub end_date: NaiveDate,
}

pub struct ContractService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContractService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Contracts still UNDER_CONTRACT whose end date falls in the calendar
    /// month roughly five months ahead of today.
    pub async fn renewal_cases(&self) -> Result<Vec<RenewalCaseRow>, ServiceError> {
        let today = Utc::now().date_naive();
        let (lower, upper) = renewal_window(today);

        let rows = contracts::Entity::find()
            .select_only()
            .column_as(qual((contracts::Entity, contracts::Column::Id)), "contract_id")
            .column_as(
                qual((customers::Entity, customers::Column::Name)),
                "customer_name",
            )
            .column_as(
                qual((contracts::Entity, contracts::Column::SupplyPointNumber)),
                "supply_point_number",
            )
            .column_as(qual((plans::Entity, plans::Column::Name)), "plan_name")
            .column_as(qual((contracts::Entity, contracts::Column::EndDate)), "end_date")
            .join(JoinType::InnerJoin, contracts::Relation::Customer.def())
            .join(JoinType::InnerJoin, contracts::Relation::Plan.def())
            .filter(contracts::Column::Status.eq(ContractStatus::UnderContract))
            .filter(contracts::Column::EndDate.gte(lower))
            .filter(contracts::Column::EndDate.lt(upper))
            .into_model::<RenewalCaseRow>()
            .all(self.db)
            .await?;

        Ok(rows)
    }
}

fn qual<T: IntoColumnRef>(col: T) -> SimpleExpr {
    Expr::col(col).into()
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// [first day of the month ~5 months ahead, first day of the month after).
/// 155 days past the current month's start always lands in that target
/// month; 32 days past the target start always lands in the month after.
fn renewal_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let target = month_start(month_start(today) + Duration::days(155));
    let upper = month_start(target + Duration::days(32));
    (target, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_one_calendar_month_five_months_out() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 18).unwrap();
        let (lower, upper) = renewal_window(today);
        assert_eq!(lower, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(upper, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn window_handles_year_boundaries() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        let (lower, upper) = renewal_window(today);
        assert_eq!(lower, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        assert_eq!(upper, NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    }

    #[test]
    fn window_starts_on_the_first_regardless_of_today() {
        let first = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert_eq!(renewal_window(first), renewal_window(last));
    }
}
